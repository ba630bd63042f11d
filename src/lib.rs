pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, UsersCommands, VariantCommands};
pub use config::Config;
use models::search::SearchCriteria;
use services::GenerationMode;

pub async fn run() -> anyhow::Result<()> {
    let args = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    let Some(command) = args.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };
    let json = args.json;

    match command {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Created config.toml");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }

        Commands::Register {
            username,
            password,
            profile,
        } => cli::cmd_register(&config, json, username, password, profile).await,

        Commands::Show { username } => cli::cmd_show_user(&config, json, &username).await,

        Commands::Edit {
            auth,
            profile,
            clear_interests,
        } => cli::cmd_edit_profile(&config, &auth, profile, clear_interests).await,

        Commands::Passwd { auth, new_password } => {
            cli::cmd_passwd(&config, &auth, &new_password).await
        }

        Commands::Friends { auth, command } => {
            cli::cmd_friends(&config, json, &auth, command).await
        }

        Commands::Search {
            name,
            surname,
            age_from,
            age_to,
            gender,
            city,
            variant,
        } => {
            let criteria = SearchCriteria {
                name,
                surname,
                age_from,
                age_to,
                gender,
                city,
            };
            cli::cmd_search(&config, json, criteria, variant).await
        }

        Commands::Interests => cli::cmd_list_interests(&config, json).await,

        Commands::Users { command } => match command {
            UsersCommands::Generate { file, amount } => {
                cli::cmd_generate_users(&config, json, file, amount, GenerationMode::PerUser).await
            }
            UsersCommands::BatchGenerate { file, amount } => {
                cli::cmd_generate_users(&config, json, file, amount, GenerationMode::Batched).await
            }
        },

        Commands::Variants {
            command: VariantCommands::Sync { variant },
        } => cli::cmd_variants_sync(&config, json, variant).await,
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let json_layer = config.general.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.general.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    info!(
        database = %config.general.database_path,
        "socnet {} starting",
        env!("CARGO_PKG_VERSION")
    );
}
