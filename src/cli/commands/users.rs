//! Synthetic user generation command handler

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::services::{GenerationMode, NameCorpus, UserGenerator};

use super::open_store;
use super::output::print_json;

pub async fn cmd_generate_users(
    config: &Config,
    json: bool,
    file: Option<PathBuf>,
    amount: Option<u32>,
    mode: GenerationMode,
) -> anyhow::Result<()> {
    let file = file.unwrap_or_else(|| PathBuf::from(&config.generator.names_file));
    let amount = amount.unwrap_or(config.generator.default_amount);

    let corpus = NameCorpus::load(&file).await?;
    let store = open_store(config).await?;
    let generator = UserGenerator::new(
        store,
        config.generator.clone(),
        config.security.clone(),
    );

    let mut rng = StdRng::from_os_rng();
    let report = generator.run(&corpus, amount, mode, &mut rng).await?;

    if json {
        return print_json(&report);
    }

    println!(
        "✓ Generated {} users ({} mode) in {:.2}s",
        report.created,
        report.mode,
        report.elapsed_ms as f64 / 1000.0
    );
    if report.failed > 0 {
        println!("  {} attempts failed and were retried", report.failed);
    }
    Ok(())
}
