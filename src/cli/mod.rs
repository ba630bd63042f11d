//! CLI module - Command-line interface for socnet
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::db::SchemaVariant;
use crate::domain::Gender;

/// socnet - friend graph, profile directory and synthetic user generator
#[derive(Parser)]
#[command(name = "socnet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Credentials of the user a command acts for.
#[derive(Args, Debug, Clone)]
pub struct ActAs {
    /// Username to act as
    #[arg(long = "as", value_name = "USERNAME")]
    pub username: String,

    #[arg(long)]
    pub password: String,
}

/// Profile fields shared by `register` and `edit`.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub surname: String,

    #[arg(long)]
    pub age: i32,

    /// male or female
    #[arg(long)]
    pub gender: Gender,

    #[arg(long)]
    pub city: String,

    /// Interest tag, repeatable
    #[arg(long = "interest", value_name = "INTEREST")]
    pub interests: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Register a new account
    #[command(alias = "signup")]
    Register {
        username: String,

        #[arg(long)]
        password: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Show a user's page
    #[command(alias = "i")]
    Show { username: String },

    /// Replace your profile and interests
    ///
    /// Without --interest the current interests are kept.
    Edit {
        #[command(flatten)]
        auth: ActAs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Remove all interests
        #[arg(long, conflicts_with = "interests")]
        clear_interests: bool,
    },

    /// Change your password
    Passwd {
        #[command(flatten)]
        auth: ActAs,

        #[arg(long)]
        new_password: String,
    },

    /// Friend requests and friend lists
    #[command(alias = "f")]
    Friends {
        #[command(flatten)]
        auth: ActAs,

        #[command(subcommand)]
        command: FriendCommands,
    },

    /// Search profiles
    #[command(alias = "s")]
    Search {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        surname: Option<String>,

        #[arg(long)]
        age_from: Option<i32>,

        #[arg(long)]
        age_to: Option<i32>,

        #[arg(long)]
        gender: Option<Gender>,

        #[arg(long)]
        city: Option<String>,

        /// Table set to query: plain, composite or separate
        #[arg(long, default_value = "plain")]
        variant: SchemaVariant,
    },

    /// List the interest catalog
    Interests,

    /// Synthetic user generation
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },

    /// Maintain the indexed table variants
    Variants {
        #[command(subcommand)]
        command: VariantCommands,
    },
}

#[derive(Subcommand)]
pub enum FriendCommands {
    /// Add a user to your friends
    #[command(alias = "a")]
    Add { target: String },

    /// Check whether you added a user
    Check { target: String },

    /// List mutual friends (yours, or another user's)
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        of: Option<String>,
    },

    /// Show incoming and outgoing friend requests
    Requests,
}

#[derive(Subcommand)]
pub enum UsersCommands {
    /// Generate users, each with its own random traits
    Generate {
        /// Name corpus, one "<name> <surname>" per line
        file: Option<PathBuf>,

        /// Amount of users to generate
        #[arg(short, long)]
        amount: Option<u32>,
    },

    /// Generate users in batches sharing random traits
    BatchGenerate {
        /// Name corpus, one "<name> <surname>" per line
        file: Option<PathBuf>,

        /// Amount of users to generate
        #[arg(short, long)]
        amount: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum VariantCommands {
    /// Copy the base tables into the indexed variants
    Sync {
        /// Only this variant (composite or separate)
        #[arg(long)]
        variant: Option<SchemaVariant>,
    },
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_rejects_interest_with_clear() {
        let result = Cli::try_parse_from([
            "socnet", "edit", "--as", "ann", "--password", "pw", "--name", "Ann", "--surname",
            "Lee", "--age", "30", "--gender", "female", "--city", "Kazan", "--interest", "Chess",
            "--clear-interests",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_edit_parses_without_interests() {
        let cli = Cli::try_parse_from([
            "socnet", "edit", "--as", "ann", "--password", "pw", "--name", "Ann", "--surname",
            "Lee", "--age", "30", "--gender", "female", "--city", "Kazan",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Edit {
                profile,
                clear_interests,
                ..
            }) => {
                assert!(profile.interests.is_empty());
                assert!(!clear_interests);
            }
            _ => panic!("expected edit"),
        }
    }
}
