//! Synthetic account generator.
//!
//! Draws names from a corpus and the remaining profile fields from fixed
//! catalogs, then writes each account in its own transaction.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::task;
use tracing::{debug, error, info};

use crate::config::{GeneratorConfig, SecurityConfig};
use crate::db::repositories::account::hash_password;
use crate::db::{CreateAccountError, NewAccount, Store};
use crate::domain::{Gender, MAX_AGE, MIN_AGE};

/// Accounts sharing one set of drawn traits in batched mode.
pub const BATCH_SIZE: usize = 1000;

pub const MAX_INTERESTS_PER_USER: usize = 7;

/// Created accounts between two progress log lines.
const PROGRESS_LOG_INTERVAL: u32 = 1000;

pub const CITIES: [&str; 8] = [
    "Izhevsk", "Moscow", "Kazan", "Vorkuta", "Bishkek", "Ryazan", "Kerch", "Ufa",
];

/// Interest catalog seeded before every run. Values are case-sensitive and
/// stored verbatim.
pub const INTERESTS: [&str; 44] = [
    "Anime",
    "Astronomy",
    "Baking",
    "Books",
    "Bowling",
    "Calligraphy",
    "Checkmates",
    "Chess",
    "Cooking",
    "Craft",
    "Cryptography",
    "Dance",
    "Digital Arts",
    "DIY",
    "Drawing",
    "Driving",
    "Esports",
    "Fishing",
    "Games",
    "Go",
    "Gunsmithing",
    "Hide'n'Seek",
    "Homebrewing",
    "Hunting",
    "Laser Tag",
    "Leather Crafting",
    "Lego",
    "Mahjong",
    "Music",
    "Origami",
    "Photography",
    "Poker",
    "Programming",
    "Puzzles",
    "Quizzes",
    "Random Stuff",
    "Singing",
    INJECTION_FIXTURE,
    "Surfing",
    "Swimming",
    "TCG",
    "Tennis",
    "Tourism",
    "Yoga",
];

/// Catalog entry that must always travel through parameter binding.
pub const INJECTION_FIXTURE: &str = "SQL Injections'); DROP TABLE user; --MWA-HA-HA";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid name corpus: {0}")]
    Corpus(String),

    #[error("Interest catalog error: {0}")]
    Catalog(String),

    #[error("Aborted after {failures} consecutive failures ({created} accounts created)")]
    TooManyFailures { failures: u32, created: u32 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for GeneratorError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for GeneratorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Every account draws its own age, gender, city and interests.
    PerUser,
    /// Accounts in the same batch share age, gender, city and interests.
    Batched,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerUser => f.write_str("per-user"),
            Self::Batched => f.write_str("batched"),
        }
    }
}

/// Names and surnames read from a `"<name> <surname>"` per line file.
/// Both lists are drawn from independently.
#[derive(Debug, Clone)]
pub struct NameCorpus {
    names: Vec<String>,
    surnames: Vec<String>,
}

impl NameCorpus {
    pub fn parse(content: &str) -> Result<Self, GeneratorError> {
        let mut names = Vec::new();
        let mut surnames = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (Some(name), Some(surname)) = (parts.next(), parts.next()) else {
                return Err(GeneratorError::Corpus(format!(
                    "line {}: expected \"<name> <surname>\", got {line:?}",
                    idx + 1
                )));
            };
            names.push(name.to_string());
            surnames.push(surname.to_string());
        }

        if names.is_empty() {
            return Err(GeneratorError::Corpus("corpus has no entries".to_string()));
        }

        Ok(Self { names, surnames })
    }

    pub async fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GeneratorError::Corpus(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Draw a name and a surname independently.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> (&str, &str) {
        let name = &self.names[rng.random_range(0..self.names.len())];
        let surname = &self.surnames[rng.random_range(0..self.surnames.len())];
        (name, surname)
    }
}

/// Profile fields other than the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnTraits {
    pub age: i32,
    pub gender: Gender,
    pub city: &'static str,
    /// Drawn with replacement; may repeat.
    pub interests: Vec<&'static str>,
}

impl DrawnTraits {
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        let age = rng.random_range(MIN_AGE..=MAX_AGE);
        let gender = Gender::ALL[rng.random_range(0..Gender::ALL.len())];
        let city = CITIES[rng.random_range(0..CITIES.len())];
        let count = rng.random_range(1..=MAX_INTERESTS_PER_USER);
        let interests = (0..count)
            .map(|_| INTERESTS[rng.random_range(0..INTERESTS.len())])
            .collect();

        Self {
            age,
            gender,
            city,
            interests,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub mode: GenerationMode,
    pub requested: u32,
    pub created: u32,
    pub failed: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u128,
}

pub struct UserGenerator {
    store: Store,
    config: GeneratorConfig,
    security: SecurityConfig,
    batch_size: usize,
}

impl UserGenerator {
    #[must_use]
    pub const fn new(store: Store, config: GeneratorConfig, security: SecurityConfig) -> Self {
        Self {
            store,
            config,
            security,
            batch_size: BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Insert the catalog and resolve each value to its id.
    pub async fn seed_catalog(&self) -> Result<HashMap<String, i32>, GeneratorError> {
        let values: Vec<String> = INTERESTS.iter().map(ToString::to_string).collect();

        self.store
            .upsert_interests(&values)
            .await
            .map_err(|e| GeneratorError::Catalog(e.to_string()))?;

        let ids = self
            .store
            .find_interests_by_values(&values)
            .await
            .map_err(|e| GeneratorError::Catalog(e.to_string()))?
            .into_iter()
            .map(|i| (i.value, i.id))
            .collect();

        Ok(ids)
    }

    /// Create `amount` accounts. Failed attempts are logged and retried;
    /// the run aborts once `max_consecutive_failures` attempts in a row fail.
    pub async fn run<R: Rng + Send>(
        &self,
        corpus: &NameCorpus,
        amount: u32,
        mode: GenerationMode,
        rng: &mut R,
    ) -> Result<GenerationReport, GeneratorError> {
        let started_at = Utc::now();
        let clock = Instant::now();
        info!(%started_at, amount, %mode, corpus = corpus.len(), "Starting user generation");

        let catalog = self.seed_catalog().await?;

        let password = self.config.generated_password.clone();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .context("Password hashing task panicked")??;

        let run_timestamp = started_at.timestamp();
        let max_failures = self.config.max_consecutive_failures.max(1);

        let mut created = 0u32;
        let mut failed = 0u32;
        let mut consecutive_failures = 0u32;
        let mut in_batch = 0usize;
        let mut batch_traits: Option<DrawnTraits> = None;

        while created < amount {
            let traits = match mode {
                GenerationMode::PerUser => DrawnTraits::draw(rng),
                GenerationMode::Batched => batch_traits
                    .get_or_insert_with(|| {
                        let fresh = DrawnTraits::draw(rng);
                        debug!(age = fresh.age, gender = %fresh.gender, city = fresh.city, "New batch");
                        fresh
                    })
                    .clone(),
            };

            let (name, surname) = corpus.draw(rng);
            let account = NewAccount {
                username: make_username(name, surname, run_timestamp),
                password_hash: password_hash.clone(),
                name: name.to_string(),
                surname: surname.to_string(),
                age: traits.age,
                gender: traits.gender,
                city: traits.city.to_string(),
                interest_ids: traits
                    .interests
                    .iter()
                    .filter_map(|value| catalog.get(*value).copied())
                    .collect(),
            };

            match self.store.create_account(&account).await {
                Ok(_) => {
                    created += 1;
                    consecutive_failures = 0;
                    in_batch += 1;
                    if in_batch == self.batch_size {
                        in_batch = 0;
                        batch_traits = None;
                    }
                    if created % PROGRESS_LOG_INTERVAL == 0 {
                        debug!(created, amount, "Generation progress");
                    }
                }
                Err(e) => {
                    failed += 1;
                    consecutive_failures += 1;
                    // A failed attempt closes the current batch.
                    in_batch = 0;
                    batch_traits = None;
                    match e {
                        CreateAccountError::UsernameInUse => {
                            error!(username = %account.username, "Username is already in use");
                        }
                        CreateAccountError::Database(err) => {
                            error!(username = %account.username, error = %err, "Failed to create account");
                        }
                    }

                    if consecutive_failures >= max_failures {
                        return Err(GeneratorError::TooManyFailures {
                            failures: consecutive_failures,
                            created,
                        });
                    }
                }
            }
        }

        let finished_at = Utc::now();
        let elapsed = clock.elapsed();
        info!(
            %started_at,
            %finished_at,
            elapsed_ms = elapsed.as_millis(),
            created,
            failed,
            %mode,
            "User generation finished"
        );

        Ok(GenerationReport {
            mode,
            requested: amount,
            created,
            failed,
            started_at,
            finished_at,
            elapsed_ms: elapsed.as_millis(),
        })
    }
}

/// `{name}{surname}_{timestamp}_{token}` with a 13 hex character token.
fn make_username(name: &str, surname: &str, timestamp: i64) -> String {
    let token: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(13)
        .collect();
    format!("{name}{surname}_{timestamp}_{token}")
}
