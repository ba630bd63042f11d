//! Domain service for accounts and profiles.
//!
//! Resolves usernames, registers accounts, reads and edits profiles, and
//! searches the profile directory over any schema variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::SchemaVariant;
use crate::domain::{Gender, UserId};
use crate::models::account::Account;
use crate::models::profile::{Profile, ProfileInput, ProfileSummary, UserPage};
use crate::models::search::SearchCriteria;
use crate::services::validation::ValidationError;

/// Errors specific to user directory operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Username is already in use")]
    UsernameInUse,

    #[error("User not found: {0}")]
    UsernameNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// Everything needed to open an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: Gender,
    pub city: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl RegistrationRequest {
    #[must_use]
    pub fn profile(&self) -> ProfileInput {
        ProfileInput {
            name: self.name.clone(),
            surname: self.surname.clone(),
            age: self.age,
            gender: self.gender,
            city: self.city.clone(),
            interests: self.interests.clone(),
        }
    }
}

/// Domain service trait for the user directory.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Creates an account together with its profile and interests.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::UsernameInUse`] if the username is taken.
    async fn register(&self, request: RegistrationRequest) -> Result<Account, UserError>;

    /// # Errors
    ///
    /// Returns [`UserError::UsernameNotFound`] if no account has that name.
    async fn get_by_username(&self, username: &str) -> Result<Account, UserError>;

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, UserError>;

    async fn get_interests(&self, user_id: UserId) -> Result<Vec<String>, UserError>;

    async fn get_user_page(&self, username: &str) -> Result<UserPage, UserError>;

    /// Replaces the profile and the whole interest set of an account.
    async fn edit_profile(&self, user_id: UserId, input: ProfileInput) -> Result<(), UserError>;

    async fn search(
        &self,
        criteria: &SearchCriteria,
        variant: SchemaVariant,
    ) -> Result<Vec<ProfileSummary>, UserError>;
}
