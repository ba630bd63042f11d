//! Domain service for credential checks.
//!
//! There is no ambient "current user": callers authenticate once and pass
//! the returned [`Account`] to whatever acts on the user's behalf.

use thiserror::Error;

use crate::models::account::Account;
use crate::services::validation::ValidationError;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Verifies credentials and returns the account they belong to.
    ///
    /// Stale hash parameters are upgraded on success when enabled in config.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user or a
    /// wrong password.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError>;

    /// Changes the actor's password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the current password is wrong or
    /// the new one is invalid.
    async fn change_password(
        &self,
        actor: &Account,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}
