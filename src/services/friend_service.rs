//! Domain service for the directed friend graph.
//!
//! An edge `A -> B` means A added B. Reciprocity is never stored; the
//! incoming, outgoing and mutual views are derived from the edge table.

use thiserror::Error;

use crate::models::account::Account;
use crate::models::profile::ProfileSummary;

/// Errors specific to friend graph operations.
#[derive(Debug, Error)]
pub enum FriendError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for FriendError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FriendError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for friendships.
#[async_trait::async_trait]
pub trait FriendGraph: Send + Sync {
    /// Whether `actor` has added `target`.
    ///
    /// # Errors
    ///
    /// Returns [`FriendError::UserNotFound`] if `target` does not exist.
    async fn is_friend(&self, actor: &Account, target: &str) -> Result<bool, FriendError>;

    /// Adds `actor -> target` unless present. Returns whether an edge was written.
    ///
    /// # Errors
    ///
    /// Returns [`FriendError::UserNotFound`] if `target` does not exist.
    async fn add_friend(&self, actor: &Account, target: &str) -> Result<bool, FriendError>;

    /// Users who added `actor` and were not added back.
    async fn incoming_requests(&self, actor: &Account)
    -> Result<Vec<ProfileSummary>, FriendError>;

    /// Users `actor` added who did not add `actor` back.
    async fn outgoing_requests(&self, actor: &Account)
    -> Result<Vec<ProfileSummary>, FriendError>;

    async fn mutual_friends(&self, actor: &Account) -> Result<Vec<ProfileSummary>, FriendError>;

    /// Mutual friends of any user, looked up by name.
    async fn mutual_friends_of(&self, username: &str)
    -> Result<Vec<ProfileSummary>, FriendError>;
}
