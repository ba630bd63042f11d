//! `SeaORM` implementation of the `Authenticator` trait.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Store;
use crate::db::repositories::account::{hash_password, needs_rehash, verify_password};
use crate::models::account::Account;
use crate::services::auth_service::{AuthError, Authenticator};
use crate::services::validation::validate_password;

pub struct SeaOrmAuthenticator {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthenticator {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn check(&self, password_hash: &str, password: &str) -> Result<bool, AuthError> {
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password(&password_hash, &password))
            .await
            .context("Password verification task panicked")??;

        Ok(is_valid)
    }

    async fn store_new_hash(&self, account: &Account, password: &str) -> Result<(), AuthError> {
        let security = self.config.read().await.security.clone();
        let password = password.to_string();

        let new_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .context("Password hashing task panicked")??;

        self.store.update_password_hash(account.id, &new_hash).await?;
        Ok(())
    }
}

#[async_trait]
impl Authenticator for SeaOrmAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let Some((account, password_hash)) = self.store.get_account_with_password(username).await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self.check(&password_hash, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let security = self.config.read().await.security.clone();
        if security.auto_migrate_password_hashes && needs_rehash(&password_hash, &security)? {
            // Login already succeeded; a failed upgrade is retried next time.
            match self.store_new_hash(&account, password).await {
                Ok(()) => info!(username = %account.username, "Password hash upgraded"),
                Err(e) => warn!(username = %account.username, error = %e, "Password hash upgrade failed"),
            }
        }

        Ok(account)
    }

    async fn change_password(
        &self,
        actor: &Account,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let (_, password_hash) = self
            .store
            .get_account_with_password(&actor.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.check(&password_hash, current_password).await? {
            return Err(AuthError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.store_new_hash(actor, new_password).await?;
        info!(username = %actor.username, "Password changed");
        Ok(())
    }
}
