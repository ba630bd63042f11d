//! `SeaORM` implementation of the `UserDirectory` trait.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task;
use tracing::info;

use crate::config::Config;
use crate::db::repositories::account::hash_password;
use crate::db::{CreateAccountError, NewAccount, SchemaVariant, Store};
use crate::domain::UserId;
use crate::models::account::Account;
use crate::models::profile::{Profile, ProfileInput, ProfileSummary, UserPage};
use crate::models::search::SearchCriteria;
use crate::services::user_service::{RegistrationRequest, UserDirectory, UserError};
use crate::services::validation::{
    validate_password, validate_profile_input, validate_search, validate_username,
};

pub struct SeaOrmUserDirectory {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmUserDirectory {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn interest_ids(&self, values: &[String]) -> Result<Vec<i32>, UserError> {
        self.store.upsert_interests(values).await?;
        let ids: HashMap<String, i32> = self
            .store
            .find_interests_by_values(values)
            .await?
            .into_iter()
            .map(|i| (i.value, i.id))
            .collect();

        let mut seen = HashSet::new();
        Ok(values
            .iter()
            .filter(|value| seen.insert(value.as_str()))
            .filter_map(|value| ids.get(value).copied())
            .collect())
    }
}

#[async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn register(&self, request: RegistrationRequest) -> Result<Account, UserError> {
        validate_username(&request.username)?;
        validate_password(&request.password)?;
        validate_profile_input(&request.profile())?;

        let security = self.config.read().await.security.clone();
        let password = request.password.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .context("Password hashing task panicked")??;

        let interest_ids = self.interest_ids(&request.interests).await?;

        let account = self
            .store
            .create_account(&NewAccount {
                username: request.username,
                password_hash,
                name: request.name,
                surname: request.surname,
                age: request.age,
                gender: request.gender,
                city: request.city,
                interest_ids,
            })
            .await
            .map_err(|e| match e {
                CreateAccountError::UsernameInUse => UserError::UsernameInUse,
                CreateAccountError::Database(err) => UserError::from(err),
            })?;

        info!(user_id = %account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    async fn get_by_username(&self, username: &str) -> Result<Account, UserError> {
        self.store
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| UserError::UsernameNotFound(username.to_string()))
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, UserError> {
        Ok(self.store.get_profile(user_id).await?)
    }

    async fn get_interests(&self, user_id: UserId) -> Result<Vec<String>, UserError> {
        Ok(self.store.get_user_interests(user_id).await?)
    }

    async fn get_user_page(&self, username: &str) -> Result<UserPage, UserError> {
        let account = self.get_by_username(username).await?;
        let profile = self.get_profile(account.id).await?;
        let interests = self.get_interests(account.id).await?;

        Ok(UserPage {
            account,
            profile,
            interests,
        })
    }

    async fn edit_profile(&self, user_id: UserId, input: ProfileInput) -> Result<(), UserError> {
        validate_profile_input(&input)?;

        if self.store.get_account(user_id).await?.is_none() {
            return Err(UserError::UsernameNotFound(user_id.to_string()));
        }

        self.store.replace_profile(user_id, &input).await?;
        info!(%user_id, interests = input.interests.len(), "Profile updated");
        Ok(())
    }

    async fn search(
        &self,
        criteria: &SearchCriteria,
        variant: SchemaVariant,
    ) -> Result<Vec<ProfileSummary>, UserError> {
        validate_search(criteria)?;
        Ok(self.store.search_profiles(criteria, variant).await?)
    }
}
