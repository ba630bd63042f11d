use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::UserId;
use crate::models::account::Account;
use crate::models::interest::Interest;
use crate::models::profile::{Profile, ProfileInput, ProfileSummary};
use crate::models::search::SearchCriteria;

pub mod migrator;
pub mod repositories;
pub mod variant;

pub use repositories::account::{CreateAccountError, NewAccount};
pub use repositories::variant::SyncReport;
pub use variant::SchemaVariant;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    fn interest_repo(&self) -> repositories::interest::InterestRepository {
        repositories::interest::InterestRepository::new(self.conn.clone())
    }

    fn friend_repo(&self) -> repositories::friend::FriendRepository {
        repositories::friend::FriendRepository::new(self.conn.clone())
    }

    fn search_repo(&self) -> repositories::search::SearchRepository {
        repositories::search::SearchRepository::new(self.conn.clone())
    }

    fn variant_repo(&self) -> repositories::variant::VariantRepository {
        repositories::variant::VariantRepository::new(self.conn.clone())
    }

    // Accounts

    pub async fn create_account(
        &self,
        account: &NewAccount,
    ) -> std::result::Result<Account, CreateAccountError> {
        self.account_repo().create(account).await
    }

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_username(username).await
    }

    pub async fn get_account(&self, id: UserId) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn get_account_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(Account, String)>> {
        self.account_repo().get_by_username_with_password(username).await
    }

    pub async fn update_password_hash(&self, id: UserId, password_hash: &str) -> Result<()> {
        self.account_repo().update_password_hash(id, password_hash).await
    }

    pub async fn count_accounts(&self) -> Result<u64> {
        self.account_repo().count().await
    }

    // Profiles

    pub async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        self.profile_repo().get(user_id).await
    }

    pub async fn get_user_interests(&self, user_id: UserId) -> Result<Vec<String>> {
        self.profile_repo().interests(user_id).await
    }

    pub async fn replace_profile(&self, user_id: UserId, input: &ProfileInput) -> Result<()> {
        self.profile_repo().replace(user_id, input).await
    }

    // Interests

    pub async fn upsert_interests(&self, values: &[String]) -> Result<()> {
        self.interest_repo().upsert_all(values).await
    }

    pub async fn find_interests_by_values(&self, values: &[String]) -> Result<Vec<Interest>> {
        self.interest_repo().find_by_values(values).await
    }

    pub async fn list_interests(&self) -> Result<Vec<Interest>> {
        self.interest_repo().list_all().await
    }

    pub async fn count_interests(&self) -> Result<u64> {
        self.interest_repo().count().await
    }

    // Friends

    pub async fn friend_edge_exists(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        self.friend_repo().exists(user_id, friend_id).await
    }

    pub async fn add_friend_edge(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        self.friend_repo().add(user_id, friend_id).await
    }

    pub async fn count_friend_edges(&self, user_id: UserId, friend_id: UserId) -> Result<u64> {
        self.friend_repo().count_edges(user_id, friend_id).await
    }

    pub async fn incoming_friend_requests(&self, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        self.friend_repo().incoming(user_id).await
    }

    pub async fn outgoing_friend_requests(&self, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        self.friend_repo().outgoing(user_id).await
    }

    pub async fn mutual_friends(&self, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        self.friend_repo().mutual(user_id).await
    }

    // Search & index variants

    pub async fn search_profiles(
        &self,
        criteria: &SearchCriteria,
        variant: SchemaVariant,
    ) -> Result<Vec<ProfileSummary>> {
        self.search_repo().search(criteria, variant).await
    }

    pub async fn sync_variant(&self, variant: SchemaVariant) -> Result<SyncReport> {
        self.variant_repo().sync(variant).await
    }
}
