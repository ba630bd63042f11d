use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::domain::{Gender, UserId};
use crate::entities::{user_has_interest, user_info, user_settings};
use crate::models::account::Account;

/// Everything written for one account in a single transaction.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub gender: Gender,
    pub city: String,
    /// Edge targets; duplicates are written as separate edges.
    pub interest_ids: Vec<i32>,
}

#[derive(Debug, Error)]
pub enum CreateAccountError {
    #[error("Username is already in use")]
    UsernameInUse,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert account, profile and interest edges as one unit of work.
    ///
    /// A username uniqueness violation rolls the transaction back and is
    /// reported as [`CreateAccountError::UsernameInUse`].
    pub async fn create(&self, account: &NewAccount) -> Result<Account, CreateAccountError> {
        let txn = self.conn.begin().await?;

        let settings = user_settings::ActiveModel {
            id: NotSet,
            username: Set(account.username.clone()),
            password: Set(account.password_hash.clone()),
        };

        let user_id = match user_settings::Entity::insert(settings).exec(&txn).await {
            Ok(result) => result.last_insert_id,
            Err(err) => {
                txn.rollback().await?;
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Err(CreateAccountError::UsernameInUse);
                }
                return Err(err.into());
            }
        };

        let info = user_info::ActiveModel {
            user_id: Set(user_id),
            name: Set(account.name.clone()),
            surname: Set(account.surname.clone()),
            age: Set(account.age),
            gender: Set(account.gender.as_str().to_string()),
            city: Set(account.city.clone()),
        };
        user_info::Entity::insert(info)
            .exec_without_returning(&txn)
            .await?;

        if !account.interest_ids.is_empty() {
            let edges = account
                .interest_ids
                .iter()
                .map(|&interest_id| user_has_interest::ActiveModel {
                    id: NotSet,
                    interest_id: Set(interest_id),
                    user_id: Set(user_id),
                });
            user_has_interest::Entity::insert_many(edges)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(Account {
            id: UserId::new(user_id),
            username: account.username.clone(),
        })
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let user = user_settings::Entity::find()
            .filter(user_settings::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(Account::from))
    }

    /// Get account with its password hash (for credential checks)
    pub async fn get_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(Account, String)>> {
        let user = user_settings::Entity::find()
            .filter(user_settings::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(|u| {
            let password_hash = u.password.clone();
            (Account::from(u), password_hash)
        }))
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Account>> {
        let user = user_settings::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(Account::from))
    }

    pub async fn update_password_hash(&self, id: UserId, password_hash: &str) -> Result<()> {
        let result = user_settings::Entity::update_many()
            .col_expr(
                user_settings::Column::Password,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .filter(user_settings::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to update password")?;

        if result.rows_affected == 0 {
            anyhow::bail!("User not found: {id}");
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let count = user_settings::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count accounts")?;
        Ok(count)
    }
}

fn argon2_for(config: Option<&SecurityConfig>) -> Result<Argon2<'static>> {
    let Some(cfg) = config else {
        return Ok(Argon2::default());
    };

    let params = Params::new(
        cfg.argon2_memory_cost_kib,
        cfg.argon2_time_cost,
        cfg.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate's default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_for(config)?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check a plain password against a stored PHC hash string.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Whether a stored hash was produced with params other than the configured ones.
pub fn needs_rehash(password_hash: &str, config: &SecurityConfig) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    if parsed_hash.algorithm != argon2::ARGON2ID_IDENT {
        return Ok(true);
    }

    let params = Params::try_from(&parsed_hash)
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params in hash: {e}"))?;

    Ok(params.m_cost() != config.argon2_memory_cost_kib
        || params.t_cost() != config.argon2_time_cost
        || params.p_cost() != config.argon2_parallelism)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
            auto_migrate_password_hashes: true,
        }
    }

    #[test]
    fn hash_verifies_only_the_hashed_password() {
        let hash = hash_password("hunter2", Some(&cheap_config())).unwrap();
        assert!(!hash.contains("hunter2"));
        assert!(verify_password(&hash, "hunter2").unwrap());
        assert!(!verify_password(&hash, "hunter3").unwrap());
    }

    #[test]
    fn rehash_needed_when_params_change() {
        let config = cheap_config();
        let hash = hash_password("secret", Some(&config)).unwrap();
        assert!(!needs_rehash(&hash, &config).unwrap());

        let stronger = SecurityConfig {
            argon2_time_cost: 2,
            ..config
        };
        assert!(needs_rehash(&hash, &stronger).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("not-a-phc-string", "x").is_err());
    }
}
