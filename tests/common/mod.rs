#![allow(dead_code)]

use std::sync::Arc;

use socnet::config::{Config, SecurityConfig};
use socnet::db::Store;
use socnet::domain::Gender;
use socnet::models::account::Account;
use socnet::services::{RegistrationRequest, SeaOrmUserDirectory, UserDirectory};
use tokio::sync::RwLock;

pub const PASSWORD: &str = "secret-pass";

pub async fn memory_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("failed to open in-memory store")
}

pub fn cheap_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
        auto_migrate_password_hashes: true,
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.security = cheap_security();
    config
}

pub fn shared(config: Config) -> Arc<RwLock<Config>> {
    Arc::new(RwLock::new(config))
}

pub fn directory(store: &Store) -> SeaOrmUserDirectory {
    SeaOrmUserDirectory::new(store.clone(), shared(test_config()))
}

pub fn request(username: &str) -> RegistrationRequest {
    RegistrationRequest {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        name: "Test".to_string(),
        surname: "User".to_string(),
        age: 30,
        gender: Gender::Female,
        city: "Kazan".to_string(),
        interests: vec!["Chess".to_string()],
    }
}

pub async fn register(store: &Store, username: &str) -> Account {
    directory(store)
        .register(request(username))
        .await
        .expect("failed to register user")
}
