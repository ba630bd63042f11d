//! `SeaORM` implementation of the `FriendGraph` trait.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::db::Store;
use crate::models::account::Account;
use crate::models::profile::ProfileSummary;
use crate::services::friend_service::{FriendError, FriendGraph};

pub struct SeaOrmFriendGraph {
    store: Store,
}

impl SeaOrmFriendGraph {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn resolve(&self, username: &str) -> Result<Account, FriendError> {
        self.store
            .get_account_by_username(username)
            .await?
            .ok_or_else(|| FriendError::UserNotFound(username.to_string()))
    }
}

#[async_trait]
impl FriendGraph for SeaOrmFriendGraph {
    async fn is_friend(&self, actor: &Account, target: &str) -> Result<bool, FriendError> {
        let target = self.resolve(target).await?;
        Ok(self.store.friend_edge_exists(actor.id, target.id).await?)
    }

    async fn add_friend(&self, actor: &Account, target: &str) -> Result<bool, FriendError> {
        let target = self.resolve(target).await?;

        if actor.id == target.id {
            warn!(username = %actor.username, "User added themselves as a friend");
        }

        let added = self.store.add_friend_edge(actor.id, target.id).await?;
        debug!(from = %actor.id, to = %target.id, added, "Friend edge requested");
        Ok(added)
    }

    async fn incoming_requests(
        &self,
        actor: &Account,
    ) -> Result<Vec<ProfileSummary>, FriendError> {
        Ok(self.store.incoming_friend_requests(actor.id).await?)
    }

    async fn outgoing_requests(
        &self,
        actor: &Account,
    ) -> Result<Vec<ProfileSummary>, FriendError> {
        Ok(self.store.outgoing_friend_requests(actor.id).await?)
    }

    async fn mutual_friends(&self, actor: &Account) -> Result<Vec<ProfileSummary>, FriendError> {
        Ok(self.store.mutual_friends(actor.id).await?)
    }

    async fn mutual_friends_of(
        &self,
        username: &str,
    ) -> Result<Vec<ProfileSummary>, FriendError> {
        let user = self.resolve(username).await?;
        Ok(self.store.mutual_friends(user.id).await?)
    }
}
