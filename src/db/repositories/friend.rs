use anyhow::{Context, Result};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, Set, Statement, Value,
};

use crate::domain::UserId;
use crate::entities::friends;
use crate::models::profile::{ProfileSummary, ProfileSummaryRow};

// `fr` is the reverse edge. `fr.id IS NULL` keeps one-way edges only.
const INCOMING_SQL: &str = "\
SELECT us.username, ui.user_id, ui.name, ui.surname, ui.age, ui.gender, ui.city
FROM friends f
LEFT JOIN friends fr ON f.user_id = fr.friend_user_id AND f.friend_user_id = fr.user_id
INNER JOIN user_settings us ON us.id = f.user_id
INNER JOIN user_info ui ON ui.user_id = f.user_id
WHERE f.friend_user_id = ? AND fr.id IS NULL";

const OUTGOING_SQL: &str = "\
SELECT us.username, ui.user_id, ui.name, ui.surname, ui.age, ui.gender, ui.city
FROM friends f
LEFT JOIN friends fr ON f.user_id = fr.friend_user_id AND f.friend_user_id = fr.user_id
INNER JOIN user_settings us ON us.id = f.friend_user_id
INNER JOIN user_info ui ON ui.user_id = f.friend_user_id
WHERE f.user_id = ? AND fr.id IS NULL";

const MUTUAL_SQL: &str = "\
SELECT us.username, ui.user_id, ui.name, ui.surname, ui.age, ui.gender, ui.city
FROM friends f
INNER JOIN friends fr ON f.user_id = fr.friend_user_id AND f.friend_user_id = fr.user_id
INNER JOIN user_settings us ON us.id = f.friend_user_id
INNER JOIN user_info ui ON ui.user_id = f.friend_user_id
WHERE f.user_id = ?";

pub struct FriendRepository {
    conn: DatabaseConnection,
}

impl FriendRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        Ok(self.count_edges(user_id, friend_id).await? > 0)
    }

    /// Insert `user_id -> friend_id` unless it is already there.
    /// Returns whether a row was written.
    pub async fn add(&self, user_id: UserId, friend_id: UserId) -> Result<bool> {
        if self.exists(user_id, friend_id).await? {
            return Ok(false);
        }

        let edge = friends::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.value()),
            friend_user_id: Set(friend_id.value()),
        };
        friends::Entity::insert(edge)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert friend edge")?;

        Ok(true)
    }

    pub async fn count_edges(&self, user_id: UserId, friend_id: UserId) -> Result<u64> {
        friends::Entity::find()
            .filter(friends::Column::UserId.eq(user_id.value()))
            .filter(friends::Column::FriendUserId.eq(friend_id.value()))
            .count(&self.conn)
            .await
            .context("Failed to count friend edges")
    }

    /// Users who added `user_id` without being added back.
    pub async fn incoming(&self, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        self.summaries(INCOMING_SQL, user_id).await
    }

    /// Users `user_id` added who have not added them back.
    pub async fn outgoing(&self, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        self.summaries(OUTGOING_SQL, user_id).await
    }

    pub async fn mutual(&self, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        self.summaries(MUTUAL_SQL, user_id).await
    }

    async fn summaries(&self, sql: &str, user_id: UserId) -> Result<Vec<ProfileSummary>> {
        let backend = self.conn.get_database_backend();
        let rows = ProfileSummaryRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            sql,
            [Value::from(user_id.value())],
        ))
        .all(&self.conn)
        .await
        .context("Failed to query friend view")?;

        rows.into_iter().map(ProfileSummary::try_from).collect()
    }
}
