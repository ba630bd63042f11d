use anyhow::{Context, Result};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::OnConflict,
};
use std::collections::{HashMap, HashSet};

use crate::domain::UserId;
use crate::entities::{interest, user_has_interest, user_info};
use crate::models::profile::{Profile, ProfileInput};

use super::interest::{find_by_values, upsert_values};

pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, user_id: UserId) -> Result<Option<Profile>> {
        let row = user_info::Entity::find_by_id(user_id.value())
            .one(&self.conn)
            .await
            .context("Failed to query profile")?;

        row.map(Profile::try_from).transpose()
    }

    /// Interest values attached to the account, in edge insertion order.
    /// Duplicate edges yield duplicate values.
    pub async fn interests(&self, user_id: UserId) -> Result<Vec<String>> {
        let rows = user_has_interest::Entity::find()
            .filter(user_has_interest::Column::UserId.eq(user_id.value()))
            .order_by_asc(user_has_interest::Column::Id)
            .find_also_related(interest::Entity)
            .all(&self.conn)
            .await
            .context("Failed to query user interests")?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, interest)| interest.map(|i| i.value))
            .collect())
    }

    /// Overwrite the profile row and replace the whole interest edge-set.
    pub async fn replace(&self, user_id: UserId, input: &ProfileInput) -> Result<()> {
        let txn = self.conn.begin().await?;

        let info = user_info::ActiveModel {
            user_id: Set(user_id.value()),
            name: Set(input.name.clone()),
            surname: Set(input.surname.clone()),
            age: Set(input.age),
            gender: Set(input.gender.as_str().to_string()),
            city: Set(input.city.clone()),
        };
        user_info::Entity::insert(info)
            .on_conflict(
                OnConflict::column(user_info::Column::UserId)
                    .update_columns([
                        user_info::Column::Name,
                        user_info::Column::Surname,
                        user_info::Column::Age,
                        user_info::Column::Gender,
                        user_info::Column::City,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .context("Failed to write profile")?;

        upsert_values(&txn, &input.interests).await?;
        let ids: HashMap<String, i32> = find_by_values(&txn, &input.interests)
            .await?
            .into_iter()
            .map(|i| (i.value, i.id))
            .collect();

        user_has_interest::Entity::delete_many()
            .filter(user_has_interest::Column::UserId.eq(user_id.value()))
            .exec(&txn)
            .await
            .context("Failed to clear interest edges")?;

        let mut seen = HashSet::new();
        let edges: Vec<_> = input
            .interests
            .iter()
            .filter(|value| seen.insert(value.as_str()))
            .filter_map(|value| ids.get(value))
            .map(|&interest_id| user_has_interest::ActiveModel {
                id: NotSet,
                interest_id: Set(interest_id),
                user_id: Set(user_id.value()),
            })
            .collect();

        if !edges.is_empty() {
            user_has_interest::Entity::insert_many(edges)
                .exec_without_returning(&txn)
                .await
                .context("Failed to insert interest edges")?;
        }

        txn.commit().await?;
        Ok(())
    }
}
