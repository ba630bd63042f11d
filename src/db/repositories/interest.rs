use anyhow::{Context, Result};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use std::collections::HashSet;

use crate::entities::interest;
use crate::models::interest::Interest;

pub struct InterestRepository {
    conn: DatabaseConnection,
}

impl InterestRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert every value that is not in the catalog yet. Existing values
    /// keep their ids.
    pub async fn upsert_all(&self, values: &[String]) -> Result<()> {
        let txn = self.conn.begin().await?;
        upsert_values(&txn, values).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn find_by_values(&self, values: &[String]) -> Result<Vec<Interest>> {
        find_by_values(&self.conn, values).await
    }

    pub async fn list_all(&self) -> Result<Vec<Interest>> {
        let rows = interest::Entity::find()
            .order_by_asc(interest::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list interests")?;

        Ok(rows.into_iter().map(Interest::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(interest::Entity::find().count(&self.conn).await?)
    }
}

pub(crate) async fn upsert_values<C: ConnectionTrait>(db: &C, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let mut seen = HashSet::new();
    let models = values
        .iter()
        .filter(|value| seen.insert(value.as_str()))
        .map(|value| interest::ActiveModel {
            id: NotSet,
            value: Set(value.clone()),
        });

    interest::Entity::insert_many(models)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(interest::Column::Value)
                .update_column(interest::Column::Value)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .context("Failed to upsert interests")?;

    Ok(())
}

pub(crate) async fn find_by_values<C: ConnectionTrait>(
    db: &C,
    values: &[String],
) -> Result<Vec<Interest>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let rows = interest::Entity::find()
        .filter(interest::Column::Value.is_in(values.iter().cloned()))
        .all(db)
        .await
        .context("Failed to query interests by value")?;

    Ok(rows.into_iter().map(Interest::from).collect())
}
