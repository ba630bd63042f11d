use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, TransactionTrait};
use serde::Serialize;
use tracing::info;

use crate::db::variant::{BASE_TABLES, SchemaVariant};

/// Rows copied per table by one sync.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub variant: SchemaVariant,
    pub tables: Vec<(String, u64)>,
}

impl SyncReport {
    #[must_use]
    pub fn rows(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, rows)| *rows)
    }
}

fn columns(table: &str) -> Option<&'static str> {
    match table {
        "user_settings" => Some("id, username, password"),
        "interest" => Some("id, value"),
        "user_info" => Some("user_id, name, surname, age, gender, city"),
        "user_has_interest" => Some("id, interest_id, user_id"),
        "friends" => Some("id, user_id, friend_user_id"),
        _ => None,
    }
}

pub struct VariantRepository {
    conn: DatabaseConnection,
}

impl VariantRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Replace the contents of the variant tables with a copy of the base
    /// tables. Children are cleared first and parents filled first.
    pub async fn sync(&self, variant: SchemaVariant) -> Result<SyncReport> {
        if variant == SchemaVariant::Plain {
            anyhow::bail!("The plain variant is the source of every sync");
        }

        let backend = self.conn.get_database_backend();
        let txn = self.conn.begin().await?;

        for base in BASE_TABLES.iter().rev() {
            let target = variant.table(base);
            txn.execute(Statement::from_string(backend, format!("DELETE FROM {target}")))
                .await
                .with_context(|| format!("Failed to clear {target}"))?;
        }

        let mut tables = Vec::with_capacity(BASE_TABLES.len());
        for base in BASE_TABLES {
            let cols = columns(base).context("Unknown base table")?;
            let target = variant.table(base);
            let result = txn
                .execute(Statement::from_string(
                    backend,
                    format!("INSERT INTO {target} ({cols}) SELECT {cols} FROM {base}"),
                ))
                .await
                .with_context(|| format!("Failed to copy {base} into {target}"))?;
            tables.push((target, result.rows_affected()));
        }

        txn.commit().await?;

        info!(%variant, ?tables, "Variant tables synced");
        Ok(SyncReport { variant, tables })
    }
}
