//! Profile search command handler

use crate::config::Config;
use crate::db::SchemaVariant;
use crate::models::search::SearchCriteria;
use crate::services::{SeaOrmUserDirectory, UserDirectory, UserError};

use super::output::{print_json, print_summaries};
use super::{open_store, shared};

pub async fn cmd_search(
    config: &Config,
    json: bool,
    criteria: SearchCriteria,
    variant: SchemaVariant,
) -> anyhow::Result<()> {
    if criteria.is_empty() {
        tracing::info!("No search criteria given, listing every profile");
    }

    let store = open_store(config).await?;
    let users = SeaOrmUserDirectory::new(store, shared(config));

    let rows = match users.search(&criteria, variant).await {
        Ok(rows) => rows,
        Err(UserError::Validation(msg)) => anyhow::bail!("Invalid search: {msg}"),
        Err(e) => return Err(e.into()),
    };

    if json {
        return print_json(&rows);
    }

    print_summaries(&format!("Search results [{variant}]"), &rows);
    Ok(())
}
