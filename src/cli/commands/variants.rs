//! Index variant maintenance command handler

use crate::config::Config;
use crate::db::SchemaVariant;

use super::open_store;
use super::output::print_json;

pub async fn cmd_variants_sync(
    config: &Config,
    json: bool,
    variant: Option<SchemaVariant>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let targets: Vec<SchemaVariant> = match variant {
        Some(SchemaVariant::Plain) => anyhow::bail!("Pick composite or separate"),
        Some(v) => vec![v],
        None => SchemaVariant::ALL
            .into_iter()
            .filter(|v| *v != SchemaVariant::Plain)
            .collect(),
    };

    let mut reports = Vec::with_capacity(targets.len());
    for target in targets {
        reports.push(store.sync_variant(target).await?);
    }

    if json {
        return print_json(&reports);
    }

    for report in &reports {
        println!("✓ Synced {} variant", report.variant);
        for (table, rows) in &report.tables {
            println!("  {table}: {rows} rows");
        }
    }
    Ok(())
}
