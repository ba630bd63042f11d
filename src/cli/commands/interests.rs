//! Interest catalog listing

use crate::config::Config;

use super::open_store;
use super::output::print_json;

pub async fn cmd_list_interests(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let interests = store.list_interests().await?;

    if json {
        return print_json(&interests);
    }

    if interests.is_empty() {
        println!("The interest catalog is empty.");
        println!();
        println!("Seed it with: socnet users generate");
        return Ok(());
    }

    println!("Interests ({} total)", interests.len());
    println!("{:-<70}", "");
    for interest in &interests {
        println!("{:>4}  {}", interest.id, interest.value);
    }
    Ok(())
}
