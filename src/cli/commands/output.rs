//! Shared printing for command results

use serde::Serialize;

use crate::models::profile::ProfileSummary;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_summaries(title: &str, rows: &[ProfileSummary]) {
    println!("{title} ({} total)", rows.len());
    println!("{:-<70}", "");

    if rows.is_empty() {
        println!("  (none)");
        return;
    }

    for row in rows {
        println!("• {} {} (@{})", row.name, row.surname, row.username);
        println!(
            "  ID: {} | Age: {} | Gender: {} | City: {}",
            row.user_id, row.age, row.gender, row.city
        );
    }
}
