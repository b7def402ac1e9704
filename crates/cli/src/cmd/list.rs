//! List stored entities

use crate::util;
use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(store_dir: &Path) -> Result<()> {
    let sink = util::open_sink(store_dir)?;
    let entities = sink.list()?;

    if entities.is_empty() {
        println!("{}", "No entities yet. Create one with 'lull new --title ...'".dimmed());
        return Ok(());
    }

    let now = Utc::now();
    for entity in &entities {
        let title = if entity.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            entity.title.bold().to_string()
        };
        println!(
            "{}  {}  {}",
            entity.id.to_string().cyan(),
            title,
            format!(
                "created {}, edited {}",
                util::format_date(entity.created_at),
                util::format_relative_time(entity.updated_at, now)
            )
            .dimmed()
        );
    }

    println!("\n{} entities", entities.len());
    Ok(())
}
