//! Create an entity

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;
use store::Entity;

pub async fn run(store_dir: &Path, title: &str, description: &str) -> Result<()> {
    let sink = util::open_sink(store_dir)?;

    let entity = Entity::new(title, description);
    sink.insert(&entity).context("Failed to store new entity")?;

    println!("{} {}", "Created".green(), entity.id.to_string().cyan());
    Ok(())
}
