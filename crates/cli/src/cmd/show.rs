//! Print one entity as JSON

use crate::util;
use anyhow::{Context, Result};
use std::path::Path;

pub async fn run(store_dir: &Path, id: &str) -> Result<()> {
    let sink = util::open_sink(store_dir)?;
    let entity = util::load_entity(&sink, id)?;

    let json = serde_json::to_string_pretty(&entity).context("Failed to serialize entity")?;
    println!("{}", json);
    Ok(())
}
