//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use store::{Entity, EntityId, SledSink};

/// Open the sled store, creating the directory if needed
pub fn open_sink(store_dir: &Path) -> Result<SledSink> {
    std::fs::create_dir_all(store_dir)
        .with_context(|| format!("Failed to create store directory {}", store_dir.display()))?;
    SledSink::open(store_dir)
        .with_context(|| format!("Failed to open store at {}", store_dir.display()))
}

/// Look up an entity or fail with a readable message
pub fn load_entity(sink: &SledSink, id: &str) -> Result<Entity> {
    sink.get(&EntityId::new(id))?
        .ok_or_else(|| anyhow::anyhow!("Entity not found: {}", id))
}

/// Format timestamp as relative time ("2 hours ago")
pub fn format_relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - ts).num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }

    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{} days ago", seconds / 86400)
    } else {
        format!("{} weeks ago", seconds / 604800)
    }
}

/// Format timestamp as absolute date ("2024-01-03")
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Undo the `\n` escaping used by edit scripts
pub fn unescape(value: &str) -> String {
    value.replace("\\n", "\n").replace("\\t", "\t")
}
