//! Configuration management command
//!
//! View and edit the store-local `lull.toml`.

use crate::config::{self, Config};
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

/// List all configuration values
pub async fn run_list(store_dir: &Path) -> Result<()> {
    let config = config::read(store_dir)?;
    let config_path = config::config_file_path(store_dir);

    println!("{}", "Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[sync]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.sync.debounce_ms,
        format!("({:?})", config.sync.debounce()).dimmed()
    );

    println!("\n{}", "[log]".yellow());
    println!("  {} = {}", "level".cyan(), config.log.level);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: 10-60,000");
    println!("  level: trace|debug|info|warn|error");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(store_dir: &Path, key: &str) -> Result<()> {
    let config = config::read(store_dir)?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(store_dir: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = config::read(store_dir)?;
    config.set(key, value)?;
    config::save(store_dir, &config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path
pub async fn run_path(store_dir: &Path) -> Result<()> {
    let config_path = config::config_file_path(store_dir);
    println!("{}", config_path.display());
    if !config_path.exists() {
        println!(
            "{}",
            "File does not exist; defaults are in effect. Use --set to create it.".yellow()
        );
    }
    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Default action when no flag is given
pub async fn run_default(store_dir: &Path) -> Result<()> {
    if config::config_file_path(store_dir).exists() {
        run_list(store_dir).await
    } else {
        let defaults = Config::default();
        println!("{}", "No config file; using defaults:".dimmed());
        print!("{}", toml::to_string_pretty(&defaults)?);
        Ok(())
    }
}
