//! Store-local configuration file (`lull.toml`)

use anyhow::{Context, Result};
use editor::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

const CONFIG_FILE: &str = "lull.toml";

/// All settings read from `lull.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub log: LogConfig,
}

/// `[log]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.sync.validate()?;
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<Level> {
        Level::from_str(self.log.level.trim()).map_err(|_| {
            anyhow::anyhow!(
                "Invalid log.level '{}': expected trace|debug|info|warn|error",
                self.log.level
            )
        })
    }

    /// Read a value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "sync.debounce_ms" => self.sync.debounce_ms.to_string(),
            "log.level" => self.log.level.clone(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'lull config --list' to see available keys.",
                key
            ),
        };
        Ok(value)
    }

    /// Set a value by dotted key, validating the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sync.debounce_ms" => {
                self.sync.debounce_ms = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "log.level" => {
                self.log.level = value.trim().to_ascii_lowercase();
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'lull config --list' to see available keys.",
                key
            ),
        }

        self.validate().context("Invalid configuration value")
    }
}

pub fn config_file_path(store_dir: &Path) -> PathBuf {
    store_dir.join(CONFIG_FILE)
}

/// Load and validate config, falling back to defaults when the file does
/// not exist
pub fn load(store_dir: &Path) -> Result<Config> {
    let config = read(store_dir)?;
    config.validate().with_context(|| {
        format!(
            "Invalid configuration in {}",
            config_file_path(store_dir).display()
        )
    })?;
    Ok(config)
}

/// Parse config without range checks, so invalid values can still be
/// inspected and repaired
pub fn read(store_dir: &Path) -> Result<Config> {
    let path = config_file_path(store_dir);
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn save(store_dir: &Path, config: &Config) -> Result<()> {
    std::fs::create_dir_all(store_dir)
        .with_context(|| format!("Failed to create {}", store_dir.display()))?;
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    let path = config_file_path(store_dir);
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn example_config() -> &'static str {
    r#"# Lull configuration (<store>/lull.toml)

[sync]
# Quiet period after the last edit before it is saved (10-60000)
debounce_ms = 1000

[log]
# trace | debug | info | warn | error
level = "info"
"#
}
