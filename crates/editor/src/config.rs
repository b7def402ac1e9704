//! Sync configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Quiescence window used when nothing is configured
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

const MIN_DEBOUNCE_MS: u64 = 10;
const MAX_DEBOUNCE_MS: u64 = 60_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Edit session settings (`[sync]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Milliseconds of silence after the last edit before saving
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SyncConfig {
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce_ms: u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.debounce_ms) {
            return Err(ConfigError::OutOfRange {
                key: "sync.debounce_ms",
                value: self.debounce_ms,
                min: MIN_DEBOUNCE_MS,
                max: MAX_DEBOUNCE_MS,
            });
        }
        Ok(())
    }
}
