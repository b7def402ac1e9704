//! Debounced edit synchronization for Lull
//!
//! This crate provides:
//! - The edit buffer holding unsaved title/description text
//! - A single-slot debouncer (quiescence timer)
//! - `EditSession`, which coalesces bursts of edits into one sink write
//! - Sync configuration (debounce window)

pub mod buffer;
pub mod config;
pub mod debounce;
pub mod session;

// Re-exports
pub use buffer::{EditBuffer, EditFields, Field, UnknownField};
pub use config::{ConfigError, SyncConfig, DEFAULT_DEBOUNCE_MS};
pub use debounce::Debouncer;
pub use session::{EditSession, SkipReason, SyncEvent};
