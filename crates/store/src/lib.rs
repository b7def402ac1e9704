//! Entity model and storage collaborators for Lull
//!
//! This crate provides:
//! - The `Entity` record edited by sessions
//! - The active-entity store (`EntityStore`)
//! - The persistence sink contract (`PersistenceSink`)
//! - A sled-backed sink for local persistence

pub mod active;
pub mod entity;
pub mod sink;
pub mod sled_sink;

// Re-exports
pub use active::{ActiveEntityStore, EntityStore};
pub use entity::{Entity, EntityId};
pub use sink::{AuthContext, PersistenceSink, SinkError};
pub use sled_sink::SledSink;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;
