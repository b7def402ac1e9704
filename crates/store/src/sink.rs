//! Persistence sink contract

use crate::entity::{Entity, EntityId};
use async_trait::async_trait;
use thiserror::Error;

/// Caller identity forwarded to the sink with every save
///
/// Opaque to the editor; sinks decide what (if anything) to check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

impl AuthContext {
    /// No user attached
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: None,
        }
    }

    /// Name used in log lines
    pub fn principal(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }
}

/// Errors returned by a persistence sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    #[error("save rejected: {0}")]
    Rejected(String),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable write path for edited entities
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    /// Persist `entity` under `id`, returning the stored version
    async fn save(
        &self,
        entity: Entity,
        auth: &AuthContext,
        id: &EntityId,
    ) -> Result<Entity, SinkError>;
}

