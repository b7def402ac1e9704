//! Sled-backed persistence sink

use crate::entity::{Entity, EntityId};
use crate::sink::{AuthContext, PersistenceSink, SinkError};
use crate::Result;
use async_trait::async_trait;
use chrono::Utc;
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

const ENTITIES_TREE: &str = "entities";

/// Entity documents stored as JSON in a sled tree keyed by ID
///
/// `save` only updates existing entities; new ones go through `insert`.
/// `created_at` is owned by the store and survives every save, while
/// `updated_at` is stamped on write.
pub struct SledSink {
    /// Sled database
    db: Db,
    /// id -> JSON document
    entities: Tree,
}

impl SledSink {
    /// Open or create a sink at the given directory
    pub fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path.join("entities.db"))?;
        let entities = db.open_tree(ENTITIES_TREE)?;
        Ok(Self { db, entities })
    }

    /// Insert or overwrite an entity as-is
    pub fn insert(&self, entity: &Entity) -> Result<()> {
        let value = serde_json::to_vec(entity)?;
        self.entities.insert(entity.id.as_str(), value)?;
        self.db.flush()?;
        Ok(())
    }

    /// Get an entity by ID
    pub fn get(&self, id: &EntityId) -> Result<Option<Entity>> {
        match self.entities.get(id.as_str())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All entities, most recently updated first
    pub fn list(&self) -> Result<Vec<Entity>> {
        let mut entities = Vec::with_capacity(self.entities.len());
        for item in self.entities.iter() {
            let (_, value) = item?;
            entities.push(serde_json::from_slice::<Entity>(&value)?);
        }
        entities.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        Ok(entities)
    }

    /// Number of stored entities
    pub fn count(&self) -> usize {
        self.entities.len()
    }
}

#[async_trait]
impl PersistenceSink for SledSink {
    async fn save(&self, entity: Entity, auth: &AuthContext, id: &EntityId) -> Result<Entity> {
        if entity.id != *id {
            return Err(SinkError::Rejected(format!(
                "entity {} cannot be saved under id {}",
                entity.id, id
            )));
        }

        let existing = self
            .get(id)?
            .ok_or_else(|| SinkError::NotFound(id.clone()))?;

        let stored = Entity {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..entity
        };

        let value = serde_json::to_vec(&stored)?;
        self.entities.insert(id.as_str(), value)?;
        self.db.flush_async().await?;

        debug!(id = %id, user = auth.principal(), "Entity persisted");
        Ok(stored)
    }
}
