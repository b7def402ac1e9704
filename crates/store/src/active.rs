//! Active entity selection
//!
//! Holds the single entity currently open for editing. Presentation code
//! sets it; edit sessions read it at save time and refresh it after a
//! successful save.

use crate::entity::Entity;
use parking_lot::RwLock;

/// Provider of the "currently selected" entity
pub trait EntityStore: Send + Sync {
    /// Get a copy of the active entity
    fn get_active(&self) -> Option<Entity>;

    /// Set or clear the active entity
    fn set_active(&self, entity: Option<Entity>);

    /// Replace the active entity with a newer version of itself
    ///
    /// Returns false (and changes nothing) when the active entity is absent
    /// or has a different ID.
    fn replace(&self, entity: Entity) -> bool;
}

/// In-memory active entity store
#[derive(Default)]
pub struct ActiveEntityStore {
    active: RwLock<Option<Entity>>,
}

impl ActiveEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with an entity already selected
    pub fn with_active(entity: Entity) -> Self {
        Self {
            active: RwLock::new(Some(entity)),
        }
    }
}

impl EntityStore for ActiveEntityStore {
    fn get_active(&self) -> Option<Entity> {
        self.active.read().clone()
    }

    fn set_active(&self, entity: Option<Entity>) {
        *self.active.write() = entity;
    }

    fn replace(&self, entity: Entity) -> bool {
        let mut active = self.active.write();
        match active.as_ref() {
            Some(current) if current.id == entity.id => {
                *active = Some(entity);
                true
            }
            _ => false,
        }
    }
}
