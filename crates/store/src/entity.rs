//! Entity data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use ulid::Ulid;

/// Stable identifier of an entity
///
/// Opaque text assigned by the backing store. Never changes for the
/// lifetime of the entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier (ULID text)
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An editable record mirrored by an edit session
///
/// Only `title` and `description` are ever changed by the editor. Everything
/// else, including fields this crate does not know about (kept in `extra`),
/// passes through saves untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Serialized as `_id` to match the backing store's document shape
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    /// Missing titles deserialize as empty text
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Fields owned by other parts of the system
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// Create a new entity with a generated ID
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(EntityId::generate(), title, description)
    }

    /// Create a new entity with a caller-provided ID
    pub fn with_id(
        id: EntityId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    /// Copy of this entity with the editable fields replaced
    pub fn with_fields(&self, title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fields_preserves_identity_and_extras() {
        let mut entity = Entity::with_id(EntityId::new("42"), "Old", "D");
        entity
            .extra
            .insert("status".to_string(), Value::String("inbox".to_string()));

        let merged = entity.with_fields("Old2", "D");

        assert_eq!(merged.id, entity.id);
        assert_eq!(merged.title, "Old2");
        assert_eq!(merged.description, "D");
        assert_eq!(merged.created_at, entity.created_at);
        assert_eq!(merged.updated_at, entity.updated_at);
        assert_eq!(merged.extra, entity.extra);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let json = r#"{
            "_id": "abc",
            "createdAt": "2024-01-03T14:30:00Z",
            "updatedAt": "2024-01-03T14:30:00Z",
            "cycle": 7
        }"#;

        let entity: Entity = serde_json::from_str(json).unwrap();

        assert_eq!(entity.id.as_str(), "abc");
        assert_eq!(entity.title, "");
        assert_eq!(entity.description, "");
        assert_eq!(entity.extra.get("cycle"), Some(&Value::from(7)));
    }

    #[test]
    fn test_serialized_shape_keeps_unknown_fields() {
        let mut entity = Entity::with_id(EntityId::new("42"), "T", "D");
        entity.extra.insert("owner".to_string(), Value::from("u1"));

        let value = serde_json::to_value(&entity).unwrap();

        assert_eq!(value["_id"], "42");
        assert_eq!(value["title"], "T");
        assert_eq!(value["owner"], "u1");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }
}
