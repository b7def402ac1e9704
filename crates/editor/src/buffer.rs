//! Edit buffer for the active entity

use std::fmt;
use std::str::FromStr;
use store::{Entity, EntityId};
use thiserror::Error;

/// Editable entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field: {0} (expected title or description)")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(Field::Title),
            "description" => Ok(Field::Description),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Snapshot of the editable fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFields {
    pub title: String,
    pub description: String,
}

/// In-progress copy of the active entity's editable fields
///
/// `active_id` is `Some` exactly while an entity is selected. The fields are
/// the user's view of that entity and may be ahead of what is stored.
#[derive(Debug, Default)]
pub struct EditBuffer {
    active_id: Option<EntityId>,
    fields: EditFields,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `entity`, discarding any unsaved edits
    pub fn select(&mut self, entity: &Entity) {
        self.active_id = Some(entity.id.clone());
        self.fields = EditFields {
            title: entity.title.clone(),
            description: entity.description.clone(),
        };
    }

    /// Overwrite one field; any text is accepted
    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.fields.title = value,
            Field::Description => self.fields.description = value,
        }
    }

    /// Drop the selection and reset both fields to empty
    pub fn clear(&mut self) {
        self.active_id = None;
        self.fields = EditFields::default();
    }

    pub fn snapshot(&self) -> EditFields {
        self.fields.clone()
    }

    pub fn active_id(&self) -> Option<&EntityId> {
        self.active_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, title: &str, description: &str) -> Entity {
        Entity::with_id(EntityId::new(id), title, description)
    }

    #[test]
    fn test_select_seeds_fields() {
        let mut buffer = EditBuffer::new();
        buffer.select(&entity("42", "Old", "D"));

        assert_eq!(buffer.active_id(), Some(&EntityId::new("42")));
        assert_eq!(
            buffer.snapshot(),
            EditFields {
                title: "Old".to_string(),
                description: "D".to_string(),
            }
        );
    }

    #[test]
    fn test_reselect_discards_edits() {
        let e = entity("42", "Old", "D");
        let mut buffer = EditBuffer::new();
        buffer.select(&e);
        let first = buffer.snapshot();

        buffer.set_field(Field::Title, "unsaved".to_string());
        buffer.select(&e);

        assert_eq!(buffer.snapshot(), first);
    }

    #[test]
    fn test_set_field_accepts_empty_text() {
        let mut buffer = EditBuffer::new();
        buffer.select(&entity("1", "T", "D"));

        buffer.set_field(Field::Title, String::new());
        buffer.set_field(Field::Description, "new body".to_string());

        let snap = buffer.snapshot();
        assert_eq!(snap.title, "");
        assert_eq!(snap.description, "new body");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut buffer = EditBuffer::new();
        buffer.select(&entity("1", "T", "D"));
        buffer.clear();

        assert!(buffer.active_id().is_none());
        assert_eq!(buffer.snapshot(), EditFields::default());
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("title".parse::<Field>(), Ok(Field::Title));
        assert_eq!(" description ".parse::<Field>(), Ok(Field::Description));
        assert_eq!(
            "body".parse::<Field>(),
            Err(UnknownField("body".to_string()))
        );
    }
}
