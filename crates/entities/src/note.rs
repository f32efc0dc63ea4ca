//! Note entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note.
///
/// Ids are assigned by the store in strictly increasing order, so the
/// store's natural listing order is creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, monotonically assigned by the store.
    pub id: i64,
    /// Note text. Non-empty at creation.
    pub content: String,
    /// Set to true on the first update and never reverted.
    pub is_edited: bool,
    /// When this record was created. Immutable across updates.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new unedited note.
    pub fn new(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            is_edited: false,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a note update.
///
/// Committing empty content has delete semantics, so an update either
/// replaces the note or removes it. The variant makes that policy explicit
/// instead of leaving callers to interpret an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The note was rewritten; carries the stored note.
    Updated(Note),
    /// Empty content committed; the note was deleted.
    Deleted,
}

impl UpdateOutcome {
    /// Returns the updated note, if any.
    pub fn note(&self) -> Option<&Note> {
        match self {
            Self::Updated(note) => Some(note),
            Self::Deleted => None,
        }
    }

    /// Returns true if the update deleted the note.
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation() {
        let note = Note::new(1, "hello");

        assert_eq!(note.id, 1);
        assert_eq!(note.content, "hello");
        assert!(!note.is_edited);
    }

    #[test]
    fn test_note_wire_format() {
        let note = Note::new(3, "hello");

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["isEdited"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("is_edited").is_none());
    }

    #[test]
    fn test_update_outcome() {
        let note = Note::new(1, "hello");
        let updated = UpdateOutcome::Updated(note.clone());

        assert_eq!(updated.note(), Some(&note));
        assert!(!updated.is_deleted());
        assert!(UpdateOutcome::Deleted.is_deleted());
        assert!(UpdateOutcome::Deleted.note().is_none());
    }
}
