//! Note service: CRUD plus the edit-flag and delete-on-empty policies.

use entities::{Note, UpdateOutcome};
use note_store::NoteStore;

use crate::error::{ServerError, ServerResult};

/// Business rules over the note store.
///
/// Content validation and the "committing empty content deletes the
/// note" policy live here, so the store stays a plain record container.
pub struct NoteService<'a, S: NoteStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: NoteStore + ?Sized> NoteService<'a, S> {
    /// Creates a service over the given store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Lists all notes in creation order.
    pub async fn list(&self) -> ServerResult<Vec<Note>> {
        Ok(self.store.list_notes().await?)
    }

    /// Creates a note.
    ///
    /// Empty or whitespace-only content is rejected before the store is
    /// touched.
    pub async fn create(&self, content: &str) -> ServerResult<Note> {
        if content.trim().is_empty() {
            return Err(ServerError::InvalidRequest(
                "note content must not be empty".to_string(),
            ));
        }
        Ok(self.store.create_note(content).await?)
    }

    /// Updates a note, or deletes it when the new content is empty.
    ///
    /// A successful update marks the note edited permanently and leaves
    /// its creation timestamp untouched.
    pub async fn update(&self, id: i64, content: &str) -> ServerResult<UpdateOutcome> {
        if content.trim().is_empty() {
            self.store.delete_note(id).await?;
            return Ok(UpdateOutcome::Deleted);
        }

        let note = self.store.update_note(id, content).await?;
        Ok(UpdateOutcome::Updated(note))
    }

    /// Deletes a note. Unknown ids are reported, not ignored.
    pub async fn delete(&self, id: i64) -> ServerResult<()> {
        Ok(self.store.delete_note(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use note_store::{MemoryNoteStore, NoteStoreError};

    use super::*;

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let store = MemoryNoteStore::new();
        let service = NoteService::new(&store);

        assert!(matches!(
            service.create("").await.unwrap_err(),
            ServerError::InvalidRequest(_)
        ));
        assert!(matches!(
            service.create("   ").await.unwrap_err(),
            ServerError::InvalidRequest(_)
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_unedited_note() {
        let store = MemoryNoteStore::new();
        let service = NoteService::new(&store);

        let note = service.create("hello").await.unwrap();

        assert_eq!(note.content, "hello");
        assert!(!note.is_edited);
    }

    #[tokio::test]
    async fn test_update_marks_edited_and_preserves_created_at() {
        let store = MemoryNoteStore::new();
        let service = NoteService::new(&store);
        let note = service.create("first").await.unwrap();

        let outcome = service.update(note.id, "second").await.unwrap();

        let updated = outcome.note().unwrap();
        assert!(updated.is_edited);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.content, "second");
    }

    #[tokio::test]
    async fn test_update_with_empty_content_deletes() {
        let store = MemoryNoteStore::new();
        let service = NoteService::new(&store);
        let note = service.create("doomed").await.unwrap();

        let outcome = service.update(note.id, "  ").await.unwrap();

        assert!(outcome.is_deleted());
        assert!(service
            .list()
            .await
            .unwrap()
            .iter()
            .all(|n| n.id != note.id));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryNoteStore::new();
        let service = NoteService::new(&store);

        let err = service.update(999, "x").await.unwrap_err();

        assert!(matches!(
            err,
            ServerError::Store(NoteStoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = MemoryNoteStore::new();
        let service = NoteService::new(&store);

        let err = service.delete(999).await.unwrap_err();

        assert!(matches!(
            err,
            ServerError::Store(NoteStoreError::NotFound { .. })
        ));
    }
}
