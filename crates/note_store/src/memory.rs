//! In-memory note store implementation.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use entities::{Note, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{NoteStore, NoteStoreError, NoteStoreResult};

/// In-memory store for tests and single-process runs.
///
/// Note ids come from an atomic sequence; the `BTreeMap` keeps listing in
/// id order, which equals creation order.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    notes: Arc<RwLock<BTreeMap<i64, Note>>>,
    next_note_id: AtomicI64,
}

impl MemoryNoteStore {
    /// Creates a new in-memory note store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            notes: Arc::new(RwLock::new(BTreeMap::new())),
            next_note_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn create_user(&self, user: User) -> NoteStoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(NoteStoreError::already_exists("User", user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> NoteStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> NoteStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_note(&self, content: &str) -> NoteStoreResult<Note> {
        let mut notes = self.notes.write().await;
        let id = self.next_note_id.fetch_add(1, Ordering::SeqCst);
        let note = Note::new(id, content);
        notes.insert(id, note.clone());
        Ok(note)
    }

    async fn get_note(&self, id: i64) -> NoteStoreResult<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.get(&id).cloned())
    }

    async fn list_notes(&self) -> NoteStoreResult<Vec<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.values().cloned().collect())
    }

    async fn update_note(&self, id: i64, content: &str) -> NoteStoreResult<Note> {
        let mut notes = self.notes.write().await;
        let note = notes
            .get_mut(&id)
            .ok_or_else(|| NoteStoreError::not_found("Note", id.to_string()))?;
        note.content = content.to_string();
        note.is_edited = true;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: i64) -> NoteStoreResult<()> {
        let mut notes = self.notes.write().await;
        if notes.remove(&id).is_none() {
            return Err(NoteStoreError::not_found("Note", id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryNoteStore::new();

        store
            .create_user(User::new("a@example.com"))
            .await
            .unwrap();
        let err = store
            .create_user(User::new("a@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_get_user_by_email_is_case_sensitive() {
        let store = MemoryNoteStore::new();
        store
            .create_user(User::new("a@example.com"))
            .await
            .unwrap();

        assert!(store
            .get_user_by_email("a@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get_user_by_email("A@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_note_ids_are_monotonic() {
        let store = MemoryNoteStore::new();

        let first = store.create_note("one").await.unwrap();
        let second = store.create_note("two").await.unwrap();
        let third = store.create_note("three").await.unwrap();

        assert!(first.id < second.id);
        assert!(second.id < third.id);
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let store = MemoryNoteStore::new();
        store.create_note("one").await.unwrap();
        store.create_note("two").await.unwrap();

        let notes = store.list_notes().await.unwrap();
        let contents: Vec<_> = notes.iter().map(|n| n.content.as_str()).collect();

        assert_eq!(contents, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let store = MemoryNoteStore::new();
        let note = store.create_note("draft").await.unwrap();

        let updated = store.update_note(note.id, "final").await.unwrap();

        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.content, "final");
        assert!(updated.is_edited);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryNoteStore::new();

        let err = store.update_note(42, "x").await.unwrap_err();

        assert!(matches!(err, NoteStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_reported_for_unknown_id() {
        let store = MemoryNoteStore::new();
        let note = store.create_note("gone").await.unwrap();

        store.delete_note(note.id).await.unwrap();
        let err = store.delete_note(note.id).await.unwrap_err();

        assert!(matches!(err, NoteStoreError::NotFound { .. }));
    }
}
