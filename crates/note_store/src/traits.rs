//! Note store trait definitions.

use async_trait::async_trait;
use entities::{Note, User};
use uuid::Uuid;

use crate::NoteStoreResult;

/// Trait for user and note storage operations.
#[async_trait]
pub trait NoteStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user.
    ///
    /// Fails with `AlreadyExists` if another user holds the same email.
    /// This is the single safeguard against two concurrent logins
    /// provisioning the same unseen email twice.
    async fn create_user(&self, user: User) -> NoteStoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> NoteStoreResult<Option<User>>;

    /// Gets a user by email (case-sensitive, as stored).
    async fn get_user_by_email(&self, email: &str) -> NoteStoreResult<Option<User>>;

    // =========================================================================
    // Note operations
    // =========================================================================

    /// Creates a new note with a store-assigned id and creation timestamp.
    async fn create_note(&self, content: &str) -> NoteStoreResult<Note>;

    /// Gets a note by ID.
    async fn get_note(&self, id: i64) -> NoteStoreResult<Option<Note>>;

    /// Lists all notes in creation order.
    async fn list_notes(&self) -> NoteStoreResult<Vec<Note>>;

    /// Replaces a note's content and marks it edited.
    ///
    /// `created_at` is preserved; `is_edited` becomes true and never
    /// reverts. Fails with `NotFound` for unknown ids.
    async fn update_note(&self, id: i64, content: &str) -> NoteStoreResult<Note>;

    /// Deletes a note. Fails with `NotFound` for unknown ids.
    async fn delete_note(&self, id: i64) -> NoteStoreResult<()>;
}
