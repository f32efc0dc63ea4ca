//! The server interface the coordinator drives.

use async_trait::async_trait;
use entities::{Note, UpdateOutcome};

use crate::ClientResult;

/// Note operations as seen from the client.
///
/// Implementations wrap whatever transport reaches the server; the
/// coordinator only depends on these four calls.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetches all notes in display order.
    async fn list(&self) -> ClientResult<Vec<Note>>;

    /// Creates a note from non-empty content.
    async fn create(&self, content: &str) -> ClientResult<Note>;

    /// Commits content to an existing note.
    ///
    /// Empty content takes the delete path and yields
    /// [`UpdateOutcome::Deleted`].
    async fn update(&self, id: i64, content: &str) -> ClientResult<UpdateOutcome>;

    /// Deletes a note.
    async fn delete(&self, id: i64) -> ClientResult<()>;
}
