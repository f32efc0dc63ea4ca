//! Single-writer edit coordination over the visible note list.

use std::future::Future;
use std::time::Duration;

use entities::{Note, UpdateOutcome};

use crate::{ClientError, ClientResult, NotesApi};

/// Default time to wait for any single server call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Edit mode of the note list.
///
/// The sum type is the invariant: holding the draft inside `Editing`
/// makes "two notes editing at once" and "a draft with no note being
/// edited" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// No note is being edited.
    Viewing,
    /// One note is being edited, with its draft buffer.
    Editing {
        /// Id of the note being edited.
        id: i64,
        /// Draft text, seeded from the note's content.
        draft: String,
    },
}

/// Coordinates the note list, the composer, and the edit state machine.
///
/// Cooperatively single-threaded: transitions take `&mut self`, so one
/// gesture is in flight at a time. Reads of the list stay available while
/// a mutation awaits the server.
#[derive(Debug)]
pub struct EditCoordinator<A: NotesApi> {
    api: A,
    notes: Vec<Note>,
    composer: String,
    edit: EditState,
    request_timeout: Duration,
}

impl<A: NotesApi> EditCoordinator<A> {
    /// Creates a coordinator with an empty list.
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
            composer: String::new(),
            edit: EditState::Viewing,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The notes in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The composer buffer.
    pub fn composer(&self) -> &str {
        &self.composer
    }

    /// The current edit state.
    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Id of the note being edited, if any.
    pub fn editing_id(&self) -> Option<i64> {
        match &self.edit {
            EditState::Editing { id, .. } => Some(*id),
            EditState::Viewing => None,
        }
    }

    /// Replaces the list with the server's.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.notes = self.call(self.api.list()).await?;
        Ok(())
    }

    /// Replaces the composer buffer.
    pub fn set_composer(&mut self, text: impl Into<String>) {
        self.composer = text.into();
    }

    /// Submits the composer.
    ///
    /// Empty or whitespace-only submissions are no-ops. On server ack the
    /// returned note is appended to the list and the composer clears.
    pub async fn submit_composer(&mut self) -> ClientResult<Option<Note>> {
        let content = self.composer.trim().to_string();
        if content.is_empty() {
            return Ok(None);
        }

        let note = self.call(self.api.create(&content)).await?;
        self.notes.push(note.clone());
        self.composer.clear();
        Ok(Some(note))
    }

    /// Begins editing a note, seeding the draft with its content.
    ///
    /// If another note is already being edited its draft is committed
    /// first, so at no point are two notes in editing mode and no draft is
    /// silently dropped.
    pub async fn begin_edit(&mut self, id: i64) -> ClientResult<()> {
        if self.editing_id() == Some(id) {
            return Ok(());
        }
        if self.editing_id().is_some() {
            self.commit_edit().await?;
        }

        let note = self
            .notes
            .iter()
            .find(|n| n.id == id)
            .ok_or(ClientError::UnknownNote(id))?;
        self.edit = EditState::Editing {
            id,
            draft: note.content.clone(),
        };
        Ok(())
    }

    /// Replaces the draft buffer. Ignored while nothing is being edited
    /// (the gesture raced with a commit).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let EditState::Editing { draft, .. } = &mut self.edit {
            *draft = text.into();
        }
    }

    /// Commits the draft: explicit commit gesture or a click outside the
    /// editing region.
    ///
    /// A non-empty draft updates the note and the list entry is replaced
    /// with the *server's* note, picking up its edited flag. An empty
    /// draft deletes the note. On failure the machine stays in `Editing`
    /// with the draft intact.
    pub async fn commit_edit(&mut self) -> ClientResult<()> {
        let (id, draft) = match &self.edit {
            EditState::Editing { id, draft } => (*id, draft.clone()),
            EditState::Viewing => return Ok(()),
        };

        let outcome = self.call(self.api.update(id, draft.trim())).await?;
        match outcome {
            UpdateOutcome::Updated(note) => {
                if let Some(entry) = self.notes.iter_mut().find(|n| n.id == id) {
                    *entry = note;
                }
            }
            UpdateOutcome::Deleted => {
                self.notes.retain(|n| n.id != id);
            }
        }
        self.edit = EditState::Viewing;
        Ok(())
    }

    /// Deletes a note; the entry is removed only after server ack.
    ///
    /// On failure the list is left unchanged and the error is surfaced.
    pub async fn delete(&mut self, id: i64) -> ClientResult<()> {
        self.call(self.api.delete(id)).await?;
        self.notes.retain(|n| n.id != id);
        if self.editing_id() == Some(id) {
            self.edit = EditState::Viewing;
        }
        Ok(())
    }

    /// Runs a server call under the configured timeout.
    async fn call<T, F>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Server call timed out");
                Err(ClientError::Timeout)
            }
        }
    }
}
