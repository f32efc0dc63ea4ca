//! Note CRUD endpoints.

use std::sync::Arc;

use auth::Identity;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use entities::{Note, UpdateOutcome};
use note_store::NoteStore;
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;
use crate::services::notes::NoteService;
use crate::state::AppState;

/// Request body for creating or updating a note.
#[derive(Debug, Deserialize)]
pub struct NoteContentRequest {
    pub content: String,
}

/// Response body for an update: the new note, or a deletion marker when
/// empty content took the delete path.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpdateNoteResponse {
    Updated(Note),
    Deleted { deleted: bool },
}

/// Response body for a deletion.
#[derive(Debug, Serialize)]
pub struct DeleteNoteResponse {
    pub success: bool,
}

/// Lists all notes in creation order.
pub async fn list_notes<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Note>>> {
    let notes = NoteService::new(&state.store).list().await?;
    Ok(Json(notes))
}

/// Creates a note.
pub async fn create_note<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<NoteContentRequest>,
) -> ServerResult<Json<Note>> {
    let note = NoteService::new(&state.store)
        .create(&request.content)
        .await?;

    tracing::info!(user_id = %identity.user_id, note_id = note.id, "Note created");

    Ok(Json(note))
}

/// Updates a note, or deletes it when the submitted content is empty.
pub async fn update_note<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
    Json(request): Json<NoteContentRequest>,
) -> ServerResult<Json<UpdateNoteResponse>> {
    let outcome = NoteService::new(&state.store)
        .update(id, &request.content)
        .await?;

    let response = match outcome {
        UpdateOutcome::Updated(note) => {
            tracing::info!(user_id = %identity.user_id, note_id = id, "Note updated");
            UpdateNoteResponse::Updated(note)
        }
        UpdateOutcome::Deleted => {
            tracing::info!(user_id = %identity.user_id, note_id = id, "Note deleted via empty update");
            UpdateNoteResponse::Deleted { deleted: true }
        }
    };

    Ok(Json(response))
}

/// Deletes a note.
pub async fn delete_note<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> ServerResult<Json<DeleteNoteResponse>> {
    NoteService::new(&state.store).delete(id).await?;

    tracing::info!(user_id = %identity.user_id, note_id = id, "Note deleted");

    Ok(Json(DeleteNoteResponse { success: true }))
}
