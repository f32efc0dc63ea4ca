//! API endpoints.

pub mod auth;
pub mod notes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use note_store::NoteStore;

use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: NoteStore + 'static>(state: Arc<AppState<S>>) -> Router {
    // Everything touching notes or the current user requires a session.
    let protected = Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:id",
            put(notes::update_note).delete(notes::delete_note),
        )
        .route("/auth/me", get(auth::get_current_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    Router::new()
        .merge(protected)
        // Signup and login endpoints
        .route("/signup", post(auth::signup))
        .route("/auth", post(auth::login))
        .route("/auth/login-url", get(auth::get_login_url))
        .route(
            "/auth/callback",
            get(auth::provider_callback_query).post(auth::provider_callback_json),
        )
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
