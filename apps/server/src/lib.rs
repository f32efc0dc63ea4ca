//! Quick Notes server
//!
//! HTTP surface over the identity/session subsystem and the note service:
//! signup and login (password or provider profile), session token
//! issuance, and note CRUD behind bearer authentication.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use std::sync::Arc;

use auth::{SessionConfig, SessionIssuer};
use axum::Router;
use note_store::NoteStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: NoteStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: NoteStore>(config: Config, store: S) -> Arc<AppState<S>> {
    let session_config =
        SessionConfig::new(&config.session_secret).with_ttl_hours(config.session_ttl_hours);
    let sessions = SessionIssuer::new(session_config);

    create_shared_state(config, store, sessions)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
