//! Application state.

use std::sync::Arc;

use auth::SessionIssuer;
use note_store::NoteStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: NoteStore> {
    /// Server configuration.
    pub config: Config,
    /// User and note store.
    pub store: S,
    /// Session token issuer.
    pub sessions: SessionIssuer,
}

impl<S: NoteStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S, sessions: SessionIssuer) -> Self {
        Self {
            config,
            store,
            sessions,
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config, store, and session issuer.
pub fn create_shared_state<S: NoteStore>(
    config: Config,
    store: S,
    sessions: SessionIssuer,
) -> SharedState<S> {
    Arc::new(AppState::new(config, store, sessions))
}
