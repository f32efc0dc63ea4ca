//! Note list model and edit coordination for Quick Notes clients.
//!
//! The [`EditCoordinator`] owns the visible note list, the composer
//! buffer, and the single-writer edit state: at most one note is in
//! editing mode at any time, enforced by construction. It is generic over
//! a [`NotesApi`] so the same machine drives an HTTP client or an
//! in-process service.
//!
//! List mutations are applied strictly after server acknowledgment; there
//! is no speculative local apply with rollback.

mod api;
mod coordinator;
mod error;

pub use api::*;
pub use coordinator::*;
pub use error::*;
