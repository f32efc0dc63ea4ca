//! Client-side error types.

use thiserror::Error;

/// Errors surfaced to the user by the coordinator.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server did not answer within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The referenced note does not exist on the server.
    #[error("Note not found")]
    NotFound,

    /// The referenced note is not in the local list.
    #[error("Unknown note: {0}")]
    UnknownNote(i64),

    /// Any other server or transport failure.
    #[error("Request failed: {0}")]
    Api(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
