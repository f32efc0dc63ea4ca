//! Server error types.

use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use note_store::NoteStoreError;
use serde_json::json;

/// Machine-readable error codes carried in response bodies.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "invalid_request";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const AUTHENTICATION_REQUIRED: &str = "authentication_required";
    pub const RESOURCE_NOT_FOUND: &str = "resource_not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication required.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] NoteStoreError),

    /// Authentication error.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, msg.clone())
            }
            ServerError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                error_codes::AUTHENTICATION_REQUIRED,
                "Authentication required".to_string(),
            ),
            ServerError::Store(e) => match e {
                NoteStoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, e.to_string())
                }
                NoteStoreError::AlreadyExists { .. } => {
                    (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, e.to_string())
                }
                _ => {
                    tracing::error!(error = %e, "Store failure");
                    (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, e.to_string())
                }
            },
            ServerError::Auth(e) => match e {
                AuthError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
                }
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::INVALID_CREDENTIALS,
                    e.to_string(),
                ),
                AuthError::TokenExpired | AuthError::InvalidToken => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::AUTHENTICATION_REQUIRED,
                    e.to_string(),
                ),
                AuthError::Store(store_err) => {
                    tracing::error!(error = %store_err, "Store failure during authentication");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        error_codes::INTERNAL_ERROR,
                        store_err.to_string(),
                    )
                }
                AuthError::Hashing(_) | AuthError::JwtEncoding(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    e.to_string(),
                ),
            },
            ServerError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
