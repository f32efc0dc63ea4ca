//! Authentication middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use note_store::NoteStore;

use crate::error::ServerError;
use crate::state::AppState;

/// Extracts the bearer token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Authentication middleware.
///
/// Resolves the bearer token into an [`auth::Identity`] and stores it in
/// the request extensions. The identity comes entirely from the token's
/// claims; no store lookup happens per request.
pub async fn auth_middleware<S: NoteStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_token(&request) {
        Some(token) => token,
        None => return ServerError::AuthenticationRequired.into_response(),
    };

    match state.sessions.resolve(token) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
        }
        Err(e) => return ServerError::Auth(e).into_response(),
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with_auth(value: &str) -> Request {
        axum::http::Request::builder()
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_token_valid() {
        let request = request_with_auth("Bearer test-token-123");
        assert_eq!(extract_token(&request), Some("test-token-123"));
    }

    #[test]
    fn test_extract_token_missing_bearer() {
        let request = request_with_auth("Basic credentials");
        assert_eq!(extract_token(&request), None);
    }

    #[test]
    fn test_extract_token_missing_header() {
        let request = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(extract_token(&request), None);
    }
}
