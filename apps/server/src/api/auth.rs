//! Signup, login, and session endpoints.

use std::sync::Arc;

use auth::{Credential, Identity, ProviderProfile, authenticate, hash_password};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use entities::User;
use note_store::NoteStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Request body for explicit signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Response body for signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: Uuid,
    pub email: String,
}

/// Request body for password login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body carrying a session token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
}

/// A verified profile delivered by the provider integration.
#[derive(Debug, Deserialize)]
pub struct ProviderCallbackRequest {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Response body for the login URL endpoint.
#[derive(Debug, Serialize)]
pub struct LoginUrlResponse {
    pub login_url: String,
}

/// Response body describing the current user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Creates an account from an explicit signup form.
///
/// Unlike login, signup reports a duplicate email as a plain client
/// error.
pub async fn signup<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<SignupRequest>,
) -> ServerResult<Json<SignupResponse>> {
    if request.email.is_empty() || !request.email.contains('@') {
        return Err(ServerError::InvalidRequest("malformed email".to_string()));
    }
    if request.password.is_empty() {
        return Err(ServerError::InvalidRequest(
            "password must not be empty".to_string(),
        ));
    }

    let hash = hash_password(&request.password).map_err(ServerError::Auth)?;
    let mut user = User::new(&request.email).with_password_hash(hash);
    user.name = request.name;

    let user = state.store.create_user(user).await?;

    tracing::info!(user_id = %user.id, "User signed up");

    Ok(Json(SignupResponse {
        id: user.id,
        email: user.email,
    }))
}

/// Authenticates a password credential and mints a session token.
///
/// An unseen email is provisioned as a new account rather than rejected.
pub async fn login<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<TokenResponse>> {
    let identity = authenticate(
        &state.store,
        Credential::Password {
            email: request.email,
            password: request.password,
        },
    )
    .await?;

    issue_session(&state, &identity)
}

/// Builds the provider authorization URL from configuration.
pub async fn get_login_url<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<LoginUrlResponse>> {
    if !state.config.oauth_configured() {
        return Err(ServerError::InvalidRequest(
            "OAuth provider is not configured".to_string(),
        ));
    }

    let authorize_url = state.config.oauth_authorize_url.as_ref().unwrap();
    let client_id = state.config.oauth_client_id.as_ref().unwrap();
    let redirect_url = state.config.oauth_redirect_url.as_ref().unwrap();

    // State parameter for CSRF protection; the provider echoes it back.
    let auth_state = Uuid::new_v4().to_string();

    let login_url = format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope=openid%20email%20profile&state={}",
        authorize_url,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_url),
        auth_state,
    );

    tracing::info!("Generated provider login URL");

    Ok(Json(LoginUrlResponse { login_url }))
}

/// Handles the provider callback with the profile in query parameters.
pub async fn provider_callback_query<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(request): Query<ProviderCallbackRequest>,
) -> ServerResult<Json<TokenResponse>> {
    provider_login(&state, request).await
}

/// Handles the provider callback with the profile in the request body.
pub async fn provider_callback_json<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<ProviderCallbackRequest>,
) -> ServerResult<Json<TokenResponse>> {
    provider_login(&state, request).await
}

/// Authenticates a provider profile and mints a session token.
///
/// The profile arrives already verified by the provider integration;
/// it is consumed as-is.
async fn provider_login<S: NoteStore>(
    state: &AppState<S>,
    request: ProviderCallbackRequest,
) -> ServerResult<Json<TokenResponse>> {
    let identity = authenticate(
        &state.store,
        Credential::Provider(ProviderProfile {
            email: request.email,
            name: request.name,
            picture: request.picture,
        }),
    )
    .await?;

    issue_session(state, &identity)
}

fn issue_session<S: NoteStore>(
    state: &AppState<S>,
    identity: &Identity,
) -> ServerResult<Json<TokenResponse>> {
    let token = state.sessions.issue(identity).map_err(ServerError::Auth)?;

    tracing::info!(user_id = %identity.user_id, "Session issued");

    Ok(Json(TokenResponse {
        token,
        expires_in: state.sessions.ttl_seconds(),
    }))
}

/// Returns the user behind the presented session token.
pub async fn get_current_user<S: NoteStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
) -> ServerResult<Json<UserResponse>> {
    let user = state
        .store
        .get_user(identity.user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        picture: user.picture,
    }))
}
