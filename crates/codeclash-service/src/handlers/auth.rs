//! Signup and login handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Signup request.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Email address, unique per account.
    pub email: String,
    /// Plain-text password; only its hash is stored.
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Session response returned by both signup and login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// User ID.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Register a new user.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = auth::signup(
        state.store.as_ref(),
        &state.config.jwt_secret,
        state.config.token_ttl_seconds,
        &body.name,
        &body.email,
        &body.password,
    )?;

    Ok(Json(SessionResponse {
        user_id: session.user.id.to_string(),
        name: session.user.name,
        email: session.user.email,
        token: session.token,
    }))
}

/// Log in with email and password.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = auth::login(
        state.store.as_ref(),
        &state.config.jwt_secret,
        state.config.token_ttl_seconds,
        &body.email,
        &body.password,
    )?;

    Ok(Json(SessionResponse {
        user_id: session.user.id.to_string(),
        name: session.user.name,
        email: session.user.email,
        token: session.token,
    }))
}
