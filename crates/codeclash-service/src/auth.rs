//! Authentication: password hashing, token issuance, and the request
//! extractor.
//!
//! Passwords are hashed with Argon2id and a per-password random salt; only
//! the PHC string is stored. Sessions are stateless HS256 JWTs signed with
//! the service secret, carrying the user id as the subject.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use codeclash_core::{User, UserId};
use codeclash_store::Store;

use crate::error::{ApiError, OpError};
use crate::state::AppState;

/// JWT claims for a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,
    /// Expiration time, seconds since the epoch.
    pub exp: i64,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
}

/// A signed-up or logged-in user together with their session token.
#[derive(Debug, Clone)]
pub struct Session {
    /// The resolved user.
    pub user: User,
    /// A signed bearer token for subsequent requests.
    pub token: String,
}

/// Register a new user and hand back a session.
///
/// Emails are matched case-insensitively; a second signup with the same
/// email is rejected rather than overwriting the first account.
///
/// # Errors
///
/// `Validation` for empty fields or a taken email, or a store error.
pub fn signup<S>(
    store: &S,
    jwt_secret: &str,
    token_ttl_seconds: i64,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Session, OpError>
where
    S: Store + ?Sized,
{
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(OpError::Validation(
            "name, email and password are required".to_owned(),
        ));
    }
    if store.find_user_by_email(email)?.is_some() {
        return Err(OpError::EmailTaken);
    }

    let user = User::new(name.trim(), email.trim().to_lowercase(), hash_password(password)?);
    store.insert_user(&user)?;
    tracing::info!(user_id = %user.id, "user signed up");

    let token = issue_token(jwt_secret, token_ttl_seconds, &user.id)?;
    Ok(Session { user, token })
}

/// Verify credentials and hand back a session.
///
/// # Errors
///
/// `InvalidCredentials` when the email is unknown or the password does not
/// match; the two cases are deliberately indistinguishable to the caller.
pub fn login<S>(
    store: &S,
    jwt_secret: &str,
    token_ttl_seconds: i64,
    email: &str,
    password: &str,
) -> Result<Session, OpError>
where
    S: Store + ?Sized,
{
    let Some(user) = store.find_user_by_email(email)? else {
        return Err(OpError::InvalidCredentials);
    };
    if !verify_password(password, &user.password_hash) {
        return Err(OpError::InvalidCredentials);
    }

    let token = issue_token(jwt_secret, token_ttl_seconds, &user.id)?;
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Session { user, token })
}

/// Hash a password into a PHC string with a fresh random salt.
fn hash_password(password: &str) -> Result<String, OpError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| OpError::Validation(format!("failed to hash password: {e}")))
}

/// Check a password against a stored PHC string.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Sign a session token for a user.
fn issue_token(secret: &str, ttl_seconds: i64, user_id: &UserId) -> Result<String, OpError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_seconds,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| OpError::Validation(format!("failed to sign token: {e}")))
}

/// Decode and validate a session token, returning its claims.
fn decode_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            ApiError::Unauthorized
        })
}

/// An authenticated user extracted from a Bearer session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user ID.
    pub user_id: UserId,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let claims = decode_token(&state.config.jwt_secret, token)?;

            let user_id = claims
                .sub
                .parse::<UserId>()
                .map_err(|_| ApiError::Unauthorized)?;

            Ok(AuthUser { user_id })
        })
    }
}
