//! API and manager error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use codeclash_store::StoreError;

/// Errors produced by the manager operations (submission upsert, discussion
/// consistency, activity aggregation).
///
/// The taxonomy is deliberately small: a referenced document is missing, an
/// input field is missing, or the store itself failed. Managers fail fast on
/// the first unmet precondition; once a multi-document sequence has started,
/// a store failure surfaces here without rolling back the steps already
/// applied (each step is independently idempotent, so retrying the whole
/// operation converges).
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    /// A referenced user/contest/post/comment does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Which entity failed to resolve.
        entity: &'static str,
        /// The id that did not resolve.
        id: String,
    },

    /// A required input field is missing or empty.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Signup attempted with an email that is already registered.
    #[error("email already registered")]
    EmailTaken,

    /// Login attempted with an unknown email or a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The underlying store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OpError {
    /// Convenience constructor for [`OpError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<OpError> for ApiError {
    fn from(err: OpError) -> Self {
        match err {
            OpError::NotFound { .. } => Self::NotFound(err.to_string()),
            OpError::Validation(msg) => Self::BadRequest(msg),
            OpError::EmailTaken => Self::Conflict(err.to_string()),
            OpError::InvalidCredentials => Self::Unauthorized,
            OpError::Store(store_err) => store_err.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} not found: {id}")),
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}
