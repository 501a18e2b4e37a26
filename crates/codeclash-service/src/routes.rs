//! Router configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, contests, discussion, health, users};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /v1/auth/signup` - Register
/// - `POST /v1/auth/login` - Log in
/// - `GET /v1/contests` - List contests
/// - `GET /v1/contests/:id` - Fetch a contest
/// - `GET /v1/discussion` - List posts
/// - `GET /v1/discussion/:id` - Fetch a post with comments
/// - `GET /v1/discussion/:id/comments` - List a post's comments
/// - `GET /v1/users/:id/submissions` - Submission history
/// - `GET /v1/users/:id/activity` - Activity feed
///
/// ## Authenticated (Bearer token)
/// - `POST /v1/contests` - Create a contest
/// - `POST /v1/contests/:id/submissions` - Submit a solution
/// - `POST /v1/discussion` - Create a post
/// - `DELETE /v1/discussion/:id` - Delete a post (cascading)
/// - `POST /v1/discussion/:id/comments` - Comment on a post
/// - `DELETE /v1/comments/:id` - Delete a comment
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        // Auth
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        // Contests and submissions
        .route("/contests", post(contests::create_contest))
        .route("/contests", get(contests::list_contests))
        .route("/contests/:id", get(contests::get_contest))
        .route("/contests/:id/submissions", post(contests::submit))
        // Discussion
        .route("/discussion", post(discussion::create_post))
        .route("/discussion", get(discussion::list_posts))
        .route("/discussion/:id", get(discussion::get_post))
        .route("/discussion/:id", delete(discussion::delete_post))
        .route("/discussion/:id/comments", get(discussion::list_comments))
        .route("/discussion/:id/comments", post(discussion::create_comment))
        .route("/comments/:id", delete(discussion::delete_comment))
        // Per-user reads
        .route("/users/:id/submissions", get(users::list_submissions))
        .route("/users/:id/activity", get(users::get_activity))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no concurrency limit)
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
