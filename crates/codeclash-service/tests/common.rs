//! Common test utilities for codeclash integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use codeclash_service::{create_router, AppState, ServiceConfig};
use codeclash_store::RocksStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle on the store behind the server, for asserting on
    /// document state the HTTP surface does not expose.
    pub store: Arc<RocksStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

/// An account created through the API, with its real session token.
pub struct TestUser {
    /// The user id as returned by signup.
    pub user_id: String,
    /// A bearer token signed by the service.
    pub token: String,
}

impl TestUser {
    /// Authorization header value for this user.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            jwt_secret: "test-secret".into(),
            token_ttl_seconds: 3600,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Sign up a user through the API and return their id and token.
    pub async fn signup(&self, name: &str) -> TestUser {
        let response = self
            .server
            .post("/v1/auth/signup")
            .json(&json!({
                "name": name,
                "email": format!("{name}@example.com"),
                "password": "hunter2",
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();

        TestUser {
            user_id: body["user_id"].as_str().expect("user_id").to_string(),
            token: body["token"].as_str().expect("token").to_string(),
        }
    }

    /// Create a contest through the API and return its id.
    pub async fn create_contest(&self, user: &TestUser, title: &str) -> String {
        let response = self
            .server
            .post("/v1/contests")
            .add_header("authorization", user.auth_header())
            .json(&json!({
                "title": title,
                "company": "Acme",
                "reward": "$500",
                "short_description": "a short description",
                "problem_explanation": "solve the problem",
                "difficulty": "Easy",
                "contest_date": "2026-09-01T12:00:00Z",
                "key": "eval-key",
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("contest id").to_string()
    }

    /// Create a discussion post through the API and return its id.
    pub async fn create_post(&self, user: &TestUser, title: &str) -> String {
        let response = self
            .server
            .post("/v1/discussion")
            .add_header("authorization", user.auth_header())
            .json(&json!({
                "title": title,
                "description": "post body",
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("post id").to_string()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
