//! Contest integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

use codeclash_core::UserId;
use codeclash_store::Store;

#[tokio::test]
async fn create_contest_requires_auth() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/contests")
        .json(&json!({
            "title": "t",
            "company": "Acme",
            "reward": "$1",
            "short_description": "s",
            "problem_explanation": "p",
            "contest_date": "2026-09-01T12:00:00Z",
            "key": "k",
        }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn create_contest_records_creator_and_bumps_counter() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;

    let response = harness
        .server
        .post("/v1/contests")
        .add_header("authorization", user.auth_header())
        .json(&json!({
            "title": "Spring Sprint",
            "company": "Acme",
            "reward": "$500",
            "short_description": "short",
            "problem_explanation": "long",
            "contest_date": "2026-09-01T12:00:00Z",
            "key": "eval-key",
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Spring Sprint");
    assert_eq!(body["created_by"], "alice");
    // Difficulty defaults to medium when the request omits it.
    assert_eq!(body["difficulty"], "Medium");

    // The creator's audit counter records the action.
    let user_id: UserId = user.user_id.parse().unwrap();
    let stored = harness.store.get_user(&user_id).unwrap().unwrap();
    assert_eq!(stored.contest_created, 1);
}

#[tokio::test]
async fn create_contest_with_empty_key_fails() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;

    let response = harness
        .server
        .post("/v1/contests")
        .add_header("authorization", user.auth_header())
        .json(&json!({
            "title": "Spring Sprint",
            "company": "Acme",
            "reward": "$500",
            "short_description": "short",
            "problem_explanation": "long",
            "contest_date": "2026-09-01T12:00:00Z",
            "key": "  ",
        }))
        .await;

    response.assert_status_bad_request();
    // The rejected contest was never stored, and no counter moved.
    let user_id: UserId = user.user_id.parse().unwrap();
    let stored = harness.store.get_user(&user_id).unwrap().unwrap();
    assert_eq!(stored.contest_created, 0);
    let listing: serde_json::Value = harness.server.get("/v1/contests").await.json();
    assert_eq!(listing.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn listing_omits_the_evaluation_key() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;
    harness.create_contest(&user, "Spring Sprint").await;

    let response = harness.server.get("/v1/contests").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let list = body.as_array().expect("array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Spring Sprint");
    assert!(list[0].get("key").is_none());
    assert!(list[0].get("test_cases").is_none());
}

#[tokio::test]
async fn get_contest_returns_full_document() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;
    let contest_id = harness.create_contest(&user, "Spring Sprint").await;

    let response = harness.server.get(&format!("/v1/contests/{contest_id}")).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], contest_id);
    assert_eq!(body["key"], "eval-key");
    assert_eq!(body["problem_explanation"], "solve the problem");
}

#[tokio::test]
async fn get_unknown_contest_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/contests/00000000-0000-4000-8000-000000000000")
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}
