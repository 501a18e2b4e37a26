//! Submission integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn submitting_to_an_unknown_contest_is_not_found() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;

    let response = harness
        .server
        .post("/v1/contests/00000000-0000-4000-8000-000000000000/submissions")
        .add_header("authorization", user.auth_header())
        .json(&json!({ "code": "fn main() {}", "language": "rust", "successful": true }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn submission_response_overlays_contest_details_without_code() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;
    let contest_id = harness.create_contest(&user, "Spring Sprint").await;

    let response = harness
        .server
        .post(&format!("/v1/contests/{contest_id}/submissions"))
        .add_header("authorization", user.auth_header())
        .json(&json!({ "code": "fn main() {}", "language": "rust", "successful": true }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["contest_id"], contest_id);
    assert_eq!(body["title"], "Spring Sprint");
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["language"], "rust");
    assert_eq!(body["successful"], true);
    // The submitted source never appears in the summary.
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn resubmitting_replaces_the_previous_attempt() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;
    let contest_id = harness.create_contest(&user, "Spring Sprint").await;

    for (language, successful) in [("python", false), ("rust", true)] {
        let response = harness
            .server
            .post(&format!("/v1/contests/{contest_id}/submissions"))
            .add_header("authorization", user.auth_header())
            .json(&json!({ "code": "solution", "language": language, "successful": successful }))
            .await;
        response.assert_status_ok();
    }

    let response = harness
        .server
        .get(&format!("/v1/users/{}/submissions", user.user_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let list = body.as_array().expect("array");
    // One entry per contest, holding the latest attempt only.
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["language"], "rust");
    assert_eq!(list[0]["successful"], true);
}

#[tokio::test]
async fn history_lists_newest_first_across_contests() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;
    let first = harness.create_contest(&user, "First").await;
    let second = harness.create_contest(&user, "Second").await;

    for contest_id in [&first, &second] {
        let response = harness
            .server
            .post(&format!("/v1/contests/{contest_id}/submissions"))
            .add_header("authorization", user.auth_header())
            .json(&json!({ "code": "solution", "language": "rust", "successful": true }))
            .await;
        response.assert_status_ok();
    }

    let response = harness
        .server
        .get(&format!("/v1/users/{}/submissions", user.user_id))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let titles: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Second", "First"]);
}
