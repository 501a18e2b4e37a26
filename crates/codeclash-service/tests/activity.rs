//! Activity feed integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn unknown_user_activity_is_not_found() {
    let harness = TestHarness::new();

    harness
        .server
        .get("/v1/users/00000000-0000-4000-8000-000000000000/activity")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn fresh_user_has_three_empty_sections() {
    let harness = TestHarness::new();
    let user = harness.signup("alice").await;

    let response = harness
        .server
        .get(&format!("/v1/users/{}/activity", user.user_id))
        .await;

    response.assert_status_ok();
    let feed: serde_json::Value = response.json();
    assert_eq!(feed["contests"].as_array().unwrap().len(), 0);
    assert_eq!(feed["discussions"].as_array().unwrap().len(), 0);
    assert_eq!(feed["comments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn feed_collects_submissions_posts_and_comments() {
    let harness = TestHarness::new();
    let alice = harness.signup("alice").await;
    let bob = harness.signup("bob").await;

    let contest_id = harness.create_contest(&alice, "Spring Sprint").await;
    let response = harness
        .server
        .post(&format!("/v1/contests/{contest_id}/submissions"))
        .add_header("authorization", bob.auth_header())
        .json(&json!({ "code": "solution", "language": "rust", "successful": true }))
        .await;
    response.assert_status_ok();

    let post_id = harness.create_post(&bob, "my approach").await;
    let response = harness
        .server
        .post(&format!("/v1/discussion/{post_id}/comments"))
        .add_header("authorization", bob.auth_header())
        .json(&json!({ "text": "follow-up", "post_title": "my approach" }))
        .await;
    response.assert_status_ok();

    let response = harness
        .server
        .get(&format!("/v1/users/{}/activity", bob.user_id))
        .await;

    response.assert_status_ok();
    let feed: serde_json::Value = response.json();

    let contests = feed["contests"].as_array().unwrap();
    assert_eq!(contests.len(), 1);
    assert_eq!(contests[0]["title"], "Spring Sprint");
    assert_eq!(contests[0]["company"], "Acme");
    assert_eq!(contests[0]["successful"], true);

    let discussions = feed["discussions"].as_array().unwrap();
    assert_eq!(discussions.len(), 1);
    assert_eq!(discussions[0]["title"], "my approach");

    let comments = feed["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["post_title"], "my approach");
    assert_eq!(comments[0]["text"], "follow-up");
}

#[tokio::test]
async fn commenting_on_anothers_post_shows_in_the_commenters_feed_only() {
    let harness = TestHarness::new();
    let alice = harness.signup("alice").await;
    let bob = harness.signup("bob").await;
    let post_id = harness.create_post(&alice, "topic").await;

    let response = harness
        .server
        .post(&format!("/v1/discussion/{post_id}/comments"))
        .add_header("authorization", bob.auth_header())
        .json(&json!({ "text": "hi" }))
        .await;
    response.assert_status_ok();

    let response = harness
        .server
        .get(&format!("/v1/users/{}/activity", bob.user_id))
        .await;
    response.assert_status_ok();
    let bob_feed: serde_json::Value = response.json();
    assert_eq!(bob_feed["comments"].as_array().unwrap().len(), 1);
    assert_eq!(bob_feed["discussions"].as_array().unwrap().len(), 0);

    let response = harness
        .server
        .get(&format!("/v1/users/{}/activity", alice.user_id))
        .await;
    response.assert_status_ok();
    let alice_feed: serde_json::Value = response.json();
    assert_eq!(alice_feed["comments"].as_array().unwrap().len(), 0);
    assert_eq!(alice_feed["discussions"].as_array().unwrap().len(), 1);
}
