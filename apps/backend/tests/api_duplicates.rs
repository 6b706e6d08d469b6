//! Duplicate detection API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::fixtures;
use common::TestContext;
use vocab_trainer_backend::config::Config;
use vocab_trainer_backend::models::SmartOptions;

#[tokio::test]
async fn test_detect_exact_and_similar() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/detect")
        .json(&fixtures::detect_request(
            &["color", "color", "colour", "apple", "aple"],
            Some(80.0),
        ))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["exact"].as_array().unwrap().len(), 1);
    assert_eq!(body["exact"][0]["key"], "color");
    assert_eq!(body["exact"][0]["confidence"], "exact");
    assert_eq!(body["similar"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["stats"],
        json!({
            "totalItems": 5,
            "totalGroups": 3,
            "exactDuplicates": 2,
            "similarDuplicates": 4,
            "potentialSavings": 3,
        })
    );
}

#[tokio::test]
async fn test_detect_uses_threshold() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let words = ["accommodation", "acommodation", "accomodation", "banana"];

    let loose: Value = server
        .post("/api/duplicates/detect")
        .json(&fixtures::detect_request(&words, Some(80.0)))
        .await
        .json();
    let mut ids = fixtures::group_ids(&loose["similar"][0]);
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let strict: Value = server
        .post("/api/duplicates/detect")
        .json(&fixtures::detect_request(&words, Some(90.0)))
        .await
        .json();
    let mut ids = fixtures::group_ids(&strict["similar"][0]);
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_detect_empty_collection() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/detect")
        .json(&json!({ "vocabularies": [] }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["exact"], json!([]));
    assert_eq!(body["similar"], json!([]));
    assert_eq!(body["stats"]["potentialSavings"], 0);
}

#[tokio::test]
async fn test_detect_invalid_threshold() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/detect")
        .json(&fixtures::detect_request(&["word"], Some(150.0)))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "invalid_threshold");
}

#[tokio::test]
async fn test_smart_spelling_variation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/smart")
        .json(&fixtures::smart_request(&["theatre", "theater", "lamp"], Some(70.0)))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let groups = body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);

    let mut ids = fixtures::group_ids(&groups[0]);
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(groups[0]["reasons"]
        .as_array()
        .unwrap()
        .contains(&json!("Common spelling variation")));
}

#[tokio::test]
async fn test_smart_default_confidence_excludes_variation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/smart")
        .json(&fixtures::smart_request(&["theatre", "theater"], None))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["groups"], json!([]));
}

#[tokio::test]
async fn test_smart_min_confidence() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/smart")
        .json(&fixtures::smart_request(&["receive", "recieve", "zebra"], Some(60.0)))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["groups"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_smart_collection_too_large() {
    let ctx = TestContext::with_config(Config {
        smart: SmartOptions {
            max_items: 2,
            ..SmartOptions::default()
        },
        ..Config::default()
    });
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/smart")
        .json(&fixtures::smart_request(&["one", "two", "three"], None))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "collection_too_large");
}

#[tokio::test]
async fn test_status_idle_before_jobs() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/duplicates/status").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "state": "idle" }));
}

/// A submitted job is acknowledged immediately and its result published.
#[tokio::test]
async fn test_submit_job_then_poll_status() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/jobs")
        .json(&fixtures::detect_request(&["apple", "Apple", "pear"], None))
        .await;

    response.assert_status(StatusCode::ACCEPTED);
    let generation = response.json::<Value>()["generation"].as_u64().unwrap();
    assert_eq!(generation, 1);

    ctx.state.runner.wait_for(generation).await;

    let response = server.get("/api/duplicates/status").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["state"], "completed");
    assert_eq!(body["generation"], 1);
    assert_eq!(body["result"]["exact"].as_array().unwrap().len(), 1);
    assert_eq!(body["result"]["stats"]["totalItems"], 3);
}

#[tokio::test]
async fn test_submit_job_invalid_threshold() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/duplicates/jobs")
        .json(&fixtures::detect_request(&["apple"], Some(-5.0)))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.state.runner.current_generation(), 0);
}
