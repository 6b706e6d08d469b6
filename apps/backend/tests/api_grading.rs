//! Grading API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// A template with an optional segment accepts both spellings.
#[tokio::test]
async fn test_check_optional_segment() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/grading/check")
        .json(&json!({ "userAnswer": "Rain Wear", "template": "rain(-)wear" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["isCorrect"], true);
    assert_eq!(body["userNormalized"], "rain wear");
    assert_eq!(body["candidates"], json!(["rain-wear", "rainwear"]));
}

#[tokio::test]
async fn test_check_bound_alternatives() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let accepted = server
        .post("/api/grading/check")
        .json(&json!({ "userAnswer": "that afternoon", "template": "this/that afternoon" }))
        .await;
    accepted.assert_status_ok();
    assert_eq!(accepted.json::<Value>()["isCorrect"], true);

    let rejected = server
        .post("/api/grading/check")
        .json(&json!({ "userAnswer": "this that afternoon", "template": "this/that afternoon" }))
        .await;
    rejected.assert_status_ok();
    let body: Value = rejected.json();
    assert_eq!(body["isCorrect"], false);
    assert_eq!(body["matchedCandidate"], Value::Null);
}

#[tokio::test]
async fn test_check_spelled_numbers() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/grading/check")
        .json(&json!({ "userAnswer": "15", "template": "one five" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["isCorrect"], true);
}

#[tokio::test]
async fn test_check_blank_answer_is_wrong() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/grading/check")
        .json(&json!({ "userAnswer": "   ", "template": "library" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["isCorrect"], false);
}

#[tokio::test]
async fn test_check_missing_field_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/grading/check")
        .json(&json!({ "userAnswer": "bus" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_expand_template() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/grading/expand")
        .json(&json!({ "template": "trains / bus" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["candidates"], json!(["trains", "bus"]));
}

#[tokio::test]
async fn test_expand_malformed_template_is_literal() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/grading/expand")
        .json(&json!({ "template": "open (late" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["candidates"], json!(["open (late"]));
}
