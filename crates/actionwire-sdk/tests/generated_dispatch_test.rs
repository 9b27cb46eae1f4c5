//! Compiles and drives a generated dispatch module.
//!
//! `fixtures/app/router.rs` is the generator's output for `fixtures/app/actions` with
//! `camel` field case. The first test keeps it in sync with the generator; the rest
//! include it next to the real declarations and call it like a server would.

use std::path::Path;

use actionwire_runtime::axum::body::to_bytes;
use actionwire_runtime::axum::http::StatusCode;
use actionwire_runtime::axum::Json;
use actionwire_runtime::{DispatchErrorKind, Envelope};
use actionwire_sdk::config::{FieldCase, GeneratorConfig};
use actionwire_sdk::pipeline;
use serde_json::{json, Value};

#[path = "fixtures/app/actions/mod.rs"]
mod actions;

mod router {
    include!("fixtures/app/router.rs");
}

const GENERATED_ROUTER: &str = include_str!("fixtures/app/router.rs");

fn fixture_config() -> GeneratorConfig {
    let app = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/app");
    let mut config = GeneratorConfig {
        source_root: app.join("actions"),
        client_out: app.join("web/actions.ts"),
        server_out: app.join("router.rs"),
        ..GeneratorConfig::default()
    };
    config.client.field_case = FieldCase::Camel;
    config
}

fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn envelope(function: &str, args: Value) -> Envelope {
    Envelope::from_args(function, &args).unwrap()
}

/// Status and body of posting `envelope` to the generated handler.
async fn post(envelope: Envelope) -> (StatusCode, String) {
    let response = router::action_handler(Json(envelope)).await;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ==========================================================================
// Generated output matches the committed module
// ==========================================================================

#[test]
fn test_committed_router_matches_generator_output() {
    let artifacts = pipeline::generate(&fixture_config()).unwrap();
    assert_eq!(tokens(&artifacts.server), tokens(GENERATED_ROUTER));

    assert!(artifacts.client.contains("export interface GetUserRequest {\n  userId: number;\n}"));
    assert!(artifacts.client.contains("  displayName: string;\n  email: string | null;"));
    assert!(artifacts.client.contains("JSON.stringify({ fn: \"type\", args })"));
}

// ==========================================================================
// Routing
// ==========================================================================

#[tokio::test]
async fn test_client_shaped_payload_reaches_action() {
    let (status, body) = post(envelope("get_user", json!({ "userId": 7 }))).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, json!({ "displayName": "Ada", "email": null }));
}

#[tokio::test]
async fn test_async_and_infallible_actions() {
    let value = router::dispatch(&envelope("find_user", json!({ "userId": 7 })))
        .await
        .unwrap();
    assert_eq!(value["displayName"], "Ada");

    let value = router::dispatch(&envelope("type", json!("hello"))).await.unwrap();
    assert_eq!(value, json!("hello"));

    let value = router::dispatch(&envelope("uptime", json!(true))).await.unwrap();
    assert_eq!(value, json!(42));
}

#[tokio::test]
async fn test_unknown_action_is_not_found() {
    let err = router::dispatch(&envelope("delete_user", json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), DispatchErrorKind::UnknownRoute);
    assert_eq!(err.function(), "delete_user");

    let (status, body) = post(envelope("delete_user", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "unknown action 'delete_user'");
}

#[tokio::test]
async fn test_malformed_args_are_bad_request() {
    // serde expects the camelCase name the client sends
    let err = router::dispatch(&envelope("get_user", json!({ "user_id": 7 })))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), DispatchErrorKind::Decode);

    let (status, body) = post(envelope("get_user", json!("seven"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("invalid arguments for 'get_user'"), "{body}");
}

#[tokio::test]
async fn test_action_failure_is_server_error() {
    let (status, body) = post(envelope("find_user", json!({ "userId": 1 }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "action 'find_user' failed: user 1 not found");
}

#[test]
fn test_router_builds() {
    let _router = router::router();
}
