//! HTTP contract tests for the recommendation API.

mod common;

use advisor::api::headers::ERROR_KIND_HEADER;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use common::{test_app, test_config, write_catalog, ScriptedAgent};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::Service;

fn post_recommend(body: Value) -> Request<Body> {
    Request::post("/api/recommend")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_recommend_success_body_shape() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::first_candidate();
    let (mut app, _) = test_app(test_config(write_catalog(dir.path())), agent.clone(), Some("k"));

    let response = app
        .call(post_recommend(json!({
            "budget_range": [2, 3],
            "requires_4g": true,
            "min_ram": 3000,
            "user_intent": "gaming phone, lightweight"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());
    assert!(response.headers().get(ERROR_KIND_HEADER).is_none());

    let body = body_json(response).await;
    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "confidence_score",
            "reasoning",
            "recommendation_id",
            "selected_device",
            "user_intent"
        ]
    );
    assert!(body["selected_device"]["id"].is_i64());
    assert!(body["selected_device"]["name"].is_string());
    assert_eq!(agent.calls(), 1);
}

#[tokio::test]
async fn test_no_match_is_400_with_kind_header() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = test_app(
        test_config(write_catalog(dir.path())),
        ScriptedAgent::first_candidate(),
        Some("k"),
    );

    let response = app
        .call(post_recommend(json!({ "min_ram": 999999, "user_intent": "x" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(ERROR_KIND_HEADER).unwrap(),
        "no_matching_devices"
    );
    assert_eq!(
        body_json(response).await,
        json!({ "error": "No devices found matching strict criteria." })
    );
}

#[tokio::test]
async fn test_missing_credential_is_400() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::first_candidate();
    let (mut app, _) = test_app(test_config(write_catalog(dir.path())), agent.clone(), None);

    let response = app
        .call(post_recommend(json!({ "user_intent": "x" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(ERROR_KIND_HEADER).unwrap(),
        "missing_credential"
    );
    assert_eq!(agent.calls(), 0);
}

#[tokio::test]
async fn test_health_goes_ready_after_first_request() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = test_app(
        test_config(write_catalog(dir.path())),
        ScriptedAgent::first_candidate(),
        Some("k"),
    );

    let cold = body_json(
        app.call(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cold["status"], "cold");
    assert_eq!(cold["catalog_size"], 0);

    app.call(post_recommend(json!({ "user_intent": "x" })))
        .await
        .unwrap();

    let ready = body_json(
        app.call(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["catalog_size"], common::EVAL_ROWS);
    assert_eq!(ready["training_runs"], 1);
}

#[tokio::test]
async fn test_missing_intent_rejected_by_framework() {
    let dir = TempDir::new().unwrap();
    let agent = ScriptedAgent::first_candidate();
    let (mut app, state) = test_app(test_config(write_catalog(dir.path())), agent.clone(), Some("k"));

    let response = app
        .call(post_recommend(json!({ "budget_range": [1] })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(response.headers().get(ERROR_KIND_HEADER).is_none());
    assert!(!state.recommender.cache().is_initialized());
    assert_eq!(agent.calls(), 0);
}

#[tokio::test]
async fn test_request_ids_are_unique() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = test_app(
        test_config(write_catalog(dir.path())),
        ScriptedAgent::first_candidate(),
        None,
    );

    let a = app
        .call(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let b = app
        .call(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id_a = a.headers().get("x-request-id").unwrap().to_str().unwrap();
    let id_b = b.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id_a.len(), 36);
    assert_ne!(id_a, id_b);
}

#[tokio::test]
async fn test_metrics_endpoint_available() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = test_app(
        test_config(write_catalog(dir.path())),
        ScriptedAgent::first_candidate(),
        None,
    );

    let response = app
        .call(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
