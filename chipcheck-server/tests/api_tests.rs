//! Integration tests for chipcheck-server API endpoints
//!
//! Tests cover:
//! - Health and build info endpoints
//! - Dataset loading (success, schema rejection, previous dataset kept)
//! - Report endpoints before and after a load
//! - Threshold setting

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chipcheck_common::{Session, Threshold};
use chipcheck_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app with a fresh session
fn setup_app() -> (Router, AppState) {
    let state = AppState::new(Session::new(Threshold::default()));
    (build_router(state.clone()), state)
}

/// Test helper: Create request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Create request with JSON body
fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Read whole body as bytes
async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}

/// Test helper: Extract text body from response
async fn extract_text(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).expect("Should be UTF-8")
}

fn sample_sheet() -> Value {
    json!({
        "columns": ["Chip", "Date", "User", "Device", "Rep", "Path"],
        "rows": [
            {"Chip": "D24A05X0011", "Date": "20240105_0930", "User": "kim", "Device": "dev1", "Rep": 1, "Path": "c:/D24A05X001/a"},
            {"Chip": "D24A05X0012", "Date": "20240105_0931", "User": "kim", "Device": "dev1", "Rep": 1, "Path": "c:/D24A05X001/b"},
            {"Chip": "D24A05X0013", "Date": "20240105_0932", "User": "kim", "Device": "dev1", "Rep": 1, "Path": "C:/ERROR/c"},
            {"Chip": "D24M05X0011", "Date": "20240105_0933", "User": "lee", "Device": "dev1", "Rep": 2, "Path": "c:/D24A05X001/d"}
        ]
    })
}

async fn load(app: &Router, sheet: &Value) -> StatusCode {
    app.clone()
        .oneshot(json_request("POST", "/api/dataset", sheet))
        .await
        .unwrap()
        .status()
}

// =============================================================================
// Health / build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = setup_app();

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "chipcheck-server");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let (app, _) = setup_app();

    let response = app.oneshot(test_request("GET", "/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Reports before load
// =============================================================================

#[tokio::test]
async fn test_reports_without_dataset_return_placeholder() {
    let (app, _) = setup_app();

    for uri in [
        "/api/reports/summary",
        "/api/reports/error-files",
        "/api/reports/samples-to-check",
        "/api/reports/user-device-count",
        "/api/reports/id-errors",
        "/api/reports/error-summary",
    ] {
        let response = app.clone().oneshot(test_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(extract_text(response.into_body()).await, "No data available.");
    }
}

// =============================================================================
// Dataset loading
// =============================================================================

#[tokio::test]
async fn test_load_dataset_and_status() {
    let (app, _) = setup_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/dataset", &sample_sheet()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["records"], 4);
    assert_eq!(body["has_path"], true);

    let response = app.oneshot(test_request("GET", "/api/dataset")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["loaded"], true);
    assert_eq!(body["records"], 4);
    assert_eq!(body["threshold"], 3);
}

#[tokio::test]
async fn test_columns_inferred_when_omitted() {
    let (app, state) = setup_app();

    let sheet = json!({"rows": [{"Chip": "D24A05X0011", "Date": "20240105"}]});
    assert_eq!(load(&app, &sheet).await, StatusCode::OK);
    assert!(!state.session.status().has_path);
}

#[tokio::test]
async fn test_schema_error_keeps_previous_dataset() {
    let (app, state) = setup_app();
    assert_eq!(load(&app, &sample_sheet()).await, StatusCode::OK);

    let bad = json!({"columns": ["Chip", "Date"], "rows": [{"Chip": "X", "Date": "20240105"}]});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/dataset", &bad))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("shorter than 2 characters"));

    assert_eq!(state.session.status().records, 4);
}

#[tokio::test]
async fn test_missing_required_column_rejected() {
    let (app, state) = setup_app();

    let bad = json!({"columns": ["Chip"], "rows": [{"Chip": "D24A05X0011"}]});
    assert_eq!(load(&app, &bad).await, StatusCode::BAD_REQUEST);
    assert!(!state.session.status().loaded);
}

// =============================================================================
// Reports after load
// =============================================================================

#[tokio::test]
async fn test_reports_after_load() {
    let (app, _) = setup_app();
    assert_eq!(load(&app, &sample_sheet()).await, StatusCode::OK);

    let get_text = |uri: &'static str| {
        let app = app.clone();
        async move {
            let response = app.oneshot(test_request("GET", uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            extract_text(response.into_body()).await
        }
    };

    let errors = get_text("/api/reports/error-files").await;
    assert!(errors.contains("1 file(s) are in an ERROR folder."));
    assert!(errors.contains("C:/ERROR/c"));

    let summary = get_text("/api/reports/error-summary").await;
    assert!(summary.contains("D24M05X0011"));
    assert!(summary.contains("Suspected mistyped user names (threshold = 3):\nlee (1)"));

    let ids = get_text("/api/reports/id-errors").await;
    assert_eq!(ids, "[ID Error Detection]\nNot able to find errors");

    // Same request twice gives the same bytes
    assert_eq!(
        get_text("/api/reports/summary").await,
        get_text("/api/reports/summary").await
    );
}

// =============================================================================
// Threshold setting
// =============================================================================

#[tokio::test]
async fn test_threshold_get_and_put() {
    let (app, state) = setup_app();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/settings/threshold"))
        .await
        .unwrap();
    assert_eq!(extract_json(response.into_body()).await["threshold"], 3);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/settings/threshold", &json!({"threshold": 5})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.session.threshold().get(), 5);

    let response = app
        .oneshot(json_request("PUT", "/api/settings/threshold", &json!({"threshold": 0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.session.threshold().get(), 5);
}
