//! Health check for chipcheck-server
//!
//! Answers without touching the session.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Fixed `ok` status plus service name and crate version
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "chipcheck-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `/health` route, merged into the main router
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
