//! Report endpoints
//!
//! Every report is plain text. Before any dataset is loaded each one
//! returns the engine's "No data available." placeholder with 200 OK.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::AppState;

fn text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// GET /api/reports/summary
pub async fn summary(State(state): State<AppState>) -> Response {
    text(state.session.summarize())
}

/// GET /api/reports/error-files
pub async fn error_files(State(state): State<AppState>) -> Response {
    text(state.session.check_error_files())
}

/// GET /api/reports/samples-to-check
pub async fn samples_to_check(State(state): State<AppState>) -> Response {
    text(state.session.samples_to_check())
}

/// GET /api/reports/user-device-count
pub async fn user_device_count(State(state): State<AppState>) -> Response {
    text(state.session.count_user_device())
}

/// GET /api/reports/id-errors
pub async fn id_errors(State(state): State<AppState>) -> Response {
    text(state.session.detect_id_errors())
}

/// GET /api/reports/error-summary
pub async fn error_summary(State(state): State<AppState>) -> Response {
    text(state.session.error_summary_report())
}
