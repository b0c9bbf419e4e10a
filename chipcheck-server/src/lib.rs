//! chipcheck-server library - HTTP front end for the chip report engine
//!
//! Accepts sheets as JSON, keeps the active dataset in a [`Session`] and
//! serves every report as plain text.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chipcheck_common::Session;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod logging;

/// Upper bound on uploaded sheet size
pub const MAX_SHEET_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active dataset and threshold
    pub session: Arc<Session>,
}

impl AppState {
    /// Create new application state
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let reports = Router::new()
        .route("/api/reports/summary", get(api::summary))
        .route("/api/reports/error-files", get(api::error_files))
        .route("/api/reports/samples-to-check", get(api::samples_to_check))
        .route("/api/reports/user-device-count", get(api::user_device_count))
        .route("/api/reports/id-errors", get(api::id_errors))
        .route("/api/reports/error-summary", get(api::error_summary));

    let dataset = Router::new()
        .route(
            "/api/dataset",
            get(api::dataset_status).post(api::load_dataset),
        )
        .layer(DefaultBodyLimit::max(MAX_SHEET_BYTES));

    let settings = Router::new().route(
        "/api/settings/threshold",
        get(api::get_threshold).put(api::put_threshold),
    );

    Router::new()
        .merge(reports)
        .merge(dataset)
        .merge(settings)
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
