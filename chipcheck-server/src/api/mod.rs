//! HTTP API handlers for chipcheck-server

pub mod buildinfo;
pub mod dataset;
pub mod health;
pub mod reports;
pub mod settings;

pub use buildinfo::get_build_info;
pub use dataset::{dataset_status, load_dataset};
pub use health::health_routes;
pub use reports::{error_files, error_summary, id_errors, samples_to_check, summary, user_device_count};
pub use settings::{get_threshold, put_threshold};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chipcheck_common::Error;
use serde_json::json;
use thiserror::Error as ThisError;

/// API errors returned as `{"error": ...}` bodies
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Request rejected (bad sheet or setting value)
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Schema(e) => ApiError::BadRequest(e.to_string()),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
