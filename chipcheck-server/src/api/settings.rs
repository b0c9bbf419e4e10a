//! Threshold setting
//!
//! The threshold is read by every report at request time, so a change
//! applies to the next report without reloading the dataset.

use axum::{extract::State, Json};
use chipcheck_common::Threshold;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ThresholdResponse {
    pub threshold: usize,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdRequest {
    pub threshold: usize,
}

/// GET /api/settings/threshold
pub async fn get_threshold(State(state): State<AppState>) -> Json<ThresholdResponse> {
    Json(ThresholdResponse {
        threshold: state.session.threshold().get(),
    })
}

/// PUT /api/settings/threshold
///
/// Rejects values below 1 with 400.
pub async fn put_threshold(
    State(state): State<AppState>,
    Json(request): Json<ThresholdRequest>,
) -> Result<Json<ThresholdResponse>, ApiError> {
    let threshold = Threshold::new(request.threshold)?;
    state.session.set_threshold(threshold);

    Ok(Json(ThresholdResponse {
        threshold: threshold.get(),
    }))
}
