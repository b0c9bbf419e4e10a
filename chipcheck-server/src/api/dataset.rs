//! Dataset loading and status
//!
//! A POST replaces the active dataset only when the whole sheet passes
//! normalization; a rejected sheet leaves the previous dataset active.

use axum::{extract::State, Json};
use chipcheck_common::{SessionStatus, Sheet};
use serde::Serialize;
use tracing::info;

use super::ApiError;
use crate::AppState;

/// Response for a successful load
#[derive(Debug, Serialize)]
pub struct DatasetLoaded {
    pub records: usize,
    pub has_path: bool,
}

/// POST /api/dataset
///
/// Body: `{"columns": [...], "rows": [{"Chip": ..., "Date": ...}, ...]}`.
/// `columns` may be omitted and is then inferred from row keys.
pub async fn load_dataset(
    State(state): State<AppState>,
    Json(mut sheet): Json<Sheet>,
) -> Result<Json<DatasetLoaded>, ApiError> {
    sheet.infer_columns();
    info!("Received sheet with {} rows", sheet.len());

    let dataset = state.session.load_dataset(&sheet)?;

    Ok(Json(DatasetLoaded {
        records: dataset.len(),
        has_path: dataset.has_path(),
    }))
}

/// GET /api/dataset
pub async fn dataset_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.status())
}
