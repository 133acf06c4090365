//! Pipeline status endpoint.

use axum::{extract::State, Json};
use legis_core::types::wall_clock;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Status shown before the first run ever wrote one.
pub const IDLE_STATUS: &str = "Idle";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: Option<String>,
}

/// Latest pipeline status.
/// GET /status
pub async fn get_status(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let response = match state.status().read()? {
        Some(record) => StatusResponse {
            status: record.status,
            timestamp: Some(wall_clock::format(&record.timestamp)),
        },
        None => StatusResponse {
            status: IDLE_STATUS.to_string(),
            timestamp: None,
        },
    };
    Ok(Json(response))
}
