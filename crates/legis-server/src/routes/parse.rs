//! Manual pipeline trigger.

use axum::{extract::State, Json};
use legis_core::RunSummary;
use serde::Serialize;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub message: String,
    pub summary: RunSummary,
}

/// Run the pipeline and wait for it to finish.
/// POST /parse
pub async fn parse_documents(State(state): State<AppState>) -> ApiResult<Json<ParseResponse>> {
    match state.run_pipeline().await {
        Ok(summary) => Ok(Json(ParseResponse {
            message: "Parsing completed".to_string(),
            summary,
        })),
        Err(e) => {
            error!(error = %e, "Parsing failed");
            Err(ApiError::internal("Error during parsing."))
        }
    }
}
