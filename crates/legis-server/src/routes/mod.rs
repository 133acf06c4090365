//! Route definitions for the upload server.

mod health;
mod parse;
mod status;
mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Ingestion
        .route("/upload", post(upload::upload_document))
        .route("/parse", post(parse::parse_documents))
        .route("/status", get(status::get_status))
        .layer(DefaultBodyLimit::max(body_limit))
        // Attach state
        .with_state(state)
}

pub use health::*;
pub use parse::*;
pub use status::*;
pub use upload::*;
