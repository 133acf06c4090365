//! legis-server - HTTP upload and trigger server for legis.
//!
//! Accepts documents over multipart upload, drops them into the pipeline
//! input folder and runs the ingestion pipeline on demand or after each
//! upload.
//!
//! # Example
//!
//! ```ignore
//! use legis_server::{create_server, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::from_env().unwrap();
//!     let addr = config.bind_addr();
//!     let app = create_server(AppState::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
