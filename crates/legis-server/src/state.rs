//! Server state management.

use std::sync::Arc;

use legis_core::{DocumentPipeline, JsonStatusFile, RunSummary};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pipeline: Arc<DocumentPipeline>,
    status: Arc<JsonStatusFile>,
    /// Held for the duration of a run so runs from this process never overlap.
    run_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create state with the default pipeline for `config`.
    pub fn new(config: ServerConfig) -> Self {
        let pipeline = DocumentPipeline::new(config.pipeline.clone());
        Self::with_pipeline(config, pipeline)
    }

    /// Create state around a pre-built pipeline.
    pub fn with_pipeline(config: ServerConfig, pipeline: DocumentPipeline) -> Self {
        let status = JsonStatusFile::new(config.pipeline.status_file.clone());
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            status: Arc::new(status),
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn status(&self) -> &JsonStatusFile {
        &self.status
    }

    /// Run the pipeline on the blocking pool, waiting for any run in progress.
    pub async fn run_pipeline(&self) -> ApiResult<RunSummary> {
        let _guard = self.run_lock.lock().await;

        let pipeline = Arc::clone(&self.pipeline);
        let status = Arc::clone(&self.status);
        let summary = tokio::task::spawn_blocking(move || pipeline.run(&*status))
            .await
            .map_err(|e| ApiError::internal(format!("Pipeline task failed: {}", e)))??;

        Ok(summary)
    }

    /// Start a run in the background and return immediately.
    pub fn spawn_run(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            match state.run_pipeline().await {
                Ok(summary) => info!(
                    succeeded = summary.succeeded(),
                    skipped = summary.skipped(),
                    failed = summary.failed(),
                    "Background run finished"
                ),
                Err(e) => error!(error = %e, "Background run failed"),
            }
        });
    }
}
