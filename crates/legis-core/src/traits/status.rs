//! Status reporting.

use crate::error::LegisResult;

/// Receives pipeline status updates.
///
/// Updates are last-write-wins. A failed report is logged by the caller and
/// never aborts a run.
pub trait StatusReporter: Send + Sync {
    fn report(&self, status: &str) -> LegisResult<()>;
}
