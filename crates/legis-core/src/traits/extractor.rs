//! Text extraction seam.

use std::path::Path;

use legis_extractors::{ExtractionOutcome, ExtractionPipeline};

/// Turns a source file into raw text.
pub trait DocumentExtractor: Send + Sync {
    fn extract_file(&self, path: &Path) -> ExtractionOutcome;
}

impl DocumentExtractor for ExtractionPipeline {
    fn extract_file(&self, path: &Path) -> ExtractionOutcome {
        ExtractionPipeline::extract_file(self, path)
    }
}
