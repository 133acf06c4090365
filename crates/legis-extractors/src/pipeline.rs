//! Extraction pipeline: ordered strategy chains per document format.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::factory::{ExtractorFactory, ExtractorOptions};
use crate::types::{ExtractionOutcome, FormatTag, StrategyFailure};
use crate::Extractor;

/// Pipeline for extracting text using registered strategies.
///
/// Strategies are kept in registration order. For a given format every
/// strategy that supports it is tried in that order until one returns
/// non-empty text, so reordering or adding a fallback is a matter of
/// changing the registration list.
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create pipeline with all available strategies in default order.
    pub fn with_defaults() -> Self {
        Self::with_options(ExtractorOptions::default())
    }

    /// Create pipeline with all available strategies, configured by `options`.
    pub fn with_options(options: ExtractorOptions) -> Self {
        Self {
            extractors: ExtractorFactory::all_with(options),
        }
    }

    /// Append a strategy to the end of the chain.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Strategies for a format, in the order they will be tried.
    pub fn chain(&self, format: FormatTag) -> Vec<&Arc<dyn Extractor>> {
        self.extractors
            .iter()
            .filter(|e| e.supports(format))
            .collect()
    }

    /// Run `content` through the strategy chain for `format`.
    ///
    /// With no strategy for `format` the outcome is `Unsupported`, carrying
    /// the format's own extension.
    pub fn extract(&self, content: &[u8], format: FormatTag) -> ExtractionOutcome {
        let chain = self.chain(format);
        if chain.is_empty() {
            return ExtractionOutcome::Unsupported(format.extension().to_string());
        }

        let mut attempts = Vec::new();

        for extractor in chain {
            match extractor.extract(content) {
                Ok(text) if !text.is_empty() => {
                    tracing::debug!(
                        strategy = extractor.name(),
                        chars = text.len(),
                        "Extraction succeeded"
                    );
                    return ExtractionOutcome::Extracted(text);
                }
                Ok(_) => {
                    tracing::info!(strategy = extractor.name(), "Strategy returned no text");
                    attempts.push(StrategyFailure::new(extractor.name(), "empty text"));
                }
                Err(e) => {
                    tracing::warn!(strategy = extractor.name(), error = %e, "Strategy failed");
                    attempts.push(StrategyFailure::new(extractor.name(), e));
                }
            }
        }

        ExtractionOutcome::Empty { attempts }
    }

    /// Read a file and run it through the chain for its extension.
    ///
    /// Unsupported extensions are reported without touching the file. A read
    /// failure counts as an empty extraction.
    pub fn extract_file(&self, path: &Path) -> ExtractionOutcome {
        let format = FormatTag::from_path(path);
        if format == FormatTag::Unsupported || !self.supports(format) {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();
            return ExtractionOutcome::Unsupported(ext);
        }

        match fs::read(path) {
            Ok(bytes) => self.extract(&bytes, format),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read source file");
                ExtractionOutcome::Empty {
                    attempts: vec![StrategyFailure::new("read", e)],
                }
            }
        }
    }

    /// Check if pipeline can handle a given format.
    pub fn supports(&self, format: FormatTag) -> bool {
        self.extractors.iter().any(|e| e.supports(format))
    }

    /// Names of every registered strategy, in order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Get the number of registered strategies.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered strategies.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
