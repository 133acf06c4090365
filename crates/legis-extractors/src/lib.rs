//! legis-extractors - Text extraction for legal document ingestion.
//!
//! Provides extractors for plain text, PDF and DOCX content behind a single
//! trait. Each document format owns an ordered chain of extraction
//! strategies; the pipeline tries them in order and stops at the first one
//! that produces non-empty text.
//!
//! # Features
//!
//! - `pdf` (default) - PDF extraction via pdf-extract, with a lopdf fallback
//! - `docx` (default) - DOCX extraction via docx-rs
//! - `full` - All extraction features
//!
//! # Example
//!
//! ```ignore
//! use legis_extractors::{ExtractionOutcome, ExtractionPipeline};
//!
//! let pipeline = ExtractionPipeline::with_defaults();
//! match pipeline.extract_file(Path::new("docs/lease.pdf")) {
//!     ExtractionOutcome::Extracted(text) => println!("{} via {}", text.len(), text.strategy),
//!     ExtractionOutcome::Empty { attempts } => eprintln!("{} strategies failed", attempts.len()),
//!     ExtractionOutcome::Unsupported(ext) => eprintln!("skipping .{ext}"),
//! }
//! ```

mod error;
mod factory;
mod pipeline;
mod text;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

pub use error::{ExtractError, ExtractResult};
pub use factory::{ExtractorFactory, ExtractorOptions};
pub use pipeline::ExtractionPipeline;
pub use text::PlainTextExtractor;
pub use types::{ExtractedText, ExtractionOutcome, FormatTag, StrategyFailure};

#[cfg(feature = "pdf")]
pub use pdf::{PdfLayoutExtractor, PdfLenientExtractor};

#[cfg(feature = "docx")]
pub use docx::DocxExtractor;

/// Core Extractor trait - every extraction strategy implements this.
///
/// Extraction is synchronous; callers that live on an async runtime are
/// expected to move the whole pipeline run onto a blocking task.
pub trait Extractor: Send + Sync {
    /// Extract text content from raw file bytes.
    fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedText>;

    /// Document formats this strategy can handle.
    fn supported_formats(&self) -> &[FormatTag];

    /// Check if this strategy handles the given format.
    fn supports(&self, format: FormatTag) -> bool {
        self.supported_formats().contains(&format)
    }

    /// Human-readable strategy name, recorded on the extracted text.
    fn name(&self) -> &str;
}
