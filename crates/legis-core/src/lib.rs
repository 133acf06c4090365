//! legis-core - Core library for legis.
//!
//! This crate provides the cleaning and segmentation stages, the record and
//! status types, and the [`DocumentPipeline`] that ties extraction, cleaning,
//! segmentation and archiving together.
//!
//! # Example
//!
//! ```ignore
//! use legis_core::{DocumentPipeline, JsonStatusFile, PipelineConfig};
//!
//! let config = PipelineConfig::from_env();
//! let status = JsonStatusFile::new(config.status_file.clone());
//! let summary = DocumentPipeline::new(config).run(&status)?;
//! println!("{} documents ingested", summary.succeeded());
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod segmenter;
pub mod status;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use cleaner::{clean, Cleaner};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{ErrorCode, LegisError, LegisResult};
pub use pipeline::DocumentPipeline;
pub use segmenter::segment;
pub use status::{JsonStatusFile, MemoryStatus, TracingStatus, STATUS_COMPLETED, STATUS_STARTED};
pub use store::{FsArchiver, RecordWriter};
pub use traits::{Archiver, DocumentExtractor, StatusReporter};
pub use types::{
    DocumentRecord, FileOutcome, FileResult, RecordMetadata, RunSummary, SkipReason,
    SourceDocument, StatusRecord,
};
