//! Ingestion pipeline.

mod orchestrator;

pub use orchestrator::DocumentPipeline;
