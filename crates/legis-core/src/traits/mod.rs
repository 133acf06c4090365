//! Seams of the ingestion pipeline.

mod archiver;
mod extractor;
mod status;

pub use archiver::*;
pub use extractor::*;
pub use status::*;
