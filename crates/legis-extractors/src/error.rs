//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during text extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Extraction process failed.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Source file could not be read.
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// Text file is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// PDF-specific extraction error.
    #[cfg(feature = "pdf")]
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// DOCX-specific extraction error.
    #[cfg(feature = "docx")]
    #[error("DOCX extraction error: {0}")]
    Docx(String),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
