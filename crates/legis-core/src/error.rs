//! Error types for legis operations.
//!
//! Only `Startup` aborts a pipeline run. Every other variant is absorbed at
//! the file level and surfaced through the run summary and status updates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for legis operations.
pub type LegisResult<T> = Result<T, LegisError>;

/// Main error type for all legis operations.
#[derive(Error, Debug)]
pub enum LegisError {
    /// Input, output or archive location cannot be prepared.
    #[error("Startup error: cannot prepare '{}': {source}", path.display())]
    Startup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Moving a processed file into the archive failed.
    #[error("Archive error for '{file}': {message}")]
    Archive { file: String, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    StartupFailed,
    ConfigInvalid,
    ArchiveMoveFailed,
    IoFailed,
    SerializationFailed,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::StartupFailed => "START_001",
            ErrorCode::ConfigInvalid => "CFG_001",
            ErrorCode::ArchiveMoveFailed => "ARCH_001",
            ErrorCode::IoFailed => "IO_001",
            ErrorCode::SerializationFailed => "SER_001",
        }
    }
}

impl LegisError {
    /// Create a startup error for a path.
    pub fn startup(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Startup {
            path: path.into(),
            source,
        }
    }

    /// Create an archive error.
    pub fn archive(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Archive {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborts a pipeline run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Startup { .. })
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Startup { .. } => ErrorCode::StartupFailed,
            Self::Configuration(_) => ErrorCode::ConfigInvalid,
            Self::Archive { .. } => ErrorCode::ArchiveMoveFailed,
            Self::Io(_) => ErrorCode::IoFailed,
            Self::Serialization(_) => ErrorCode::SerializationFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_error_is_fatal() {
        let err = LegisError::startup(
            "/nope/out",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_fatal());
        assert_eq!(err.code(), ErrorCode::StartupFailed);
        assert!(err.to_string().contains("/nope/out"));
    }

    #[test]
    fn test_archive_error_is_not_fatal() {
        let err = LegisError::archive("lease.txt", "already exists");
        assert!(!err.is_fatal());
        assert_eq!(err.code().as_str(), "ARCH_001");
        assert!(err.to_string().contains("lease.txt"));
    }
}
