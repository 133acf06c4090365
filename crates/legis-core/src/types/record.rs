//! Persisted records: one per processed document plus the status singleton.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::wall_clock;

/// Structured output for one source document, written as `<stem>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Source file name, extension included.
    pub document_name: String,
    /// Section blocks in reading order.
    pub content: Vec<String>,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(with = "wall_clock")]
    pub extracted_at: NaiveDateTime,
    /// Location of the source file when it was extracted.
    pub file_path: String,
}

impl DocumentRecord {
    /// Create a record stamped with the current local time.
    pub fn new(document_name: impl Into<String>, content: Vec<String>, file_path: &Path) -> Self {
        Self {
            document_name: document_name.into(),
            content,
            metadata: RecordMetadata {
                extracted_at: wall_clock::now(),
                file_path: file_path.to_string_lossy().into_owned(),
            },
        }
    }
}

/// Latest pipeline state. Overwritten on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: String,
    #[serde(with = "wall_clock")]
    pub timestamp: NaiveDateTime,
}

impl StatusRecord {
    /// Create a status stamped with the current local time.
    pub fn now(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            timestamp: wall_clock::now(),
        }
    }
}
