//! Per-file outcomes and the run summary.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::wall_clock;

/// Why a file was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "extension", rename_all = "snake_case")]
pub enum SkipReason {
    /// No strategy handles this extension.
    Unsupported(String),
    /// Every strategy failed or returned only whitespace.
    EmptyExtraction,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FileResult {
    /// Record written and source archived.
    Success {
        record_path: PathBuf,
        archived_to: PathBuf,
    },
    /// Nothing written, source left in place.
    Skipped { skip: SkipReason },
    /// Processing failed. `record_path` is set when the record was written
    /// but the archive move did not happen.
    Failed {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        record_path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file_name: String,
    #[serde(flatten)]
    pub result: FileResult,
}

impl FileOutcome {
    pub fn new(file_name: impl Into<String>, result: FileResult) -> Self {
        Self {
            file_name: file_name.into(),
            result,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, FileResult::Success { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.result, FileResult::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.result, FileResult::Failed { .. })
    }
}

/// Everything one pipeline run did, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(with = "wall_clock")]
    pub started_at: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub finished_at: NaiveDateTime,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Outcome for a given file name, if it was seen.
    pub fn outcome(&self, file_name: &str) -> Option<&FileOutcome> {
        self.outcomes.iter().find(|o| o.file_name == file_name)
    }
}
