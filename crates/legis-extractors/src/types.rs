//! Core types for text extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Document format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    /// PDF document.
    Pdf,
    /// Microsoft Word document.
    Docx,
    /// Plain UTF-8 text.
    Text,
    /// Anything else.
    Unsupported,
}

impl FormatTag {
    /// Map a file extension (without the dot) to a format, ignoring case.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => FormatTag::Pdf,
            "docx" => FormatTag::Docx,
            "txt" => FormatTag::Text,
            _ => FormatTag::Unsupported,
        }
    }

    /// Map a path to a format using its extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(FormatTag::Unsupported)
    }

    /// Lowercase file extension this format is read from; empty for
    /// `Unsupported`.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatTag::Pdf => "pdf",
            FormatTag::Docx => "docx",
            FormatTag::Text => "txt",
            FormatTag::Unsupported => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Pdf => "pdf",
            FormatTag::Docx => "docx",
            FormatTag::Text => "text",
            FormatTag::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text produced by one extraction strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Extracted text, not yet normalized.
    pub text: String,

    /// Format of the source document.
    pub format: FormatTag,

    /// Name of the strategy that produced the text.
    pub strategy: String,

    /// Page count, for paged formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,

    /// Additional format-specific metadata.
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedText {
    /// Create new extracted text.
    pub fn new(text: String, format: FormatTag, strategy: impl Into<String>) -> Self {
        Self {
            text,
            format,
            strategy: strategy.into(),
            pages: None,
            metadata: HashMap::new(),
        }
    }

    /// Record the page count.
    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}

/// One failed attempt in a strategy chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyFailure {
    pub strategy: String,
    pub error: String,
}

impl StrategyFailure {
    pub fn new(strategy: impl Into<String>, error: impl ToString) -> Self {
        Self {
            strategy: strategy.into(),
            error: error.to_string(),
        }
    }
}

/// Result of running a file through its format's strategy chain.
///
/// `Unsupported` is kept apart from `Empty` so callers can tell "nothing to
/// do" from "every strategy failed".
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    /// A strategy produced non-empty text.
    Extracted(ExtractedText),
    /// Every strategy failed or returned only whitespace.
    Empty { attempts: Vec<StrategyFailure> },
    /// No strategy handles this file; carries the lowercased extension,
    /// empty when there is none.
    Unsupported(String),
}

impl ExtractionOutcome {
    /// The extracted text, if any.
    pub fn text(&self) -> Option<&ExtractedText> {
        match self {
            ExtractionOutcome::Extracted(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted(_))
    }
}
