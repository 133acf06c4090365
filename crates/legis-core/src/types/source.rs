//! Source documents waiting in the input folder.

use std::path::{Path, PathBuf};

use legis_extractors::FormatTag;

/// Extension of every persisted document record.
pub const RECORD_EXTENSION: &str = "json";

/// A candidate file in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Full path in the input folder.
    pub path: PathBuf,
    /// File name, used as the document identity.
    pub file_name: String,
    /// Format derived from the extension.
    pub format: FormatTag,
}

impl SourceDocument {
    /// Build from a path. Returns `None` when the file name is not UTF-8.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        let format = FormatTag::from_path(&path);
        Some(Self {
            path,
            file_name,
            format,
        })
    }

    /// File name without its final extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name)
    }

    /// Name of the JSON record written for this document.
    pub fn record_file_name(&self) -> String {
        format!("{}.{}", self.stem(), RECORD_EXTENSION)
    }
}
