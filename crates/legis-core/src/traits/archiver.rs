//! Archiving of processed source files.

use std::path::{Path, PathBuf};

use crate::error::LegisResult;

/// Moves a processed source file out of the input folder.
pub trait Archiver: Send + Sync {
    /// Move `source` into `archive_dir` under the same file name and return
    /// the new path.
    fn archive(&self, source: &Path, archive_dir: &Path) -> LegisResult<PathBuf>;
}
