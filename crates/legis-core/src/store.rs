//! Record persistence and source archiving on the local filesystem.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{LegisError, LegisResult};
use crate::traits::Archiver;
use crate::types::{DocumentRecord, SourceDocument};

/// Writes document records as pretty JSON into the output folder.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    output_dir: PathBuf,
}

impl RecordWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the record for `source` is written to.
    pub fn record_path(&self, source: &SourceDocument) -> PathBuf {
        self.output_dir.join(source.record_file_name())
    }

    pub fn write(&self, source: &SourceDocument, record: &DocumentRecord) -> LegisResult<PathBuf> {
        let path = self.record_path(source);
        let json = serde_json::to_string_pretty(record)?;
        write_atomic(&path, json.as_bytes())?;
        debug!(path = %path.display(), sections = record.content.len(), "Wrote record");
        Ok(path)
    }

    /// Load a previously written record.
    pub fn read(&self, path: &Path) -> LegisResult<DocumentRecord> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Replace `path` with `contents` so readers see either the old or the new
/// file, never a partial one.
///
/// The bytes go to a temporary file in the same directory, which is then
/// renamed over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> LegisResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| LegisError::Io(e.error))?;
    Ok(())
}

/// Moves files into the archive folder. Never overwrites an existing
/// archive entry.
///
/// The entry is claimed with `hard_link`, which fails if the destination
/// exists. Across filesystems the file is copied into a destination opened
/// with `create_new` instead. The source is removed only once the archive
/// entry is complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArchiver;

impl Archiver for FsArchiver {
    fn archive(&self, source: &Path, archive_dir: &Path) -> LegisResult<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| LegisError::archive(source.display().to_string(), "no file name"))?;
        let display_name = file_name.to_string_lossy().into_owned();
        let target = archive_dir.join(file_name);

        match fs::hard_link(source, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(already_archived(display_name, &target));
            }
            Err(link_err) => {
                debug!(error = %link_err, "hard link failed, copying instead");
                if let Err(e) = copy_new(source, &target) {
                    if e.kind() == io::ErrorKind::AlreadyExists {
                        return Err(already_archived(display_name, &target));
                    }
                    return Err(LegisError::archive(display_name, e.to_string()));
                }
            }
        }

        if let Err(e) = fs::remove_file(source) {
            let _ = fs::remove_file(&target);
            return Err(LegisError::archive(display_name, e.to_string()));
        }

        Ok(target)
    }
}

fn already_archived(display_name: String, target: &Path) -> LegisError {
    LegisError::archive(
        display_name,
        format!("destination '{}' already exists", target.display()),
    )
}

/// Copy `source` to `target`, failing with `AlreadyExists` if `target` is
/// already present. A partial copy is removed.
fn copy_new(source: &Path, target: &Path) -> io::Result<()> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(target)?;
    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    if copied.is_err() {
        let _ = fs::remove_file(target);
    }
    copied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_written_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::new(dir.path());
        let source = SourceDocument::from_path(dir.path().join("nda.docx")).unwrap();
        let record = DocumentRecord::new("nda.docx", vec!["Clause 1".to_string()], &source.path);

        let path = writer.write(&source, &record).unwrap();
        assert_eq!(path, dir.path().join("nda.json"));
        assert_eq!(writer.read(&path).unwrap().content, vec!["Clause 1"]);
    }

    #[test]
    fn test_record_rewrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::new(dir.path());
        let source = SourceDocument::from_path(dir.path().join("nda.txt")).unwrap();

        for n in 0..3 {
            let record = DocumentRecord::new("nda.txt", vec![format!("Clause {n}")], &source.path);
            writer.write(&source, &record).unwrap();
        }

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["nda.json"]);
        let record = writer.read(&dir.path().join("nda.json")).unwrap();
        assert_eq!(record.content, vec!["Clause 2"]);
    }

    #[test]
    fn test_archive_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("archive");
        fs::create_dir(&archive).unwrap();
        let source = dir.path().join("lease.txt");
        fs::write(&source, "x").unwrap();

        let moved = FsArchiver.archive(&source, &archive).unwrap();
        assert_eq!(moved, archive.join("lease.txt"));
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(moved).unwrap(), "x");
    }

    #[test]
    fn test_archive_collision_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("archive");
        fs::create_dir(&archive).unwrap();
        fs::write(archive.join("lease.txt"), "old").unwrap();
        let source = dir.path().join("lease.txt");
        fs::write(&source, "new").unwrap();

        let err = FsArchiver.archive(&source, &archive).unwrap_err();
        assert!(matches!(err, LegisError::Archive { .. }));
        assert!(source.exists());
        assert_eq!(fs::read_to_string(archive.join("lease.txt")).unwrap(), "old");
    }

    #[test]
    fn test_archive_missing_source_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("archive");
        fs::create_dir(&archive).unwrap();

        let err = FsArchiver
            .archive(&dir.path().join("gone.txt"), &archive)
            .unwrap_err();
        match err {
            LegisError::Archive { file, message } => {
                assert_eq!(file, "gone.txt");
                assert!(!message.contains("already exists"), "{message}");
            }
            other => panic!("expected Archive error, got {:?}", other),
        }
        assert!(!archive.join("gone.txt").exists());
    }

    #[test]
    fn test_copy_new_refuses_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("lease.txt");
        let target = dir.path().join("copy.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&target, "old").unwrap();

        let err = copy_new(&source, &target).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");

        fs::remove_file(&target).unwrap();
        copy_new(&source, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_copy_new_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("copy.txt");

        let err = copy_new(&dir.path().join("missing.txt"), &target).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!target.exists());
    }

    #[test]
    fn test_missing_source_keeps_existing_archive_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("archive");
        fs::create_dir(&archive).unwrap();
        fs::write(archive.join("gone.txt"), "kept").unwrap();

        assert!(FsArchiver
            .archive(&dir.path().join("gone.txt"), &archive)
            .is_err());
        assert_eq!(fs::read_to_string(archive.join("gone.txt")).unwrap(), "kept");
    }
}
