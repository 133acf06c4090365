//! Status reporter implementations.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use crate::error::{LegisError, LegisResult};
use crate::store::write_atomic;
use crate::traits::StatusReporter;
use crate::types::StatusRecord;

/// Status message written when a run begins.
pub const STATUS_STARTED: &str = "Parsing started...";
/// Status message written when a run ends.
pub const STATUS_COMPLETED: &str = "Parsing completed!";

pub fn moved_message(file_name: &str) -> String {
    format!("Moved file {} to archive.", file_name)
}

pub fn move_error_message(file_name: &str, error: &impl std::fmt::Display) -> String {
    format!("Error moving {}: {}", file_name, error)
}

/// The persisted status singleton: one JSON object, overwritten per update.
#[derive(Debug, Clone)]
pub struct JsonStatusFile {
    path: PathBuf,
}

impl JsonStatusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current status. `None` if nothing has been written yet.
    pub fn read(&self) -> LegisResult<Option<StatusRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LegisError::Io(e)),
        }
    }

    /// Replace the status file atomically; concurrent readers never see a
    /// partially written record.
    pub fn write(&self, record: &StatusRecord) -> LegisResult<()> {
        let json = serde_json::to_string_pretty(record)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

impl StatusReporter for JsonStatusFile {
    fn report(&self, status: &str) -> LegisResult<()> {
        info!(status = %status, "Status update");
        self.write(&StatusRecord::now(status))
    }
}

/// Keeps every update in memory, in order.
#[derive(Debug, Default)]
pub struct MemoryStatus {
    records: Mutex<Vec<StatusRecord>>,
}

impl MemoryStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All status messages reported so far.
    pub fn history(&self) -> Vec<String> {
        self.records
            .lock()
            .map(|r| r.iter().map(|s| s.status.clone()).collect())
            .unwrap_or_default()
    }

    /// The last reported status, as the status file would hold it.
    pub fn latest(&self) -> Option<StatusRecord> {
        self.records.lock().ok().and_then(|r| r.last().cloned())
    }
}

impl StatusReporter for MemoryStatus {
    fn report(&self, status: &str) -> LegisResult<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| LegisError::Configuration("status history lock poisoned".to_string()))?;
        records.push(StatusRecord::now(status));
        Ok(())
    }
}

/// Logs updates and persists nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatus;

impl StatusReporter for TracingStatus {
    fn report(&self, status: &str) -> LegisResult<()> {
        info!(status = %status, "Status update");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let status = JsonStatusFile::new(dir.path().join("data").join("status.json"));

        assert!(status.read().unwrap().is_none());

        status.report(STATUS_STARTED).unwrap();
        status.report(STATUS_COMPLETED).unwrap();

        let record = status.read().unwrap().unwrap();
        assert_eq!(record.status, STATUS_COMPLETED);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(status.path()).unwrap()).unwrap();
        assert_eq!(raw.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_status_file_readable_during_rewrites() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let status = Arc::new(JsonStatusFile::new(dir.path().join("status.json")));
        status.report(STATUS_STARTED).unwrap();

        let writer = {
            let status = Arc::clone(&status);
            thread::spawn(move || {
                for n in 0..200 {
                    status.report(&moved_message(&format!("doc-{n}.txt"))).unwrap();
                }
            })
        };

        let mut reads = 0;
        while !writer.is_finished() || reads < 50 {
            let record = status.read().unwrap().expect("status present");
            assert!(!record.status.is_empty());
            reads += 1;
        }
        writer.join().unwrap();

        assert_eq!(
            status.read().unwrap().unwrap().status,
            moved_message("doc-199.txt")
        );
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["status.json"]);
    }

    #[test]
    fn test_memory_status_history() {
        let status = MemoryStatus::new();
        status.report("one").unwrap();
        status.report("two").unwrap();

        assert_eq!(status.history(), vec!["one", "two"]);
        assert_eq!(status.latest().unwrap().status, "two");
    }

    #[test]
    fn test_messages() {
        assert_eq!(moved_message("a.txt"), "Moved file a.txt to archive.");
        let msg = move_error_message("a.txt", &"denied");
        assert!(msg.starts_with("Error moving a.txt"));
    }
}
