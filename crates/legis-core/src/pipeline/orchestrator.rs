//! Document ingestion orchestrator.
//!
//! Coordinates extraction, cleaning, segmentation, record persistence and
//! archiving for every pending file in the input folder.

use std::fs;
use std::path::Path;

use legis_extractors::{ExtractionOutcome, ExtractionPipeline, ExtractorOptions};
use tracing::{debug, info, warn};

use crate::cleaner::Cleaner;
use crate::config::PipelineConfig;
use crate::error::{LegisError, LegisResult};
use crate::segmenter::segment;
use crate::status::{move_error_message, moved_message, STATUS_COMPLETED, STATUS_STARTED};
use crate::store::{FsArchiver, RecordWriter};
use crate::traits::{Archiver, DocumentExtractor, StatusReporter};
use crate::types::{
    wall_clock, DocumentRecord, FileOutcome, FileResult, RunSummary, SkipReason, SourceDocument,
};

/// Runs one pass over the input folder.
///
/// Workflow per file:
/// 1. Derive the format from the extension and extract raw text
/// 2. Clean and segment the text
/// 3. Write `<stem>.json` into the output folder
/// 4. Move the source into the archive folder
///
/// Files are handled one at a time. A failing file never stops the run; only
/// an unusable input, output or archive folder does.
pub struct DocumentPipeline {
    config: PipelineConfig,
    extractor: Box<dyn DocumentExtractor>,
    archiver: Box<dyn Archiver>,
    cleaner: Cleaner,
    writer: RecordWriter,
}

impl DocumentPipeline {
    /// Create a pipeline with the default extraction chains.
    pub fn new(config: PipelineConfig) -> Self {
        let cleaner = Cleaner::new().with_date_normalization(config.normalize_dates);
        let writer = RecordWriter::new(config.output_dir.clone());
        let extraction = ExtractionPipeline::with_options(ExtractorOptions {
            docx_tables: config.docx_tables,
        });
        debug!(
            strategies = ?extraction.strategy_names(),
            docx_tables = config.docx_tables,
            "Extraction strategies registered"
        );
        Self {
            config,
            extractor: Box::new(extraction),
            archiver: Box::new(FsArchiver),
            cleaner,
            writer,
        }
    }

    /// Replace the extraction seam.
    pub fn with_extractor(mut self, extractor: impl DocumentExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replace the archive seam.
    pub fn with_archiver(mut self, archiver: impl Archiver + 'static) -> Self {
        self.archiver = Box::new(archiver);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every pending file and report progress through `status`.
    pub fn run(&self, status: &dyn StatusReporter) -> LegisResult<RunSummary> {
        self.prepare()?;

        let started_at = wall_clock::now();
        report(status, STATUS_STARTED);

        let pending = self.pending_documents()?;
        info!(
            input = %self.config.input_dir.display(),
            files = pending.len(),
            "Pipeline run started"
        );

        let mut outcomes = Vec::with_capacity(pending.len());
        for doc in &pending {
            let result = self.process(doc, status);
            debug!(file = %doc.file_name, result = ?result, "File processed");
            outcomes.push(FileOutcome::new(doc.file_name.clone(), result));
        }

        report(status, STATUS_COMPLETED);

        let summary = RunSummary {
            started_at,
            finished_at: wall_clock::now(),
            outcomes,
        };
        info!(
            succeeded = summary.succeeded(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "Pipeline run completed"
        );
        Ok(summary)
    }

    /// Create output and archive folders. The only fatal step of a run.
    fn prepare(&self) -> LegisResult<()> {
        self.config.validate()?;

        let input = &self.config.input_dir;
        if !input.is_dir() {
            return Err(LegisError::startup(
                input.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "input folder does not exist"),
            ));
        }

        for dir in [self.config.output_dir.clone(), self.config.archive_dir()] {
            fs::create_dir_all(&dir).map_err(|e| LegisError::startup(dir.clone(), e))?;
        }
        Ok(())
    }

    /// Regular files in the input folder, sorted by name.
    fn pending_documents(&self) -> LegisResult<Vec<SourceDocument>> {
        let input = &self.config.input_dir;
        let entries = fs::read_dir(input).map_err(|e| LegisError::startup(input.clone(), e))?;

        let mut docs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !is_regular_file(&path) {
                continue;
            }
            match SourceDocument::from_path(path) {
                Some(doc) => docs.push(doc),
                None => warn!(path = %entry.path().display(), "Skipping non UTF-8 file name"),
            }
        }

        docs.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(docs)
    }

    fn process(&self, doc: &SourceDocument, status: &dyn StatusReporter) -> FileResult {
        let extracted = match self.extractor.extract_file(&doc.path) {
            ExtractionOutcome::Extracted(text) => text,
            ExtractionOutcome::Unsupported(ext) => {
                debug!(file = %doc.file_name, extension = %ext, "Unsupported format");
                return FileResult::Skipped {
                    skip: SkipReason::Unsupported(ext),
                };
            }
            ExtractionOutcome::Empty { attempts } => {
                warn!(
                    file = %doc.file_name,
                    attempts = attempts.len(),
                    "No text extracted, leaving file in place"
                );
                return FileResult::Skipped {
                    skip: SkipReason::EmptyExtraction,
                };
            }
        };

        let cleaned = self.cleaner.clean(&extracted.text);
        let sections = segment(&cleaned);
        debug!(
            file = %doc.file_name,
            strategy = %extracted.strategy,
            sections = sections.len(),
            "Segmented document"
        );

        let record = DocumentRecord::new(doc.file_name.clone(), sections, &doc.path);
        let record_path = match self.writer.write(doc, &record) {
            Ok(path) => path,
            Err(e) => {
                warn!(file = %doc.file_name, error = %e, "Failed to write record");
                return FileResult::Failed {
                    error: e.to_string(),
                    record_path: None,
                };
            }
        };

        match self.archiver.archive(&doc.path, &self.config.archive_dir()) {
            Ok(archived_to) => {
                report(status, &moved_message(&doc.file_name));
                FileResult::Success {
                    record_path,
                    archived_to,
                }
            }
            Err(e) => {
                warn!(file = %doc.file_name, error = %e, "Failed to archive source");
                report(status, &move_error_message(&doc.file_name, &e));
                FileResult::Failed {
                    error: e.to_string(),
                    record_path: Some(record_path),
                }
            }
        }
    }
}

fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

fn report(status: &dyn StatusReporter, message: &str) {
    if let Err(e) = status.report(message) {
        warn!(error = %e, status = %message, "Failed to record status");
    }
}
