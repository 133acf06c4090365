//! legis-parse - run the ingestion pipeline once over the input folder.
//!
//! Configuration comes from `--config` (TOML, JSON or YAML) when given,
//! otherwise from the `LEGIS_*` environment variables. Command line flags
//! override both. The run summary is printed to stdout as JSON; logs go to
//! stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use legis_core::{DocumentPipeline, JsonStatusFile, PipelineConfig, StatusReporter, TracingStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Folder holding pending documents.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Folder receiving the JSON records.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Keep `DD/MM/YYYY` dates as written.
    #[arg(long)]
    keep_dates: bool,
    /// Include text from DOCX tables.
    #[arg(long)]
    docx_tables: bool,
    /// Log status updates instead of writing the status file.
    #[arg(long)]
    no_status_file: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    match run(Args::parse()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of files that failed.
fn run(args: Args) -> Result<usize> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .merge_env(),
        None => PipelineConfig::from_env(),
    };
    if let Some(input) = args.input {
        config.input_dir = input;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if args.keep_dates {
        config.normalize_dates = false;
    }
    if args.docx_tables {
        config.docx_tables = true;
    }

    let status: Box<dyn StatusReporter> = if args.no_status_file {
        Box::new(TracingStatus)
    } else {
        Box::new(JsonStatusFile::new(config.status_file.clone()))
    };
    let summary = DocumentPipeline::new(config)
        .run(status.as_ref())
        .context("pipeline run aborted")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(summary.failed())
}
