//! Server configuration.

use std::path::{Path, PathBuf};

use legis_core::config::parse_flag;
use legis_core::{LegisError, LegisResult, PipelineConfig};
use serde::{Deserialize, Serialize};

/// Extensions accepted by `POST /upload` when nothing else is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where uploads are saved. Defaults to the pipeline input folder.
    pub upload_dir: Option<PathBuf>,
    /// Lowercase extensions, without the dot.
    pub allowed_extensions: Vec<String>,
    /// Start a background run after every successful upload.
    pub parse_on_upload: bool,
    /// Request body cap for uploads.
    pub max_upload_bytes: usize,
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            upload_dir: None,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            parse_on_upload: true,
            max_upload_bytes: 50 * 1024 * 1024,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> LegisResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| LegisError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| LegisError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| LegisError::Configuration(e.to_string())),
            _ => Err(LegisError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> LegisResult<Self> {
        Self::default().merge_env()
    }

    /// Apply `LEGIS_*` environment overrides.
    pub fn merge_env(mut self) -> LegisResult<Self> {
        if let Ok(host) = std::env::var("LEGIS_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("LEGIS_PORT") {
            self.port = port.parse().map_err(|_| {
                LegisError::Configuration(format!("LEGIS_PORT must be a valid port, got '{port}'"))
            })?;
        }
        if let Ok(dir) = std::env::var("LEGIS_UPLOAD_DIR") {
            self.upload_dir = Some(PathBuf::from(dir));
        }
        if let Ok(list) = std::env::var("LEGIS_ALLOWED_EXTENSIONS") {
            self.allowed_extensions = parse_extensions(&list);
        }
        if let Ok(flag) = std::env::var("LEGIS_PARSE_ON_UPLOAD") {
            self.parse_on_upload = parse_flag(&flag).unwrap_or(self.parse_on_upload);
        }
        if let Ok(bytes) = std::env::var("LEGIS_MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = bytes.parse().map_err(|_| {
                LegisError::Configuration(format!(
                    "LEGIS_MAX_UPLOAD_BYTES must be a byte count, got '{bytes}'"
                ))
            })?;
        }
        self.pipeline = self.pipeline.merge_env();
        Ok(self)
    }

    pub fn upload_dir(&self) -> &Path {
        self.upload_dir
            .as_deref()
            .unwrap_or(self.pipeline.input_dir.as_path())
    }

    /// Whether `file_name` carries an allowed extension (case-insensitive).
    pub fn is_allowed(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_ascii_lowercase();
                self.allowed_extensions.iter().any(|a| *a == ext)
            }
            None => false,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma separated extension list, dropping dots and blanks.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
