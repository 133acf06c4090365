//! Configuration system for legis.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::{LegisError, LegisResult};

/// Pipeline configuration: where documents come from and where output goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Folder scanned for pending documents.
    pub input_dir: PathBuf,
    /// Folder receiving `<stem>.json` records.
    pub output_dir: PathBuf,
    /// Name of the archive subfolder inside `output_dir`.
    pub archive_dir_name: String,
    /// Location of the status singleton.
    pub status_file: PathBuf,
    /// Rewrite `DD/MM/YYYY` dates to `YYYY-MM-DD` while cleaning.
    pub normalize_dates: bool,
    /// Read paragraphs inside DOCX tables as well as body paragraphs.
    pub docx_tables: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("data").join("processed"),
            archive_dir_name: "archive".to_string(),
            status_file: PathBuf::from("data").join("status.json"),
            normalize_dates: true,
            docx_tables: false,
        }
    }
}

impl PipelineConfig {
    /// Full path of the archive folder.
    pub fn archive_dir(&self) -> PathBuf {
        self.output_dir.join(&self.archive_dir_name)
    }

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
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply `LEGIS_*` environment overrides.
    pub fn merge_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("LEGIS_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("LEGIS_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(name) = std::env::var("LEGIS_ARCHIVE_DIR") {
            self.archive_dir_name = name;
        }
        if let Ok(path) = std::env::var("LEGIS_STATUS_FILE") {
            self.status_file = PathBuf::from(path);
        }
        if let Ok(flag) = std::env::var("LEGIS_NORMALIZE_DATES") {
            self.normalize_dates = parse_flag(&flag).unwrap_or(self.normalize_dates);
        }
        if let Ok(flag) = std::env::var("LEGIS_DOCX_TABLES") {
            self.docx_tables = parse_flag(&flag).unwrap_or(self.docx_tables);
        }
        self
    }

    /// Reject settings that would make the archive step misbehave.
    pub fn validate(&self) -> LegisResult<()> {
        let mut components = Path::new(&self.archive_dir_name).components();
        let single_normal = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();
        if !single_normal {
            return Err(LegisError::Configuration(format!(
                "archive_dir_name must be a single folder name, got '{}'",
                self.archive_dir_name
            )));
        }
        Ok(())
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Parse `1/0`, `true/false`, `yes/no`, `on/off`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for PipelineConfig.
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the input folder.
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    /// Set the output folder.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Set the archive subfolder name.
    pub fn archive_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.archive_dir_name = name.into();
        self
    }

    /// Set the status file path.
    pub fn status_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.status_file = path.into();
        self
    }

    /// Enable or disable date normalization.
    pub fn normalize_dates(mut self, enabled: bool) -> Self {
        self.config.normalize_dates = enabled;
        self
    }

    /// Include DOCX table text.
    pub fn docx_tables(mut self, enabled: bool) -> Self {
        self.config.docx_tables = enabled;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.archive_dir(), PathBuf::from("data/processed/archive"));
        assert!(config.normalize_dates);
        assert!(!config.docx_tables);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::builder()
            .input_dir("/srv/in")
            .output_dir("/srv/out")
            .archive_dir_name("done")
            .normalize_dates(false)
            .build();
        assert_eq!(config.archive_dir(), PathBuf::from("/srv/out/done"));
        assert!(!config.normalize_dates);
    }

    #[test]
    fn test_from_toml_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legis.toml");
        std::fs::write(
            &path,
            "input_dir = \"/tmp/in\"\nnormalize_dates = false\ndocx_tables = true\n",
        )
        .unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/tmp/in"));
        assert!(!config.normalize_dates);
        assert!(config.docx_tables);
        assert_eq!(config.archive_dir_name, "archive");
    }

    #[test]
    fn test_from_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("legis.yaml");
        std::fs::write(&yaml, "output_dir: /tmp/out\n").unwrap();
        assert_eq!(
            PipelineConfig::from_file(&yaml).unwrap().output_dir,
            PathBuf::from("/tmp/out")
        );

        let json = dir.path().join("legis.json");
        std::fs::write(&json, r#"{"archive_dir_name": "old"}"#).unwrap();
        assert_eq!(PipelineConfig::from_file(&json).unwrap().archive_dir_name, "old");
    }

    #[test]
    fn test_unknown_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legis.ini");
        std::fs::write(&path, "x=1").unwrap();
        assert!(matches!(
            PipelineConfig::from_file(&path),
            Err(LegisError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nested_archive() {
        let config = PipelineConfig::builder().archive_dir_name("../escape").build();
        assert!(config.validate().is_err());
        let config = PipelineConfig::builder().archive_dir_name("").build();
        assert!(config.validate().is_err());
        let config = PipelineConfig::builder().archive_dir_name("..").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
