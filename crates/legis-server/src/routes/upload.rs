//! Document upload endpoint.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Longest stored file name, extension included.
const MAX_FILE_NAME_LEN: usize = 100;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Save one document into the input folder.
/// POST /upload (multipart, field `file`)
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let mut multipart = multipart.map_err(|_| ApiError::bad_request("No file part"))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?;
        upload = Some((file_name, data));
        break;
    }

    let (raw_name, data) = upload.ok_or_else(|| ApiError::bad_request("No file part"))?;
    if raw_name.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    if !state.config.is_allowed(&raw_name) {
        return Err(ApiError::bad_request("Invalid file type"));
    }
    let file_name = sanitize_filename(&raw_name)
        .filter(|name| state.config.is_allowed(name))
        .ok_or_else(|| ApiError::bad_request("Invalid file type"))?;

    let dir = state.config.upload_dir().to_path_buf();
    let bytes = data.len();
    let saved = {
        let (dir, name) = (dir.clone(), file_name.clone());
        tokio::task::spawn_blocking(move || save_upload(&dir, &name, &data))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
            .and_then(|r| r)
    };
    if let Err(e) = saved {
        error!(dir = %dir.display(), file = %file_name, error = %e, "Failed to save upload");
        return Err(ApiError::internal(format!("Failed to save file: {}", e)));
    }
    info!(file = %file_name, bytes, "Upload saved");

    if state.config.parse_on_upload {
        state.spawn_run();
    }

    Ok(Json(MessageResponse {
        message: format!("File {} uploaded successfully.", file_name),
    }))
}

/// Write an upload into `dir` under `file_name`.
///
/// The bytes are staged in a hidden `.part` file next to the target and
/// renamed into place once complete, so a concurrent pipeline run sees
/// either nothing or the whole document. Staging files carry the `part`
/// extension, which no extractor claims.
fn save_upload(dir: &Path, file_name: &str, data: &Bytes) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let mut part = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name))
        .suffix(".part")
        .tempfile_in(dir)?;
    part.write_all(data)?;
    part.as_file().sync_all()?;

    let target = dir.join(file_name);
    part.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}

/// Reduce a client supplied name to a safe single path component.
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`; every other character
/// becomes `_`, path separators and NUL are dropped, `..` runs are removed
/// and leading dots are stripped. Long names are shortened from the stem so
/// the extension survives. Returns `None` if nothing usable remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let mapped: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut sanitized = mapped;
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", "");
    }
    let sanitized = sanitized.trim_start_matches('.');

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '_' || c == '.') {
        return None;
    }

    if sanitized.len() <= MAX_FILE_NAME_LEN {
        return Some(sanitized.to_string());
    }
    let (stem, ext) = match sanitized.rsplit_once('.') {
        Some((stem, ext)) if ext.len() < MAX_FILE_NAME_LEN / 2 => (stem, format!(".{}", ext)),
        _ => (sanitized, String::new()),
    };
    let keep = MAX_FILE_NAME_LEN - ext.len();
    Some(format!("{}{}", &stem[..keep.min(stem.len())], ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_traversal() {
        let result = sanitize_filename("../../../etc/passwd.txt").unwrap();
        assert!(!result.contains(".."));
        assert!(!result.contains('/'));
        assert_eq!(result, "etcpasswd.txt");
    }

    #[test]
    fn test_sanitize_special_chars() {
        assert_eq!(
            sanitize_filename("my contract (v2).pdf").unwrap(),
            "my_contract__v2_.pdf"
        );
        assert_eq!(sanitize_filename("Bail_café.docx").unwrap(), "Bail_caf_.docx");
    }

    #[test]
    fn test_sanitize_windows_path() {
        let result = sanitize_filename("C:\\Users\\test\\lease.txt").unwrap();
        assert!(!result.contains('\\'));
        assert!(result.ends_with("lease.txt"));
    }

    #[test]
    fn test_sanitize_plain_names_unchanged() {
        assert_eq!(sanitize_filename("lease.txt").unwrap(), "lease.txt");
        assert_eq!(sanitize_filename("nda-2024_v3.docx").unwrap(), "nda-2024_v3.docx");
    }

    #[test]
    fn test_sanitize_hidden_and_empty() {
        assert_eq!(sanitize_filename(".hidden.txt").unwrap(), "hidden.txt");
        assert!(sanitize_filename("").is_none());
        assert!(sanitize_filename("...").is_none());
        assert!(sanitize_filename("///").is_none());
    }

    fn dir_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_upload_leaves_only_target() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");

        let saved = save_upload(&input, "lease.txt", &Bytes::from_static(b"Section 1")).unwrap();
        assert_eq!(saved, input.join("lease.txt"));
        assert_eq!(fs::read_to_string(&saved).unwrap(), "Section 1");
        assert_eq!(dir_names(&input), vec!["lease.txt"]);
    }

    #[test]
    fn test_save_upload_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lease.txt"), "old contents that are longer").unwrap();

        save_upload(dir.path(), "lease.txt", &Bytes::from_static(b"new")).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("lease.txt")).unwrap(), "new");
        assert_eq!(dir_names(dir.path()), vec!["lease.txt"]);
    }

    #[test]
    fn test_save_upload_failure_cleans_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lease.txt")).unwrap();
        fs::write(dir.path().join("lease.txt").join("keep"), "x").unwrap();

        assert!(save_upload(dir.path(), "lease.txt", &Bytes::from_static(b"new")).is_err());
        assert_eq!(dir_names(dir.path()), vec!["lease.txt"]);
    }

    #[test]
    fn test_sanitize_truncates_stem() {
        let long = format!("{}.pdf", "a".repeat(300));
        let result = sanitize_filename(&long).unwrap();
        assert_eq!(result.len(), MAX_FILE_NAME_LEN);
        assert!(result.ends_with(".pdf"));
    }
}
