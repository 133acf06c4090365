//! Error handling for the upload server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legis_core::LegisError;
use serde::Serialize;
use thiserror::Error;

/// API error type.
#[derive(Debug, Error)]
#[error("[{status}] {code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

/// Error response body. Clients read `message`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
            code: self.code,
        };

        (self.status, Json(body)).into_response()
    }
}

// Pipeline errors are never the client's fault.
impl From<LegisError> for ApiError {
    fn from(err: LegisError) -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            err.code().as_str(),
            err.to_string(),
        )
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_legis_error() {
        let err: ApiError = LegisError::archive("a.txt", "busy").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "ARCH_001");
        assert!(err.message.contains("a.txt"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::bad_request("No file part");
        assert_eq!(err.to_string(), "[400 Bad Request] BAD_REQUEST: No file part");
    }

    #[test]
    fn test_boxes_as_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> = ApiError::internal("disk full").into();
        assert_eq!(
            err.to_string(),
            "[500 Internal Server Error] INTERNAL_ERROR: disk full"
        );
        assert!(err.source().is_none());
    }
}
