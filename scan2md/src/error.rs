use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to callers for system-side failures. The underlying
/// cause is logged server-side and never echoed.
pub const GENERIC_FAILURE_MESSAGE: &str = "OCR processing failed. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("No API key provided")]
    MissingCredential,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes (max {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    #[error("Scratch storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("OCR provider timed out after {0} ms")]
    ProviderTimeout(u64),

    #[error("OCR provider error: {0}")]
    Provider(String),
}

impl AppError {
    /// True for failures attributable to the request itself. Their messages
    /// are safe to echo verbatim; everything else is generalized.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingFile
                | AppError::MissingCredential
                | AppError::UnsupportedType(_)
                | AppError::TooLarge { .. }
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = if self.is_caller_error() {
            (StatusCode::BAD_REQUEST, self.to_string())
        } else {
            tracing::error!(error = %self, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                GENERIC_FAILURE_MESSAGE.to_string(),
            )
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
