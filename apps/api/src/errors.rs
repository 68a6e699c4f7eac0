use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::pdf::RenderError;
use crate::llm_client::LlmError;
use crate::parser::ParseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Unparseable upload: {0}")]
    UnparseableUpload(String),

    #[error("Enhancement disabled: GEMINI_API_KEY is not configured")]
    EnhancementDisabled,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("PDF export unavailable: {0}")]
    PdfUnavailable(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnsupportedExtension(ext) => AppError::UnsupportedFormat(ext),
            other => AppError::UnparseableUpload(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(ext) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file type '{ext}'. Upload a PDF or DOCX file."),
            ),
            AppError::UnparseableUpload(msg) => {
                tracing::warn!("Upload could not be parsed: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPARSEABLE_UPLOAD",
                    "The uploaded resume could not be read. Please enter your details manually."
                        .to_string(),
                )
            }
            AppError::EnhancementDisabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ENHANCEMENT_DISABLED",
                "AI enhancement is disabled because no API key is configured".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The AI service could not process the request. Check the API key and network connection."
                        .to_string(),
                )
            }
            AppError::PdfUnavailable(e) => {
                tracing::warn!("PDF render failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PDF_UNAVAILABLE",
                    "PDF export is unavailable right now. Word export is still available."
                        .to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
