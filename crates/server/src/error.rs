//! Error types for the overlay service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use overlay::OverlayError;
use pdf_core::PdfError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to fetch document: {0}")]
    Fetch(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Overlay failed: {0}")]
    Overlay(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<OverlayError> for ApiError {
    fn from(e: OverlayError) -> Self {
        match e {
            OverlayError::ParseError(e) => {
                ApiError::InvalidRequest(format!("Invalid textboxesJson: {}", e))
            }
            OverlayError::PdfError(PdfError::OpenError(msg)) => ApiError::UnreadableDocument(msg),
            OverlayError::PdfError(e) => ApiError::Overlay(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Fetch(msg) => {
                tracing::warn!("Fetch failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to fetch source document".to_string(),
                )
            }
            ApiError::UnreadableDocument(msg) => {
                tracing::warn!("Unreadable document: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Source document could not be opened as a PDF".to_string(),
                )
            }
            ApiError::Overlay(e) => {
                tracing::error!("Overlay failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Overlay failed".to_string())
            }
            ApiError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
