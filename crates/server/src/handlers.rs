//! HTTP handlers for the overlay service

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use overlay::{apply_plan, parse_textboxes, plan, PageBatch};
use pdf_core::PdfDocument;

use crate::error::ApiError;
use crate::models::OverlayRequest;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "Working..."
}

/// Download a PDF, overlay the submitted text boxes onto it, and return
/// the modified document
pub async fn overlay_pdf(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OverlayRequest>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let pdf_url = req
        .pdf_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Missing pdfUrl".to_string()))?;
    let textboxes_json = req
        .textboxes_json
        .ok_or_else(|| ApiError::InvalidRequest("Missing textboxesJson".to_string()))?;

    let boxes = parse_textboxes(&textboxes_json).map_err(ApiError::from)?;
    let batches = plan(&boxes);

    let job_id = Uuid::new_v4();
    let source_path = state.config.upload_dir.join(format!("source-{}.pdf", job_id));
    let output_path = state.config.output_dir.join(format!("output-{}.pdf", job_id));

    download_pdf(&state, &pdf_url, &source_path).await?;

    let result = render_overlay(&state, &source_path, &output_path, &batches).await;

    // Working files are removed whether or not the overlay succeeded
    cleanup(&source_path).await;
    cleanup(&output_path).await;

    let output = result?;

    tracing::info!(
        "Overlaid {} batches onto {} ({} bytes out)",
        batches.len(),
        pdf_url,
        output.len()
    );

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                "attachment; filename=\"modified.pdf\"".to_string(),
            ),
        ],
        output,
    ))
}

/// Fetch the source document and write it into the upload directory
async fn download_pdf(state: &AppState, url: &str, dest: &Path) -> Result<(), ApiError> {
    let response = state
        .http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ApiError::Fetch(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Fetch(e.to_string()))?;

    tokio::fs::write(dest, &bytes).await?;
    Ok(())
}

/// Run the blocking PDF work off the async runtime
async fn render_overlay(
    state: &AppState,
    source: &Path,
    output: &Path,
    batches: &[PageBatch],
) -> Result<Vec<u8>, ApiError> {
    let font_path = state.config.font_path.clone();
    let font_name = state.config.font_name.clone();
    let source = source.to_path_buf();
    let output = output.to_path_buf();
    let batches = batches.to_vec();

    tokio::task::spawn_blocking(move || {
        overlay_file(&source, &output, &batches, &font_path, &font_name)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))?
}

/// Open the source, apply the plan, and save the result
///
/// The rendered document is both written to the output directory and
/// returned as bytes for the response body.
fn overlay_file(
    source: &Path,
    output: &Path,
    batches: &[PageBatch],
    font_path: &Path,
    font_name: &str,
) -> Result<Vec<u8>, ApiError> {
    let font_data = std::fs::read(font_path)?;

    let mut doc = PdfDocument::open(source).map_err(overlay::OverlayError::from)?;
    doc.add_font(font_name, &font_data)
        .map_err(overlay::OverlayError::from)?;
    apply_plan(&mut doc, batches, font_name)?;

    let bytes = doc.to_bytes().map_err(overlay::OverlayError::from)?;
    std::fs::write(output, &bytes)?;
    Ok(bytes)
}

/// Remove a working file, logging instead of failing on error
async fn cleanup(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
