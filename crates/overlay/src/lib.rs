//! Overlay - text annotation planning for PDF documents
//!
//! This crate provides:
//! - The wire schema for positioned text annotations
//! - The page placement planner (validate, group by page, reshape)
//! - The applier that drives a `pdf_core::PdfDocument` from a plan
//!
//! # Example
//!
//! ```ignore
//! use overlay::{apply_plan, plan, parse_textboxes, DEFAULT_FONT_NAME};
//! use pdf_core::PdfDocument;
//!
//! let boxes = parse_textboxes(textboxes_json)?;
//! let batches = plan(&boxes);
//!
//! let mut doc = PdfDocument::open_from_bytes(&pdf_bytes)?;
//! doc.add_font(DEFAULT_FONT_NAME, &font_bytes)?;
//! apply_plan(&mut doc, &batches, DEFAULT_FONT_NAME)?;
//! let output = doc.to_bytes()?;
//! ```

mod applier;
mod planner;
mod schema;

pub use applier::{apply_plan, DEFAULT_FONT_NAME};
pub use planner::{plan, DrawInstruction, PageBatch};
pub use schema::{parse_textboxes, TextBox};

use thiserror::Error;

/// Errors that can occur while applying an overlay plan
///
/// Planning itself never fails: malformed annotation entries are silently
/// dropped rather than reported, so junk entries in a bulk submission do
/// not abort processing of their valid siblings.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Failed to parse annotations: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),
}

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;
