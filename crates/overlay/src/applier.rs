//! Applying a placement plan to a PDF document

use crate::planner::PageBatch;
use crate::Result;
use pdf_core::{Color, PdfDocument, PdfError};

/// The single font identity registered for overlay text
pub const DEFAULT_FONT_NAME: &str = "Janna";

/// Apply a placement plan to an open document
///
/// Batches are applied in plan order; within a batch, instructions are
/// drawn in emitted order. Overlay text is always black. Wire page
/// indices use the document editor's convention directly: page 1 is the
/// first page, and page 0 or a page beyond the document bounds fails
/// with `PdfError::InvalidPage`.
///
/// A batch's target page is validated before any font state is touched,
/// so an out-of-range page surfaces as `InvalidPage` even when no font
/// has been registered yet.
pub fn apply_plan(doc: &mut PdfDocument, batches: &[PageBatch], font_name: &str) -> Result<()> {
    doc.set_text_color(Color::black());
    let page_count = doc.page_count();

    for batch in batches {
        let page = batch.page as usize;
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count).into());
        }

        for instruction in &batch.instructions {
            doc.set_font(font_name, instruction.font_size as f32)?;
            doc.insert_text(&instruction.text, page, instruction.x, instruction.y)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_name() {
        assert_eq!(DEFAULT_FONT_NAME, "Janna");
    }
}
