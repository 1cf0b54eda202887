//! Page placement planning
//!
//! Maps a flat list of annotation requests onto per-page batches of draw
//! instructions: filter out incomplete entries, group the rest by target
//! page in first-seen order, and reshape each text for the left-to-right
//! drawing primitive.

use crate::schema::TextBox;
use arabic_text::reshape_bidirectional;

/// Vertical correction applied to every draw instruction, compensating
/// for the difference between the caller's coordinate convention and the
/// text-drawing anchor. Must stay at 5 for output compatibility.
const BASELINE_OFFSET: f64 = 5.0;

/// A fully resolved draw operation, ready for the document editor
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    /// Display-ready text (reshaped and visually reordered)
    pub text: String,
    /// X coordinate in document space
    pub x: f64,
    /// Y coordinate in document space, baseline-corrected
    pub y: f64,
    /// Font size in points
    pub font_size: f64,
}

/// The draw instructions destined for one page, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub struct PageBatch {
    /// Target page, passed through as the editor's 1-indexed page number
    pub page: u32,
    /// Draw instructions in the order the requests arrived
    pub instructions: Vec<DrawInstruction>,
}

/// Plan a list of text boxes into per-page draw batches
///
/// Incomplete boxes are silently dropped. Batches are emitted in the
/// order their page was first seen; within a batch, instructions keep
/// the arrival order of the original list. Planning never fails.
///
/// # Example
/// ```
/// use overlay::{plan, TextBox};
///
/// let boxes = vec![TextBox {
///     text: Some("hello".to_string()),
///     x: Some(10.0),
///     y: Some(20.0),
///     font_size: Some(12.0),
///     page: Some(1),
/// }];
/// let batches = plan(&boxes);
/// assert_eq!(batches.len(), 1);
/// assert_eq!(batches[0].instructions[0].y, 25.0);
/// ```
pub fn plan(boxes: &[TextBox]) -> Vec<PageBatch> {
    let mut batches: Vec<PageBatch> = Vec::new();

    for b in boxes {
        if !b.is_valid() {
            continue;
        }

        // is_valid() guarantees all fields are present
        let page = b.page.unwrap_or_default();
        let text = b.text.as_deref().unwrap_or_default();

        let instruction = DrawInstruction {
            text: reshape_bidirectional(text),
            x: b.x.unwrap_or_default(),
            y: b.y.unwrap_or_default() + BASELINE_OFFSET,
            font_size: b.font_size.unwrap_or_default(),
        };

        match batches.iter_mut().find(|batch| batch.page == page) {
            Some(batch) => batch.instructions.push(instruction),
            None => batches.push(PageBatch {
                page,
                instructions: vec![instruction],
            }),
        }
    }

    batches
}
