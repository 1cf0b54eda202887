//! Wire schema for positioned text annotations

use crate::Result;
use serde::{Deserialize, Serialize};

/// One text placement instruction as submitted by a client
///
/// Every field is optional at the wire level: bulk submissions routinely
/// contain partially filled entries, and those are filtered out during
/// planning instead of failing the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBox {
    /// Text to draw
    #[serde(default)]
    pub text: Option<String>,

    /// X coordinate in document space
    #[serde(default)]
    pub x: Option<f64>,

    /// Y coordinate in document space
    #[serde(default)]
    pub y: Option<f64>,

    /// Font size in points
    #[serde(default, rename = "fontSize")]
    pub font_size: Option<f64>,

    /// Target page, passed through as the editor's 1-indexed page number
    #[serde(default)]
    pub page: Option<u32>,
}

impl TextBox {
    /// Check whether this box carries everything needed to draw it
    ///
    /// A zero font size counts as absent: zero-size text is a degenerate
    /// case indistinguishable from "not specified".
    pub fn is_valid(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
            && self.x.is_some()
            && self.y.is_some()
            && self.font_size.is_some_and(|s| s != 0.0)
            && self.page.is_some()
    }
}

/// Parse a JSON array of text boxes
///
/// Unknown fields are ignored; missing fields become `None` and are
/// handled by the planning filter.
pub fn parse_textboxes(json: &str) -> Result<Vec<TextBox>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_box() -> TextBox {
        TextBox {
            text: Some("A".to_string()),
            x: Some(1.0),
            y: Some(2.0),
            font_size: Some(10.0),
            page: Some(0),
        }
    }

    #[test]
    fn test_complete_box_is_valid() {
        assert!(full_box().is_valid());
    }

    #[test]
    fn test_empty_text_invalid() {
        let mut b = full_box();
        b.text = Some(String::new());
        assert!(!b.is_valid());

        b.text = None;
        assert!(!b.is_valid());
    }

    #[test]
    fn test_zero_font_size_invalid() {
        let mut b = full_box();
        b.font_size = Some(0.0);
        assert!(!b.is_valid());

        b.font_size = None;
        assert!(!b.is_valid());
    }

    #[test]
    fn test_missing_coordinates_invalid() {
        let mut b = full_box();
        b.x = None;
        assert!(!b.is_valid());

        let mut b = full_box();
        b.y = None;
        assert!(!b.is_valid());

        let mut b = full_box();
        b.page = None;
        assert!(!b.is_valid());
    }

    #[test]
    fn test_parse_full_entry() {
        let boxes = parse_textboxes(
            r#"[{"text":"hello","x":10,"y":20,"fontSize":12,"page":0}]"#,
        )
        .unwrap();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].text.as_deref(), Some("hello"));
        assert_eq!(boxes[0].font_size, Some(12.0));
        assert!(boxes[0].is_valid());
    }

    #[test]
    fn test_parse_tolerates_partial_entries() {
        let boxes = parse_textboxes(r#"[{"text":"x"},{},{"page":3,"unknown":true}]"#).unwrap();
        assert_eq!(boxes.len(), 3);
        assert!(boxes.iter().all(|b| !b.is_valid()));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_textboxes("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_textboxes(r#"{"text":"x"}"#).is_err());
    }
}
