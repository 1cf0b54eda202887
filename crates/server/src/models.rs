//! Request models for the overlay service

use serde::Deserialize;

/// Body of `POST /overlay-pdf`
///
/// Both fields are required for the request to proceed, but they are
/// modelled as optional so a missing field yields a 400 with a useful
/// message instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct OverlayRequest {
    /// URL of the source PDF to download
    #[serde(default, rename = "pdfUrl")]
    pub pdf_url: Option<String>,

    /// JSON array of text boxes, passed through as a string
    #[serde(default, rename = "textboxesJson")]
    pub textboxes_json: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_full_request() {
        let req: OverlayRequest = serde_json::from_str(
            r#"{"pdfUrl": "https://example.com/a.pdf", "textboxesJson": "[]"}"#,
        )
        .unwrap();
        assert_eq!(req.pdf_url.as_deref(), Some("https://example.com/a.pdf"));
        assert_eq!(req.textboxes_json.as_deref(), Some("[]"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let req: OverlayRequest = serde_json::from_str("{}").unwrap();
        assert!(req.pdf_url.is_none());
        assert!(req.textboxes_json.is_none());
    }
}
