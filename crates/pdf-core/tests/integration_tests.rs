//! Integration tests for pdf-core
//!
//! These tests verify end-to-end functionality against minimal in-memory
//! PDF documents. Font embedding paths that require a real TrueType file
//! are covered by unit tests with stub font data.

use lopdf::dictionary;
use pdf_core::{PdfDocument, PdfError};

/// Create a minimal valid PDF with the given number of A4 pages
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = lopdf::Document::new();

    let pages_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Pages",
        "Count" => page_count as i32,
        "Kids" => vec![], // Updated below
    }));

    let mut page_ids = Vec::new();
    for _ in 0..page_count {
        let contents_id = doc.add_object(lopdf::Object::Stream(lopdf::Stream::new(
            lopdf::dictionary! {},
            vec![],
        )));

        let page_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
            "Resources" => lopdf::dictionary! {},
            "Contents" => contents_id,
        }));
        page_ids.push(page_id);
    }

    let mut pages_dict = doc.get_object(pages_id).unwrap().as_dict().unwrap().clone();
    pages_dict.set(
        "Kids",
        lopdf::Object::Array(page_ids.into_iter().map(|id| id.into()).collect()),
    );
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));

    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

#[test]
fn test_open_save_roundtrip() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");
    assert_eq!(doc.page_count(), 1);

    let saved_data = doc.to_bytes().expect("Failed to save PDF");

    let doc2 = PdfDocument::open_from_bytes(&saved_data).expect("Failed to re-open PDF");
    assert_eq!(doc2.page_count(), 1);
}

#[test]
fn test_multi_page_count() {
    let pdf_data = create_test_pdf(3);

    let doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");
    assert_eq!(doc.page_count(), 3);
}

#[test]
fn test_invalid_page_number() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");

    // Page validation fires before font lookup
    let result = doc.insert_text("Test", 999, 100.0, 700.0);
    assert!(result.is_err());

    match result {
        Err(PdfError::InvalidPage(page, total)) => {
            assert_eq!(page, 999);
            assert_eq!(total, 1);
        }
        _ => panic!("Expected InvalidPage error"),
    }
}

#[test]
fn test_page_zero_is_invalid() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");

    let result = doc.insert_text("Test", 0, 100.0, 700.0);
    assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));
}

#[test]
fn test_font_not_found() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");

    let result = doc.set_font("nonexistent", 12.0);
    assert!(result.is_err());

    match result {
        Err(PdfError::FontNotFound(name)) => {
            assert_eq!(name, "nonexistent");
        }
        _ => panic!("Expected FontNotFound error"),
    }
}

#[test]
fn test_no_font_set() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");

    let result = doc.insert_text("Test", 1, 100.0, 700.0);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
}

#[test]
fn test_empty_text_needs_no_font() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");

    // Empty text is skipped before font resolution
    doc.insert_text("", 1, 100.0, 700.0)
        .expect("Empty text should be a no-op");

    let saved_data = doc.to_bytes().expect("Failed to save PDF");
    assert!(!saved_data.is_empty());
}

#[test]
fn test_add_font_rejects_invalid_data() {
    let pdf_data = create_test_pdf(1);

    let mut doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");

    let result = doc.add_font("bad", &[0u8; 32]);
    assert!(matches!(result, Err(PdfError::FontParseError(_))));
}

#[test]
fn test_inner_document_access() {
    let pdf_data = create_test_pdf(1);

    let doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");
    assert_eq!(doc.inner().get_pages().len(), 1);
}
