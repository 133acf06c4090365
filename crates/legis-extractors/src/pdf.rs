//! PDF text extraction.
//!
//! Two strategies are provided. `PdfLayoutExtractor` uses pdf-extract, which
//! positions glyphs on the page and produces reading-order text, but rejects
//! many producer quirks outright. `PdfLenientExtractor` walks the page tree
//! with lopdf and pulls text operators page by page, skipping pages it cannot
//! decode instead of failing the whole document.

use std::panic::{self, AssertUnwindSafe};

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedText, FormatTag};
use crate::Extractor;

/// Layout-aware page-by-page extraction via pdf-extract.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLayoutExtractor;

impl PdfLayoutExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfLayoutExtractor {
    fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedText> {
        // pdf-extract panics on some malformed font programs.
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(content)
        }))
        .map_err(|_| ExtractError::Pdf("pdf-extract panicked while decoding".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

        let count = pages.len();
        Ok(ExtractedText::new(pages.join("\n"), FormatTag::Pdf, self.name()).with_pages(count))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Pdf]
    }

    fn name(&self) -> &str {
        "pdf-layout"
    }
}

/// Tolerant page-by-page extraction via lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLenientExtractor;

impl PdfLenientExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfLenientExtractor {
    fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedText> {
        let doc = lopdf::Document::load_mem(content)
            .map_err(|e| ExtractError::Pdf(format!("Failed to load PDF: {}", e)))?;

        let pages = doc.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        let mut skipped = 0usize;

        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(page = *page_num, error = %e, "Skipping undecodable page");
                }
            }
        }

        Ok(ExtractedText::new(texts.join("\n"), FormatTag::Pdf, self.name())
            .with_pages(pages.len())
            .with_metadata("skipped_pages", skipped))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Pdf]
    }

    fn name(&self) -> &str {
        "pdf-lenient"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::dictionary;
    use lopdf::{Document, Object, Stream};

    /// Build a one-page PDF with a single Helvetica text run.
    pub(crate) fn make_test_pdf(text: &str) -> Vec<u8> {
        build_pdf(text, true)
    }

    /// Same page, but with no MediaBox anywhere in the page tree. pdf-extract
    /// cannot lay such a page out; lopdf still reads its text operators.
    pub(crate) fn make_pdf_without_media_box(text: &str) -> Vec<u8> {
        build_pdf(text, false)
    }

    fn build_pdf(text: &str, media_box: bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let mut page = dictionary! {
            "Type" => "Page",
            "Contents" => content_id,
            "Resources" => resources,
        };
        if media_box {
            let rect: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
            page.set("MediaBox", rect);
        }
        let page_id = doc.add_object(page);

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn words(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_layout_extracts_digital_pdf() {
        let bytes = make_test_pdf("Section 1 Definitions");
        let result = PdfLayoutExtractor::new().extract(&bytes).unwrap();
        assert_eq!(result.strategy, "pdf-layout");
        assert_eq!(result.pages, Some(1));
        assert_eq!(words(&result.text), "Section 1 Definitions");
    }

    #[test]
    fn test_lenient_extracts_digital_pdf() {
        let bytes = make_test_pdf("Clause 4 Indemnity");
        let result = PdfLenientExtractor::new().extract(&bytes).unwrap();
        assert_eq!(result.strategy, "pdf-lenient");
        assert_eq!(result.pages, Some(1));
        assert_eq!(words(&result.text), "Clause 4 Indemnity");
        assert_eq!(result.metadata["skipped_pages"], 0);
    }

    #[test]
    fn test_page_without_media_box() {
        let bytes = make_pdf_without_media_box("Article 3 Term");

        assert!(PdfLayoutExtractor::new().extract(&bytes).is_err());

        let result = PdfLenientExtractor::new().extract(&bytes).unwrap();
        assert_eq!(words(&result.text), "Article 3 Term");
    }

    #[test]
    fn test_invalid_pdf_fails_both_strategies() {
        assert!(PdfLayoutExtractor::new().extract(b"not a pdf").is_err());
        assert!(PdfLenientExtractor::new().extract(b"not a pdf").is_err());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(PdfLayoutExtractor::new().name(), "pdf-layout");
        assert_eq!(PdfLenientExtractor::new().name(), "pdf-lenient");
        assert!(PdfLenientExtractor::new().supports(FormatTag::Pdf));
    }
}
