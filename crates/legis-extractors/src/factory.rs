//! Factory for creating extraction strategies.

use std::sync::Arc;

use crate::{Extractor, PlainTextExtractor};

#[cfg(feature = "pdf")]
use crate::{PdfLayoutExtractor, PdfLenientExtractor};

#[cfg(feature = "docx")]
use crate::DocxExtractor;

/// Settings applied to the strategies the factory builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractorOptions {
    /// Include paragraphs inside DOCX tables.
    pub docx_tables: bool,
}

/// Factory for creating extraction strategies.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a UTF-8 plain text extractor.
    pub fn text() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::new())
    }

    /// Create the layout-aware PDF strategy.
    #[cfg(feature = "pdf")]
    pub fn pdf_layout() -> Arc<dyn Extractor> {
        Arc::new(PdfLayoutExtractor::new())
    }

    /// Create the tolerant PDF fallback strategy.
    #[cfg(feature = "pdf")]
    pub fn pdf_lenient() -> Arc<dyn Extractor> {
        Arc::new(PdfLenientExtractor::new())
    }

    /// Create a DOCX extractor.
    #[cfg(feature = "docx")]
    pub fn docx(include_tables: bool) -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new().with_tables(include_tables))
    }

    /// Get all available strategies in default order.
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        Self::all_with(ExtractorOptions::default())
    }

    /// Get all available strategies in default order, configured by `options`.
    #[allow(clippy::vec_init_then_push)]
    #[cfg_attr(not(feature = "docx"), allow(unused_variables))]
    pub fn all_with(options: ExtractorOptions) -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        extractors.push(Self::text());

        #[cfg(feature = "pdf")]
        {
            extractors.push(Self::pdf_layout());
            extractors.push(Self::pdf_lenient());
        }

        #[cfg(feature = "docx")]
        extractors.push(Self::docx(options.docx_tables));

        extractors
    }
}
