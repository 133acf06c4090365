//! DOCX text extraction using docx-rs.
//!
//! Walks the body in document order and joins paragraph text with newlines.
//! Tables are skipped unless explicitly enabled.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedText, FormatTag};
use crate::Extractor;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};

/// DOCX extractor using the docx-rs library.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor {
    /// Whether table cell paragraphs are included in the output.
    include_tables: bool,
}

impl DocxExtractor {
    /// Create new DOCX extractor with default settings (paragraphs only).
    pub fn new() -> Self {
        Self {
            include_tables: false,
        }
    }

    /// Configure whether table cell text is included.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    fn extract_paragraphs(&self, content: &[u8]) -> ExtractResult<Vec<String>> {
        let docx = docx_rs::read_docx(content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let mut paragraphs: Vec<String> = Vec::new();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    paragraphs.push(Self::paragraph_text(p));
                }
                DocumentChild::Table(t) if self.include_tables => {
                    for row in &t.rows {
                        let TableChild::TableRow(r) = row;
                        for cell in &r.cells {
                            let TableRowChild::TableCell(c) = cell;
                            for content in &c.children {
                                if let TableCellContent::Paragraph(p) = content {
                                    paragraphs.push(Self::paragraph_text(p));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }

    /// Paragraph -> Run -> Text, with hyperlink runs flattened in place.
    fn paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();
        Self::push_children(&p.children, &mut text);
        text
    }

    fn push_children(children: &[ParagraphChild], text: &mut String) {
        for child in children {
            match child {
                ParagraphChild::Run(r) => {
                    for run_child in &r.children {
                        match run_child {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push('\t'),
                            RunChild::Break(_) => text.push('\n'),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Hyperlink(h) => Self::push_children(&h.children, text),
                _ => {}
            }
        }
    }
}

impl Extractor for DocxExtractor {
    fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedText> {
        let paragraphs = self.extract_paragraphs(content)?;
        let count = paragraphs.len();
        let text = paragraphs.join("\n");

        Ok(ExtractedText::new(text, FormatTag::Docx, self.name())
            .with_metadata("paragraphs", count))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Docx]
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}
