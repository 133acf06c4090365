//! Plain text extraction.

use crate::error::ExtractResult;
use crate::types::{ExtractedText, FormatTag};
use crate::Extractor;

/// Reads the file bytes as UTF-8. Fails on invalid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PlainTextExtractor {
    fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedText> {
        let text = String::from_utf8(content.to_vec())?;
        Ok(ExtractedText::new(text, FormatTag::Text, self.name()))
    }

    fn supported_formats(&self) -> &[FormatTag] {
        &[FormatTag::Text]
    }

    fn name(&self) -> &str {
        "utf8"
    }
}
