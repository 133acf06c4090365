//! Splits normalized text into section blocks.
//!
//! A block starts at each `Section N`, `Clause N` or `Article N` marker
//! (case-sensitive) and runs until the next one. Text before the first
//! marker becomes its own preamble block.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:Section|Clause|Article) \d+").unwrap());

/// Split `text` into blocks in reading order.
///
/// Markers are kept at the head of their block. Two markers with nothing
/// between them yield a block holding only the first marker.
pub fn segment(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut last = 0;

    for marker in MARKER.find_iter(text) {
        append_fragment(&mut current, &text[last..marker.start()]);
        if !current.is_empty() {
            sections.push(current.trim().to_string());
        }
        current = marker.as_str().to_string();
        last = marker.end();
    }

    append_fragment(&mut current, &text[last..]);
    if !current.is_empty() {
        sections.push(current.trim().to_string());
    }

    sections
}

fn append_fragment(buffer: &mut String, fragment: &str) {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(fragment);
}
