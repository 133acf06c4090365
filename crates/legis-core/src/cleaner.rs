//! Text normalization applied between extraction and segmentation.
//!
//! Passes run in a fixed order: non-printable runs become a space, whitespace
//! runs collapse to one space, then `DD/MM/YYYY` dates are rewritten to
//! `YYYY-MM-DD`. The date pass is last so it sees canonical spacing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Maximal runs of word characters and slashes. A run is a date candidate
/// only if the whole run is `DD/MM/YYYY`, so `01/02/2023/04` stays intact.
static SLASH_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_/]+").unwrap());

static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").unwrap());

/// Configurable text cleaner.
#[derive(Debug, Clone, Copy)]
pub struct Cleaner {
    normalize_dates: bool,
}

impl Cleaner {
    pub fn new() -> Self {
        Self {
            normalize_dates: true,
        }
    }

    /// Toggle the `DD/MM/YYYY` rewrite.
    pub fn with_date_normalization(mut self, enabled: bool) -> Self {
        self.normalize_dates = enabled;
        self
    }

    pub fn clean(&self, text: &str) -> String {
        let printable = replace_non_printable(text);
        let collapsed = collapse_whitespace(&printable);
        if self.normalize_dates {
            rewrite_dates(&collapsed)
        } else {
            collapsed
        }
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean text with the default settings.
pub fn clean(text: &str) -> String {
    Cleaner::new().clean(text)
}

fn is_printable_ascii(c: char) -> bool {
    (' '..='~').contains(&c)
}

/// Each run of characters outside 0x20..=0x7E becomes one space.
fn replace_non_printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;

    for c in text.chars() {
        if is_printable_ascii(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(' ');
            in_run = true;
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Positional rewrite; `99/99/9999` becomes `9999-99-99`.
fn rewrite_dates(text: &str) -> String {
    SLASH_TOKEN
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            match DATE.captures(token) {
                Some(d) => format!("{}-{}-{}", &d[3], &d[2], &d[1]),
                None => token.to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "Due 05/12/2023.",
        "Clause 1\tPayment\r\n\r\nterms   apply.",
        "Caf\u{e9} \u{00A0}\u{200B} na\u{ef}ve",
        "Signed 01/02/2023/04/2024 and 31/12/1999, v1/2/2024",
        "\u{0}\u{1}ctrl\u{7f}chars\u{1b}[0m",
        "  \u{4e2d}\u{6587} Section 2  \n\n Article 3 ",
        "99/99/9999 a05/12/2023 05/12/2023b",
    ];

    #[test]
    fn test_date_rewrite() {
        assert!(clean("Due 05/12/2023.").contains("2023-12-05"));
        assert_eq!(clean("Due 05/12/2023."), "Due 2023-12-05.");
    }

    #[test]
    fn test_malformed_date_rewritten_positionally() {
        assert_eq!(clean("on 99/99/9999"), "on 9999-99-99");
    }

    #[test]
    fn test_chained_slashes_left_alone() {
        assert_eq!(clean("ref 01/02/2023/04"), "ref 01/02/2023/04");
        assert_eq!(clean("v1/2/2024"), "v1/2/2024");
    }

    #[test]
    fn test_dates_disabled() {
        let cleaner = Cleaner::new().with_date_normalization(false);
        assert_eq!(cleaner.clean("Due  05/12/2023."), "Due 05/12/2023.");
    }

    #[test]
    fn test_non_ascii_run_becomes_one_space() {
        assert_eq!(clean("Caf\u{e9}\u{e9}\u{e9}s"), "Caf s");
        assert_eq!(clean("a\u{2014}b"), "a b");
    }

    #[test]
    fn test_newlines_and_tabs_collapse() {
        assert_eq!(clean("  Clause 1\n\n\tPayment  "), "Clause 1 Payment");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("\n\u{3000}\n"), "");
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_output_is_printable_without_double_spaces() {
        for sample in SAMPLES {
            let out = clean(sample);
            assert!(!out.contains("  "), "double space in {:?}", out);
            assert!(out.chars().all(is_printable_ascii), "non-printable in {:?}", out);
            assert_eq!(out.trim(), out);
        }
    }
}
