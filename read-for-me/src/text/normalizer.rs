//! Text normalization applied once to extracted document text.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Standalone 1-3 digit tokens, which are mostly page numbers.
static SHORT_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,3}\b").unwrap());

/// Normalize raw extracted text for synthesis.
///
/// Collapses whitespace, trims, then strips short digit tokens. The spaces
/// around a stripped token are left as they are, so `"Chapter 12 begins"`
/// becomes `"Chapter  begins"`. Legitimate numbers such as `"12 apples"`
/// are removed too.
pub fn normalize(raw: &str) -> String {
    strip_page_numbers(&collapse_whitespace(raw))
}

/// Replace every whitespace run with a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Remove every standalone token of 1 to 3 decimal digits.
pub fn strip_page_numbers(text: &str) -> String {
    SHORT_NUMBER.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("  Hello \t\n world\r\n\n again  "),
            "Hello world again"
        );
    }

    #[test]
    fn test_strips_page_number_leaving_double_space() {
        assert_eq!(normalize("Chapter 12 begins"), "Chapter  begins");
    }

    #[test]
    fn test_keeps_long_numbers() {
        assert_eq!(normalize("In 1984 there were 1000 pages"), "In 1984 there were 1000 pages");
    }

    #[test]
    fn test_strips_legitimate_short_numbers() {
        assert_eq!(normalize("She bought 12 apples"), "She bought  apples");
    }

    #[test]
    fn test_does_not_strip_digits_inside_words() {
        assert_eq!(normalize("Agent 007x and B52"), "Agent 007x and B52");
    }

    #[test]
    fn test_trailing_page_number() {
        assert_eq!(normalize("end of the page\n 42\n"), "end of the page ");
    }

    #[test]
    fn test_page_breaks_are_joined() {
        let raw = "last line of page one\n\n7\n\nfirst line of page two";
        assert_eq!(
            normalize(raw),
            "last line of page one  first line of page two"
        );
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_idempotent_without_stripped_numbers() {
        for s in [
            "  The quick\n\nbrown fox  ",
            "Year 2024 edition, volume 1000",
            "no digits here at all",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_strip_page_numbers_is_idempotent() {
        for s in ["Chapter 12 begins", "1 2 3 go", "12.345 and 9,999", "p.5-10"] {
            let once = strip_page_numbers(s);
            assert_eq!(strip_page_numbers(&once), once);
        }
    }

    #[test]
    fn test_collapse_whitespace_is_idempotent() {
        let s = "a \n b\t\tc   ";
        let once = collapse_whitespace(s);
        assert_eq!(collapse_whitespace(&once), once);
    }
}
