//! Text canonicalization.
//!
//! Two suggestions refer to the same piece of the document when their
//! matching fields normalize to the same string. The canonical form is
//! lowercase, trimmed, and has every internal whitespace run collapsed to a
//! single ASCII space.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalize `text` for identity comparisons.
///
/// Pure and total. `normalize(normalize(x)) == normalize(x)` for every `x`.
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, " ").into_owned()
}

/// Count whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_case_and_trims() {
        assert_eq!(normalize(" WORD "), normalize("word"));
        assert_eq!(normalize("  Hello World\t"), "hello world");
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        assert_eq!(normalize("a \t\n  b"), "a b");
        // Non-breaking space counts as whitespace
        assert_eq!(normalize("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_idempotent() {
        for input in ["", "   ", "MiXeD  Case\n text ", "আমি  ভাল"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_non_latin_text_passes_through() {
        assert_eq!(normalize("  আমি ভাল  আছি "), "আমি ভাল আছি");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("আমি ভাল আছি"), 3);
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
    }
}
