//! Text search semantics shared by document adapters.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::TextRange;

// A single Unicode word character: letters, combining marks, digits, connectors.
static WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w$").unwrap());

/// Whether a search for `needle` is restricted to whole words.
///
/// True when the trimmed needle has no internal whitespace.
pub fn is_whole_word_search(needle: &str) -> bool {
    !needle.trim().contains(char::is_whitespace)
}

/// Find every case-insensitive match of `needle` in `haystack`.
///
/// The needle is trimmed first; a blank needle never matches. Matches are
/// non-overlapping, in document order, as byte ranges into `haystack`.
pub fn find_matches(haystack: &str, needle: &str) -> Vec<TextRange> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Vec::new();
    }

    let pattern = match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return Vec::new(),
    };

    if !is_whole_word_search(needle) {
        return pattern
            .find_iter(haystack)
            .map(|m| TextRange::new(m.start(), m.end()))
            .collect();
    }

    // A rejected candidate may overlap a valid match, so resume one char
    // past its start rather than past its end.
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(m) = pattern.find_at(haystack, from) {
        if at_word_boundaries(haystack, m.start(), m.end()) {
            ranges.push(TextRange::new(m.start(), m.end()));
            from = m.end();
        } else {
            match haystack[m.start()..].chars().next() {
                Some(c) => from = m.start() + c.len_utf8(),
                None => break,
            }
        }
    }
    ranges
}

/// Normalize `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn at_word_boundaries(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}
