//! Fuzz target for document search and replace.
//!
//! This fuzzer tests that matching:
//! 1. Never panics on pathological needles (regex metacharacters, marks)
//! 2. Only returns in-bounds ranges on char boundaries
//! 3. Replacing a match never corrupts the text

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use proofmark::document::find_matches;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    haystack: &'a str,
    needle: &'a str,
    replacement: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let ranges = find_matches(input.haystack, input.needle);
    for range in &ranges {
        assert!(range.end <= input.haystack.len());
        assert!(input.haystack.is_char_boundary(range.start));
        assert!(input.haystack.is_char_boundary(range.end));
    }

    if let Some(first) = ranges.first() {
        let mut text = input.haystack.to_string();
        text.replace_range(first.start..first.end, input.replacement);
        assert_eq!(
            text.len(),
            input.haystack.len() - first.len() + input.replacement.len()
        );
    }
});
