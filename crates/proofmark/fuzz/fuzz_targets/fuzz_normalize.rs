//! Fuzz target for text normalization.
//!
//! This fuzzer tests that normalization:
//! 1. Never panics on any UTF-8 input
//! 2. Is idempotent

#![no_main]

use libfuzzer_sys::fuzz_target;
use proofmark::normalize;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
});
