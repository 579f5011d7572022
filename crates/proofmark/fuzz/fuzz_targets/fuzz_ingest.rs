//! Fuzz target for provider response coercion.
//!
//! This fuzzer tests that branch parsing:
//! 1. Never panics on any JSON the provider might return
//! 2. Always yields one collection per category the branch owns
//! 3. Never keeps an entry with a blank matching field

#![no_main]

use libfuzzer_sys::fuzz_target;
use proofmark::llm::Branch;
use proofmark::suggestion::{CategoryItems, parse_branch};
use proofmark::SuggestionStore;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let mut store = SuggestionStore::new();
    for branch in Branch::ALL {
        let items = parse_branch(branch, Some(&value));
        assert_eq!(items.len(), branch.categories().len());

        for item in items {
            if let CategoryItems::Spelling(spelling) = &item {
                assert!(spelling.iter().all(|s| !s.wrong.trim().is_empty()));
            }
            store.ingest(item);
        }
    }

    // Every live key must be prunable.
    for key in store.live_keys() {
        store.dismiss(&key);
        assert!(!store.contains_key(&key));
    }
});
