//! Property-based tests for proofmark.
//!
//! These tests use proptest to generate random inputs and verify that the
//! text-identity and pruning rules hold under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p proofmark --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p proofmark --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use proofmark::document::find_matches;
use proofmark::llm::Branch;
use proofmark::suggestion::{Stats, parse_branch};
use proofmark::{SuggestionStore, normalize};

// =============================================================================
// Test Strategies
// =============================================================================

/// Short ASCII phrases with irregular spacing.
fn ascii_phrase() -> impl Strategy<Value = String> {
    "[a-zA-Z \\t\\n]{0,40}"
}

/// Words drawn from a small Bengali and English vocabulary, so that
/// generated suggestions collide often.
fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ভাল".to_string()),
        Just("ভালো".to_string()),
        Just("আমি".to_string()),
        Just("teh".to_string()),
        Just("Teh".to_string()),
        Just("gonna".to_string()),
        Just("report".to_string()),
    ]
}

/// Generate completely random text (edge cases)
fn random_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..200)
        .prop_filter_map("valid UTF-8", |bytes| String::from_utf8(bytes).ok())
}

/// Arbitrary JSON, nested a few levels deep.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,10}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(
                (
                    prop_oneof![
                        Just("spellingErrors".to_string()),
                        Just("wrong".to_string()),
                        Just("current".to_string()),
                        Just("position".to_string()),
                        Just("corrections".to_string()),
                        Just("languageStyleMixing".to_string()),
                        Just("contentType".to_string()),
                        "[a-z]{1,8}",
                    ],
                    inner
                ),
                0..6
            )
            .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn store_from(spelling: &[String], tone: &[String], mixing: &[String]) -> SuggestionStore {
    let mut store = SuggestionStore::new();
    let main = json!({
        "spellingErrors": spelling
            .iter()
            .map(|w| json!({"wrong": w, "suggestions": ["x"]}))
            .collect::<Vec<_>>(),
        "languageStyleMixing": {
            "detected": true,
            "corrections": mixing
                .iter()
                .map(|w| json!({"current": w, "suggestion": "x", "type": "chalito"}))
                .collect::<Vec<_>>()
        }
    });
    let tone = json!({
        "toneConversions": tone
            .iter()
            .map(|w| json!({"current": w, "suggestion": "x", "reason": "r"}))
            .collect::<Vec<_>>()
    });
    for items in parse_branch(Branch::Main, Some(&main))
        .into_iter()
        .chain(parse_branch(Branch::Tone, Some(&tone)))
    {
        store.ingest(items);
    }
    store
}

// =============================================================================
// Normalization Properties
// =============================================================================

mod normalize_tests {
    use super::*;

    proptest! {
        /// Normalizing twice changes nothing.
        #[test]
        fn idempotent(input in random_text()) {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Case and surrounding or repeated whitespace never matter.
        #[test]
        fn case_and_spacing_insensitive(input in ascii_phrase()) {
            let shouted = format!("  {}\t", input.to_uppercase().replace(' ', "   "));
            prop_assert_eq!(normalize(&shouted), normalize(&input));
        }

        /// Output has no edge whitespace and no whitespace runs.
        #[test]
        fn canonical_spacing(input in random_text()) {
            let key = normalize(&input);
            prop_assert_eq!(key.trim(), key.as_str());
            prop_assert!(!key.contains("  "));
            prop_assert!(!key.contains('\n'));
            prop_assert!(!key.contains('\t'));
        }
    }
}

// =============================================================================
// Matching Properties
// =============================================================================

mod matching_tests {
    use super::*;

    proptest! {
        /// Matches are in bounds, on char boundaries, ordered and disjoint.
        #[test]
        fn matches_are_well_formed(haystack in random_text(), needle in random_text()) {
            let ranges = find_matches(&haystack, &needle);
            let mut last_end = 0;
            for range in ranges {
                prop_assert!(range.start >= last_end);
                prop_assert!(range.start < range.end);
                prop_assert!(range.end <= haystack.len());
                prop_assert!(haystack.is_char_boundary(range.start));
                prop_assert!(haystack.is_char_boundary(range.end));
                last_end = range.end;
            }
        }

        /// A word planted between spaces is always found.
        #[test]
        fn planted_word_is_found(words in prop::collection::vec(word(), 1..8), pick in any::<prop::sample::Index>()) {
            let haystack = words.join(" ");
            let needle = pick.get(&words);
            let ranges = find_matches(&haystack, needle);
            prop_assert!(!ranges.is_empty());
            for range in ranges {
                prop_assert_eq!(normalize(&haystack[range.start..range.end]), normalize(needle));
            }
        }
    }
}

// =============================================================================
// Ingestion Properties
// =============================================================================

mod ingest_tests {
    use super::*;

    proptest! {
        /// Arbitrary provider output never panics and yields one entry per
        /// owned category.
        #[test]
        fn never_panics_on_arbitrary_json(value in json_value()) {
            for branch in Branch::ALL {
                let items = parse_branch(branch, Some(&value));
                prop_assert_eq!(items.len(), branch.categories().len());
            }
        }

        /// Accuracy always lands in 0..=100.
        #[test]
        fn accuracy_in_range(words in 0usize..10_000, errors in 0usize..20_000) {
            let stats = Stats::compute(words, errors);
            prop_assert!(stats.accuracy <= 100);
        }
    }
}

// =============================================================================
// Store Properties
// =============================================================================

mod store_tests {
    use super::*;

    proptest! {
        /// After a dismiss, no category holds the key; other keys survive.
        #[test]
        fn dismiss_removes_key_everywhere(
            spelling in prop::collection::vec(word(), 0..6),
            tone in prop::collection::vec(word(), 0..6),
            mixing in prop::collection::vec(word(), 0..6),
            target in word(),
        ) {
            let mut store = store_from(&spelling, &tone, &mixing);
            let others: Vec<String> = store
                .live_keys()
                .into_iter()
                .filter(|k| *k != normalize(&target))
                .collect();

            store.dismiss(&target);

            prop_assert!(!store.contains_key(&target));
            prop_assert!(store.categories_of(&target).is_empty());
            for key in others {
                prop_assert!(store.contains_key(&key));
            }
        }

        /// Dismissing the same key twice equals dismissing it once.
        #[test]
        fn dismiss_is_idempotent(
            spelling in prop::collection::vec(word(), 0..6),
            tone in prop::collection::vec(word(), 0..6),
            target in word(),
        ) {
            let mut store = store_from(&spelling, &tone, &[]);
            store.dismiss(&target);
            let once = store.clone();
            prop_assert_eq!(store.dismiss(&target), 0);
            prop_assert_eq!(store, once);
        }
    }
}
