//! Live suggestion state.
//!
//! The store holds the seven suggestion collections from the last check
//! cycle, plus stats and content analysis. The only mutations it exposes are
//! wholesale ingestion, reset, and the two user actions:
//!
//! - **apply** - replace the text in the document, then prune
//! - **dismiss** - prune without touching the document
//!
//! Pruning is keyed on the normalized matching text, so acting on a phrase
//! removes it from every category that flagged it.

mod suggestion_store;

pub use suggestion_store::SuggestionStore;
