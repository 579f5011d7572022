//! Suggestions produced by a check cycle.
//!
//! This module defines the typed suggestion records for each category and
//! the boundary that coerces untrusted provider output into them.

mod ingest;
mod suggestion;

pub use ingest::parse_branch;
pub use suggestion::{
    Category, CategoryItems, ContentAnalysis, EuphonyImprovement, Matchable, PunctuationIssue,
    SpellingSuggestion, Stats, StyleCorrection, StyleMixing, StyleSuggestion, ToneSuggestion,
};
