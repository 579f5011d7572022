//! Suggestion types produced by a check cycle.

use serde::{Deserialize, Serialize};

use crate::document::HighlightColor;
use crate::normalize::normalize;

/// One of the seven suggestion collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Spelling,
    Tone,
    Style,
    StyleMixing,
    Punctuation,
    Euphony,
    ContentAnalysis,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 7] = [
        Category::Spelling,
        Category::Tone,
        Category::Style,
        Category::StyleMixing,
        Category::Punctuation,
        Category::Euphony,
        Category::ContentAnalysis,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Spelling => "Spelling",
            Category::Tone => "Tone",
            Category::Style => "Style",
            Category::StyleMixing => "Style Mixing",
            Category::Punctuation => "Punctuation",
            Category::Euphony => "Euphony",
            Category::ContentAnalysis => "Content Analysis",
        }
    }

    /// Highlight color used for suggestions of this category.
    ///
    /// Content analysis is informational and has no document text to mark.
    pub fn highlight_color(&self) -> Option<HighlightColor> {
        let hex = match self {
            Category::Spelling => "#fecaca",
            Category::Tone => "#fde68a",
            Category::Style => "#c7d2fe",
            Category::StyleMixing => "#e9d5ff",
            Category::Punctuation => "#fbcfe8",
            Category::Euphony => "#99f6e4",
            Category::ContentAnalysis => return None,
        };
        Some(HighlightColor::new(hex))
    }
}

/// A suggestion that refers to a specific piece of document text.
pub trait Matchable {
    /// The document text this suggestion is about.
    fn matching_text(&self) -> &str;

    /// Canonical identity of the suggestion subject.
    fn key(&self) -> String {
        normalize(self.matching_text())
    }
}

/// A misspelled word with ranked replacements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingSuggestion {
    pub wrong: String,
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub position: usize,
}

/// A phrase rewritten to match the selected tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneSuggestion {
    pub current: String,
    pub suggestion: String,
    pub reason: String,
    #[serde(default)]
    pub position: usize,
}

/// A phrase rewritten into the selected language style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSuggestion {
    pub current: String,
    pub suggestion: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: usize,
}

/// One correction inside a [`StyleMixing`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleCorrection {
    pub current: String,
    pub suggestion: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: usize,
}

/// Aggregate verdict on whether the text mixes two language styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMixing {
    pub detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub corrections: Vec<StyleCorrection>,
}

/// A sentence with a punctuation problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunctuationIssue {
    pub issue: String,
    pub current_sentence: String,
    pub corrected_sentence: String,
    pub explanation: String,
    #[serde(default)]
    pub position: usize,
}

/// A phrase that reads awkwardly, with smoother alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuphonyImprovement {
    pub current: String,
    pub suggestions: Vec<String>,
    pub reason: String,
    #[serde(default)]
    pub position: usize,
}

/// Informational analysis of what kind of document this is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub missing_elements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Matchable for SpellingSuggestion {
    fn matching_text(&self) -> &str {
        &self.wrong
    }
}

impl Matchable for ToneSuggestion {
    fn matching_text(&self) -> &str {
        &self.current
    }
}

impl Matchable for StyleSuggestion {
    fn matching_text(&self) -> &str {
        &self.current
    }
}

impl Matchable for StyleCorrection {
    fn matching_text(&self) -> &str {
        &self.current
    }
}

impl Matchable for PunctuationIssue {
    fn matching_text(&self) -> &str {
        &self.current_sentence
    }
}

impl Matchable for EuphonyImprovement {
    fn matching_text(&self) -> &str {
        &self.current
    }
}

/// Word and error counts for the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_words: usize,
    pub error_count: usize,
    /// Percentage of words without a spelling error, 0-100.
    pub accuracy: u8,
}

impl Stats {
    /// Compute stats from a word count and a spelling error count.
    ///
    /// An empty document scores 100. More errors than words clamps to 0.
    pub fn compute(total_words: usize, error_count: usize) -> Self {
        let accuracy = if total_words == 0 {
            100
        } else {
            let correct = total_words.saturating_sub(error_count) as f64;
            (100.0 * correct / total_words as f64).round().clamp(0.0, 100.0) as u8
        };

        Self {
            total_words,
            error_count,
            accuracy,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::compute(0, 0)
    }
}

/// The full contents of one category, as delivered by a settled branch.
///
/// Ingesting a value replaces that category's collection wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryItems {
    Spelling(Vec<SpellingSuggestion>),
    Tone(Vec<ToneSuggestion>),
    Style(Vec<StyleSuggestion>),
    StyleMixing(Option<StyleMixing>),
    Punctuation(Vec<PunctuationIssue>),
    Euphony(Vec<EuphonyImprovement>),
    ContentAnalysis(Option<ContentAnalysis>),
}

impl CategoryItems {
    /// Which collection these items belong to.
    pub fn category(&self) -> Category {
        match self {
            CategoryItems::Spelling(_) => Category::Spelling,
            CategoryItems::Tone(_) => Category::Tone,
            CategoryItems::Style(_) => Category::Style,
            CategoryItems::StyleMixing(_) => Category::StyleMixing,
            CategoryItems::Punctuation(_) => Category::Punctuation,
            CategoryItems::Euphony(_) => Category::Euphony,
            CategoryItems::ContentAnalysis(_) => Category::ContentAnalysis,
        }
    }

    /// Number of user-facing suggestions carried.
    ///
    /// Style mixing counts its corrections; content analysis counts as one
    /// record when present.
    pub fn len(&self) -> usize {
        match self {
            CategoryItems::Spelling(items) => items.len(),
            CategoryItems::Tone(items) => items.len(),
            CategoryItems::Style(items) => items.len(),
            CategoryItems::StyleMixing(mixing) => {
                mixing.as_ref().map_or(0, |m| m.corrections.len())
            }
            CategoryItems::Punctuation(items) => items.len(),
            CategoryItems::Euphony(items) => items.len(),
            CategoryItems::ContentAnalysis(analysis) => usize::from(analysis.is_some()),
        }
    }

    /// Whether nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An empty value for `category`.
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Spelling => CategoryItems::Spelling(Vec::new()),
            Category::Tone => CategoryItems::Tone(Vec::new()),
            Category::Style => CategoryItems::Style(Vec::new()),
            Category::StyleMixing => CategoryItems::StyleMixing(None),
            Category::Punctuation => CategoryItems::Punctuation(Vec::new()),
            Category::Euphony => CategoryItems::Euphony(Vec::new()),
            Category::ContentAnalysis => CategoryItems::ContentAnalysis(None),
        }
    }
}
