//! The suggestion store and cross-category pruning.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::document::{DocumentAdapter, HighlightItem};
use crate::error::Result;
use crate::normalize::normalize;
use crate::suggestion::{
    Category, CategoryItems, ContentAnalysis, EuphonyImprovement, Matchable, PunctuationIssue,
    SpellingSuggestion, Stats, StyleMixing, StyleSuggestion, ToneSuggestion,
};

/// Live suggestion state for one document.
///
/// Collections are replaced wholesale by [`ingest`](Self::ingest) and only
/// ever shrink afterwards, through [`apply`](Self::apply) and
/// [`dismiss`](Self::dismiss). Both remove a canonical key from every
/// category at once, so a phrase flagged by several categories disappears
/// everywhere as soon as the user acts on any one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionStore {
    spelling: Vec<SpellingSuggestion>,
    tone: Vec<ToneSuggestion>,
    style: Vec<StyleSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_mixing: Option<StyleMixing>,
    punctuation: Vec<PunctuationIssue>,
    euphony: Vec<EuphonyImprovement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_analysis: Option<ContentAnalysis>,
    stats: Stats,
}

impl SuggestionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything, including stats and content analysis.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace one category's collection with `items`.
    pub fn ingest(&mut self, items: CategoryItems) {
        debug!(
            category = items.category().label(),
            count = items.len(),
            "ingesting suggestions"
        );
        match items {
            CategoryItems::Spelling(items) => self.spelling = items,
            CategoryItems::Tone(items) => self.tone = items,
            CategoryItems::Style(items) => self.style = items,
            CategoryItems::StyleMixing(mixing) => self.style_mixing = mixing,
            CategoryItems::Punctuation(items) => self.punctuation = items,
            CategoryItems::Euphony(items) => self.euphony = items,
            CategoryItems::ContentAnalysis(analysis) => self.content_analysis = analysis,
        }
    }

    pub(crate) fn set_stats(&mut self, stats: Stats) {
        self.stats = stats;
    }

    /// Replace the first document match of `target` with `replacement`, then
    /// prune `target` from every category.
    ///
    /// The document is searched for the original wording of the first live
    /// suggestion with `target`'s canonical key, or for `target` itself if no
    /// suggestion carries that key.
    ///
    /// # Returns
    /// `Ok(false)` when the document has no match; the store is untouched.
    pub async fn apply(
        &mut self,
        document: &dyn DocumentAdapter,
        target: &str,
        replacement: &str,
    ) -> Result<bool> {
        let key = normalize(target);
        let needle = self
            .original_text(&key)
            .unwrap_or_else(|| target.trim().to_string());

        if !document.replace_first(&needle, replacement).await? {
            info!(needle = %needle, "apply found no document match");
            return Ok(false);
        }

        let removed = self.prune(&key);
        info!(key = %key, removed, "applied suggestion");
        Ok(true)
    }

    /// Prune `target` from every category without touching the document.
    ///
    /// Returns how many suggestions were removed; zero is not an error.
    pub fn dismiss(&mut self, target: &str) -> usize {
        let key = normalize(target);
        let removed = self.prune(&key);
        info!(key = %key, removed, "dismissed suggestion");
        removed
    }

    /// Remove every suggestion whose canonical key equals `key`.
    fn prune(&mut self, key: &str) -> usize {
        let before = self.suggestion_count();

        self.spelling.retain(|s| s.key() != key);
        self.tone.retain(|s| s.key() != key);
        self.style.retain(|s| s.key() != key);
        self.punctuation.retain(|s| s.key() != key);
        self.euphony.retain(|s| s.key() != key);

        if let Some(mixing) = &mut self.style_mixing {
            let had_corrections = !mixing.corrections.is_empty();
            mixing.corrections.retain(|c| c.key() != key);
            if had_corrections && mixing.corrections.is_empty() {
                self.style_mixing = None;
            }
        }

        before - self.suggestion_count()
    }

    /// Original matching text of the first live suggestion keyed `key`.
    fn original_text(&self, key: &str) -> Option<String> {
        self.matchables()
            .find(|(_, item)| item.key() == key)
            .map(|(_, item)| item.matching_text().trim().to_string())
    }

    /// Every matchable suggestion with its category, in category order.
    fn matchables(&self) -> impl Iterator<Item = (Category, &dyn Matchable)> + '_ {
        let spelling = self
            .spelling
            .iter()
            .map(|s| (Category::Spelling, s as &dyn Matchable));
        let tone = self.tone.iter().map(|s| (Category::Tone, s as &dyn Matchable));
        let style = self.style.iter().map(|s| (Category::Style, s as &dyn Matchable));
        let mixing = self
            .style_mixing
            .iter()
            .flat_map(|m| m.corrections.iter())
            .map(|c| (Category::StyleMixing, c as &dyn Matchable));
        let punctuation = self
            .punctuation
            .iter()
            .map(|s| (Category::Punctuation, s as &dyn Matchable));
        let euphony = self
            .euphony
            .iter()
            .map(|s| (Category::Euphony, s as &dyn Matchable));

        spelling
            .chain(tone)
            .chain(style)
            .chain(mixing)
            .chain(punctuation)
            .chain(euphony)
    }

    /// Spelling suggestions.
    pub fn spelling(&self) -> &[SpellingSuggestion] {
        &self.spelling
    }

    /// Tone suggestions.
    pub fn tone(&self) -> &[ToneSuggestion] {
        &self.tone
    }

    /// Style suggestions.
    pub fn style(&self) -> &[StyleSuggestion] {
        &self.style
    }

    /// Style mixing verdict, absent when nothing was detected or every
    /// correction has been acted on.
    pub fn style_mixing(&self) -> Option<&StyleMixing> {
        self.style_mixing.as_ref()
    }

    /// Punctuation issues.
    pub fn punctuation(&self) -> &[PunctuationIssue] {
        &self.punctuation
    }

    /// Euphony improvements.
    pub fn euphony(&self) -> &[EuphonyImprovement] {
        &self.euphony
    }

    /// Content analysis from the last cycle.
    pub fn content_analysis(&self) -> Option<&ContentAnalysis> {
        self.content_analysis.as_ref()
    }

    /// Stats from the last cycle.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Suggestion counts per category, in display order.
    pub fn counts(&self) -> IndexMap<Category, usize> {
        Category::ALL
            .iter()
            .map(|&category| {
                let count = match category {
                    Category::Spelling => self.spelling.len(),
                    Category::Tone => self.tone.len(),
                    Category::Style => self.style.len(),
                    Category::StyleMixing => {
                        self.style_mixing.as_ref().map_or(0, |m| m.corrections.len())
                    }
                    Category::Punctuation => self.punctuation.len(),
                    Category::Euphony => self.euphony.len(),
                    Category::ContentAnalysis => usize::from(self.content_analysis.is_some()),
                };
                (category, count)
            })
            .collect()
    }

    /// Number of actionable suggestions (everything but content analysis).
    pub fn suggestion_count(&self) -> usize {
        self.matchables().count()
    }

    /// Whether no actionable suggestion remains.
    pub fn is_empty(&self) -> bool {
        self.suggestion_count() == 0
    }

    /// Distinct canonical keys still live, in category order.
    pub fn live_keys(&self) -> IndexSet<String> {
        self.matchables().map(|(_, item)| item.key()).collect()
    }

    /// Whether any category still holds a suggestion keyed `target`.
    pub fn contains_key(&self, target: &str) -> bool {
        let key = normalize(target);
        self.matchables().any(|(_, item)| item.key() == key)
    }

    /// Categories holding a suggestion keyed `target`.
    pub fn categories_of(&self, target: &str) -> Vec<Category> {
        let key = normalize(target);
        let mut categories: Vec<Category> = Vec::new();
        for (category, item) in self.matchables() {
            if item.key() == key && !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Items for the batch highlight issued after a check cycle.
    ///
    /// Only spelling, tone and style take part; the other categories show up
    /// through hover highlighting alone.
    pub fn highlight_items(&self) -> Vec<HighlightItem> {
        self.matchables()
            .filter(|(category, _)| {
                matches!(category, Category::Spelling | Category::Tone | Category::Style)
            })
            .filter_map(|(category, item)| highlight_item(category, item))
            .collect()
    }

    /// Hover highlights for every live suggestion in a category with a
    /// color, in category order.
    pub fn hover_items(&self) -> Vec<HighlightItem> {
        self.matchables()
            .filter_map(|(category, item)| highlight_item(category, item))
            .collect()
    }

    /// Hover highlight for the first live suggestion keyed `target`, in any
    /// highlightable category.
    pub fn hover_item(&self, target: &str) -> Option<HighlightItem> {
        let key = normalize(target);
        self.matchables()
            .find(|(_, item)| item.key() == key)
            .and_then(|(category, item)| highlight_item(category, item))
    }

    /// SHA-256 digest of the serialized store.
    ///
    /// Equal fingerprints mean byte-identical state.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        // Serializing plain data into a Vec cannot fail.
        if let Ok(bytes) = serde_json::to_vec(self) {
            hasher.update(&bytes);
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

fn highlight_item(category: Category, item: &dyn Matchable) -> Option<HighlightItem> {
    let color = category.highlight_color()?;
    Some(HighlightItem::new(item.matching_text().trim(), color))
}
