//! Main Proofreader struct and public API.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::info;

use crate::check::{CheckReport, fan_out, precheck};
use crate::config::{CheckSettings, ProofreaderConfig};
use crate::debounce::HighlightDebouncer;
use crate::document::{DocumentAdapter, HighlightColor, HighlightItem, SerializedDocument};
use crate::error::{ProofmarkError, Result};
use crate::llm::SuggestionProvider;
use crate::normalize::word_count;
use crate::store::SuggestionStore;
use crate::suggestion::Stats;

/// Proofreading session over one live document.
///
/// Owns the suggestion store and coordinates the provider, the document, and
/// hover highlighting. All document access goes through a
/// [`SerializedDocument`], so a hover highlight never interleaves with an
/// apply or a check cycle.
pub struct Proofreader {
    config: ProofreaderConfig,
    provider: Arc<dyn SuggestionProvider>,
    document: Arc<dyn DocumentAdapter>,
    store: SuggestionStore,
    debouncer: HighlightDebouncer,
}

impl Proofreader {
    /// Create a proofreader with the default configuration.
    pub fn new(
        document: Arc<dyn DocumentAdapter>,
        provider: Arc<dyn SuggestionProvider>,
    ) -> Self {
        Self::build(document, provider, ProofreaderConfig::default())
    }

    /// Create a proofreader with custom configuration.
    ///
    /// # Errors
    /// [`ProofmarkError::Config`] when the configuration does not validate.
    pub fn with_config(
        document: Arc<dyn DocumentAdapter>,
        provider: Arc<dyn SuggestionProvider>,
        config: ProofreaderConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(document, provider, config))
    }

    fn build(
        document: Arc<dyn DocumentAdapter>,
        provider: Arc<dyn SuggestionProvider>,
        config: ProofreaderConfig,
    ) -> Self {
        let document: Arc<dyn DocumentAdapter> = Arc::new(SerializedDocument::new(document));
        let debouncer = HighlightDebouncer::new(Arc::clone(&document), config.hover_debounce);

        Self {
            config,
            provider,
            document,
            store: SuggestionStore::new(),
            debouncer,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ProofreaderConfig {
        &self.config
    }

    /// Current suggestion state.
    pub fn store(&self) -> &SuggestionStore {
        &self.store
    }

    /// Read the document (selection first) and run a check cycle on it.
    ///
    /// A missing credential is refused before the document is read.
    pub async fn check_document(&mut self, settings: &CheckSettings) -> Result<CheckReport> {
        settings
            .credential()
            .ok_or(ProofmarkError::MissingCredential)?;
        let text = self.document.fetch_text().await?;
        self.run_check(&text, settings).await
    }

    /// Run one check cycle over `document_text`.
    ///
    /// Refuses without touching the network or the document when the
    /// credential is missing or the text is blank. Otherwise resets all
    /// state, dispatches the four branches with staggered starts, waits for
    /// all of them, ingests whatever they produced, recomputes stats, and
    /// issues one batch highlight for spelling, tone and style.
    pub async fn run_check(
        &mut self,
        document_text: &str,
        settings: &CheckSettings,
    ) -> Result<CheckReport> {
        let credential = precheck(document_text, settings)?;

        self.debouncer.cancel();
        self.store.reset();
        self.document.clear_all_highlights().await?;

        let results = fan_out(
            self.provider.as_ref(),
            document_text,
            credential,
            settings,
            &self.config.stagger,
            self.config.temperature,
        )
        .await;

        let mut branches = IndexMap::new();
        for result in results {
            branches.insert(result.branch, result.outcome);
            for items in result.items {
                self.store.ingest(items);
            }
        }

        let stats = Stats::compute(word_count(document_text), self.store.spelling().len());
        self.store.set_stats(stats);

        let items = self.store.highlight_items();
        self.document.batch_highlight(&items).await?;

        info!(
            words = stats.total_words,
            errors = stats.error_count,
            accuracy = stats.accuracy,
            suggestions = self.store.suggestion_count(),
            "check complete"
        );

        Ok(CheckReport {
            stats,
            branches,
            counts: self.store.counts(),
            highlighted: items.len(),
            completed_at: Utc::now(),
        })
    }

    /// Replace `target` in the document and prune it from every category.
    ///
    /// Returns `false`, leaving all state untouched, when the document no
    /// longer contains the text.
    pub async fn apply(&mut self, target: &str, replacement: &str) -> Result<bool> {
        self.store
            .apply(self.document.as_ref(), target, replacement)
            .await
    }

    /// Prune `target` from every category without editing the document.
    pub fn dismiss(&mut self, target: &str) -> usize {
        self.store.dismiss(target)
    }

    /// Highlight `text` after the hover quiet period, superseding any
    /// pending hover.
    pub fn hover(&mut self, text: impl Into<String>, color: HighlightColor) {
        self.debouncer.hover(HighlightItem::new(text, color));
    }

    /// Hover the live suggestion keyed `target`, in its category's color.
    ///
    /// Returns `false` when nothing live carries that key.
    pub fn hover_suggestion(&mut self, target: &str) -> bool {
        match self.store.hover_item(target) {
            Some(item) => {
                self.debouncer.hover(item);
                true
            }
            None => false,
        }
    }
}
