//! In-memory document adapter.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::matching::{find_matches, normalize_line_endings};
use super::{DocumentAdapter, HighlightColor, HighlightItem, TextRange};

/// A highlight applied to a range of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub range: TextRange,
    pub color: HighlightColor,
}

/// A record of one adapter operation, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterCall {
    FetchText,
    Search(String),
    Highlight(TextRange, HighlightColor),
    ReplaceFirst { needle: String, new_text: String },
    ClearAllHighlights,
    BatchHighlight(Vec<HighlightItem>),
}

impl AdapterCall {
    /// Whether this call put highlights on the document.
    pub fn is_highlight(&self) -> bool {
        matches!(self, AdapterCall::Highlight(..) | AdapterCall::BatchHighlight(_))
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    text: String,
    selection: Option<TextRange>,
    // Application order; the last span covering a byte decides its color.
    spans: Vec<HighlightSpan>,
    calls: Vec<AdapterCall>,
}

impl DocumentState {
    fn apply_highlight(&mut self, range: TextRange, color: &HighlightColor) {
        if range.is_empty() || range.end > self.text.len() {
            return;
        }
        self.spans.push(HighlightSpan {
            range,
            color: color.clone(),
        });
    }

    fn selected_text(&self) -> Option<&str> {
        let range = self.selection?;
        self.text
            .get(range.start..range.end)
            .filter(|s| !s.trim().is_empty())
    }

    fn replace(&mut self, range: TextRange, new_text: &str) {
        self.text.replace_range(range.start..range.end, new_text);

        let shift = |offset: usize| -> usize {
            if offset >= range.end {
                offset - range.len() + new_text.len()
            } else {
                offset
            }
        };

        self.spans.retain(|span| !span.range.overlaps(&range));
        for span in &mut self.spans {
            span.range = TextRange::new(shift(span.range.start), shift(span.range.end));
        }

        if let Some(selection) = self.selection {
            let start = shift(selection.start).min(self.text.len());
            let end = shift(selection.end).clamp(start, self.text.len());
            self.selection = Some(TextRange::new(start, end));
        }
    }
}

/// A document held entirely in memory.
///
/// Implements the full [`DocumentAdapter`] contract and additionally keeps
/// a log of every call made against it, which tests use to count adapter
/// traffic.
///
/// # Example
///
/// ```
/// use proofmark::document::InMemoryDocument;
///
/// let doc = InMemoryDocument::new("Teh cat sat.");
/// assert_eq!(doc.text(), "Teh cat sat.");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    state: Mutex<DocumentState>,
}

impl InMemoryDocument {
    /// Create a document with the given text and no selection.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(DocumentState {
                text: text.into(),
                ..DocumentState::default()
            }),
        }
    }

    /// Select `range` (byte offsets). Ranges outside the text or off a
    /// character boundary select nothing.
    pub fn with_selection(self, range: TextRange) -> Self {
        self.set_selection(Some(range));
        self
    }

    /// Change or clear the selection.
    pub fn set_selection(&self, range: Option<TextRange>) {
        let mut state = self.lock();
        let valid = range.filter(|r| state.text.get(r.start..r.end).is_some());
        state.selection = valid;
    }

    /// Replace the whole text, as if the user edited the document.
    ///
    /// Existing highlights and the selection are dropped.
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.lock();
        state.text = text.into();
        state.selection = None;
        state.spans.clear();
    }

    /// Current document text, unmodified.
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// All live highlight spans, in application order.
    pub fn spans(&self) -> Vec<HighlightSpan> {
        self.lock().spans.clone()
    }

    /// The color showing at byte `offset`, if any.
    pub fn color_at(&self, offset: usize) -> Option<HighlightColor> {
        self.lock()
            .spans
            .iter()
            .rev()
            .find(|span| span.range.contains(offset))
            .map(|span| span.color.clone())
    }

    /// The color showing at the first occurrence of `text`, if any.
    pub fn color_of(&self, text: &str) -> Option<HighlightColor> {
        let start = self.lock().text.find(text)?;
        self.color_at(start)
    }

    /// Every adapter call made so far.
    pub fn calls(&self) -> Vec<AdapterCall> {
        self.lock().calls.clone()
    }

    /// Number of calls that put highlights on the document.
    pub fn highlight_call_count(&self) -> usize {
        self.lock().calls.iter().filter(|c| c.is_highlight()).count()
    }

    /// Forget the call log.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentAdapter for InMemoryDocument {
    async fn fetch_text(&self) -> Result<String> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::FetchText);
        let text = state.selected_text().unwrap_or(&state.text);
        Ok(normalize_line_endings(text))
    }

    async fn search(&self, needle: &str) -> Result<Vec<TextRange>> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::Search(needle.to_string()));
        Ok(find_matches(&state.text, needle))
    }

    async fn highlight(&self, range: TextRange, color: &HighlightColor) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::Highlight(range, color.clone()));
        state.apply_highlight(range, color);
        Ok(())
    }

    async fn replace_first(&self, needle: &str, new_text: &str) -> Result<bool> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::ReplaceFirst {
            needle: needle.to_string(),
            new_text: new_text.to_string(),
        });

        match find_matches(&state.text, needle).first() {
            Some(&range) => {
                state.replace(range, new_text);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear_all_highlights(&self) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::ClearAllHighlights);
        state.spans.clear();
        Ok(())
    }

    async fn batch_highlight(&self, items: &[HighlightItem]) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(AdapterCall::BatchHighlight(items.to_vec()));
        for item in items {
            for range in find_matches(&state.text, &item.text) {
                state.apply_highlight(range, &item.color);
            }
        }
        Ok(())
    }
}
