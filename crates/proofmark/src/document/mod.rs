//! Access to the live document being proofread.
//!
//! The proofreader never owns the document text. Everything it does to the
//! document goes through [`DocumentAdapter`], which models the coarse
//! primitives a word-processor host offers: read, search, highlight, replace
//! and clear. All matching is by text content, never by stored offsets.
//!
//! # Adapters
//!
//! - [`InMemoryDocument`] - a complete in-process implementation, used by the
//!   CLI and by tests
//! - [`SerializedDocument`] - wraps any adapter so that calls never
//!   interleave

mod matching;
mod memory;
mod serial;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use matching::{find_matches, is_whole_word_search, normalize_line_endings};
pub use memory::{AdapterCall, HighlightSpan, InMemoryDocument};
pub use serial::SerializedDocument;

/// A half-open byte range into the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a range covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the two ranges share at least one byte.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `offset` falls inside the range.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A highlight color as understood by the host (typically a hex string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightColor(String);

impl HighlightColor {
    /// Create a color from its host representation.
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    /// The host representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a batched highlight: every match of `text` gets `color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightItem {
    pub text: String,
    pub color: HighlightColor,
}

impl HighlightItem {
    /// Create a highlight item.
    pub fn new(text: impl Into<String>, color: HighlightColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Operations the proofreader needs from a document host.
///
/// Implementations must be thread-safe (Send + Sync) so a single adapter can
/// be shared between the check cycle and the hover debouncer.
#[async_trait]
pub trait DocumentAdapter: Send + Sync {
    /// Text of the current selection if it is non-blank, otherwise the whole
    /// document. Line endings are normalized to `\n`.
    async fn fetch_text(&self) -> Result<String>;

    /// Find every match of `needle`, case-insensitively, in document order.
    ///
    /// A needle without internal whitespace matches whole words only; a
    /// needle with whitespace matches anywhere, including inside longer runs.
    async fn search(&self, needle: &str) -> Result<Vec<TextRange>>;

    /// Mark `range` with `color`.
    async fn highlight(&self, range: TextRange, color: &HighlightColor) -> Result<()>;

    /// Replace the first match of `needle` with `new_text`, clearing that
    /// range's highlight. Returns whether any match existed.
    async fn replace_first(&self, needle: &str, new_text: &str) -> Result<bool>;

    /// Remove every highlight in the document.
    async fn clear_all_highlights(&self) -> Result<()>;

    /// Highlight every match of every item, in input order, so later items
    /// win where matches overlap.
    async fn batch_highlight(&self, items: &[HighlightItem]) -> Result<()> {
        for item in items {
            for range in self.search(&item.text).await? {
                self.highlight(range, &item.color).await?;
            }
        }
        Ok(())
    }
}
