//! Hover highlight debouncing.
//!
//! Hovering over a suggestion in a list highlights its text in the document.
//! Moving the pointer across a list fires many hovers in quick succession;
//! only the last one in a burst should reach the document. Each hover cancels
//! the pending one and schedules itself after a quiet period.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::document::{DocumentAdapter, HighlightItem};

/// Coalesces hover-triggered highlight requests.
///
/// At most one adapter call is made per quiet period, for the most recently
/// hovered item. Requires a running tokio runtime when [`hover`](Self::hover)
/// is called.
pub struct HighlightDebouncer {
    document: Arc<dyn DocumentAdapter>,
    quiet: Duration,
    pending: Option<CancellationToken>,
}

impl HighlightDebouncer {
    /// Create a debouncer that highlights through `document` once `quiet`
    /// has passed without another hover.
    pub fn new(document: Arc<dyn DocumentAdapter>, quiet: Duration) -> Self {
        Self {
            document,
            quiet,
            pending: None,
        }
    }

    /// Schedule a highlight for `item`, replacing any pending one.
    pub fn hover(&mut self, item: HighlightItem) {
        self.cancel();

        let cancel = CancellationToken::new();
        self.pending = Some(cancel.clone());

        let document = Arc::clone(&self.document);
        let quiet = self.quiet;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(quiet) => {}
            }

            debug!(text = %item.text, color = %item.color, "hover highlight");
            if let Err(e) = document.batch_highlight(std::slice::from_ref(&item)).await {
                warn!(error = %e, "hover highlight failed");
            }
        });
    }

    /// Drop the pending highlight, if any.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.pending.take() {
            cancel.cancel();
        }
    }
}

impl Drop for HighlightDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AdapterCall, HighlightColor, InMemoryDocument};

    fn item(text: &str) -> HighlightItem {
        HighlightItem::new(text, HighlightColor::new("yellow"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_produces_one_call_for_last_item() {
        let doc = Arc::new(InMemoryDocument::new("alpha beta gamma"));
        let mut debouncer = HighlightDebouncer::new(doc.clone(), Duration::from_millis(300));

        debouncer.hover(item("alpha"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.hover(item("beta"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.hover(item("gamma"));

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(doc.highlight_call_count(), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(
            doc.calls(),
            vec![AdapterCall::BatchHighlight(vec![item("gamma")])]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_hovers_each_fire() {
        let doc = Arc::new(InMemoryDocument::new("alpha beta"));
        let mut debouncer = HighlightDebouncer::new(doc.clone(), Duration::from_millis(300));

        debouncer.hover(item("alpha"));
        tokio::time::sleep(Duration::from_millis(350)).await;
        debouncer.hover(item("beta"));
        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(doc.highlight_call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let doc = Arc::new(InMemoryDocument::new("alpha"));
        let mut debouncer = HighlightDebouncer::new(doc.clone(), Duration::from_millis(300));

        debouncer.hover(item("alpha"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(doc.highlight_call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let doc = Arc::new(InMemoryDocument::new("alpha"));
        let mut debouncer = HighlightDebouncer::new(doc.clone(), Duration::from_millis(300));

        debouncer.hover(item("alpha"));
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(doc.highlight_call_count(), 0);
    }
}
