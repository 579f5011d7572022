//! Serialized access to a shared document adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;

use super::{DocumentAdapter, HighlightColor, HighlightItem, TextRange};

/// Wraps an adapter so that at most one operation runs against the
/// underlying document at a time.
///
/// The check cycle and the hover debouncer share one document; hosts do not
/// tolerate a search racing a replace over the same ranges, so every call
/// (including a whole batch highlight) holds the gate until it completes.
pub struct SerializedDocument {
    inner: Arc<dyn DocumentAdapter>,
    gate: Mutex<()>,
}

impl SerializedDocument {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn DocumentAdapter>) -> Self {
        Self {
            inner,
            gate: Mutex::new(()),
        }
    }
}

#[async_trait]
impl DocumentAdapter for SerializedDocument {
    async fn fetch_text(&self) -> Result<String> {
        let _guard = self.gate.lock().await;
        self.inner.fetch_text().await
    }

    async fn search(&self, needle: &str) -> Result<Vec<TextRange>> {
        let _guard = self.gate.lock().await;
        self.inner.search(needle).await
    }

    async fn highlight(&self, range: TextRange, color: &HighlightColor) -> Result<()> {
        let _guard = self.gate.lock().await;
        self.inner.highlight(range, color).await
    }

    async fn replace_first(&self, needle: &str, new_text: &str) -> Result<bool> {
        let _guard = self.gate.lock().await;
        self.inner.replace_first(needle, new_text).await
    }

    async fn clear_all_highlights(&self) -> Result<()> {
        let _guard = self.gate.lock().await;
        self.inner.clear_all_highlights().await
    }

    async fn batch_highlight(&self, items: &[HighlightItem]) -> Result<()> {
        let _guard = self.gate.lock().await;
        self.inner.batch_highlight(items).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AdapterCall, InMemoryDocument};

    #[tokio::test]
    async fn test_forwards_every_operation() {
        let doc = Arc::new(InMemoryDocument::new("teh cat"));
        let serial = SerializedDocument::new(doc.clone());

        assert_eq!(serial.fetch_text().await.unwrap(), "teh cat");
        assert_eq!(serial.search("cat").await.unwrap(), vec![TextRange::new(4, 7)]);
        serial
            .batch_highlight(&[HighlightItem::new("teh", HighlightColor::new("red"))])
            .await
            .unwrap();
        assert!(serial.replace_first("teh", "the").await.unwrap());
        serial.clear_all_highlights().await.unwrap();

        assert_eq!(doc.text(), "the cat");
        assert_eq!(doc.calls().len(), 5);
        assert_eq!(doc.calls()[0], AdapterCall::FetchText);
    }

    #[tokio::test]
    async fn test_concurrent_calls_all_complete() {
        let doc = Arc::new(InMemoryDocument::new("a b c d"));
        let serial = Arc::new(SerializedDocument::new(doc.clone()));

        let red = HighlightColor::new("red");
        let (a, b, c) = tokio::join!(
            serial.search("a"),
            serial.highlight(TextRange::new(2, 3), &red),
            serial.replace_first("d", "e"),
        );
        assert_eq!(a.unwrap().len(), 1);
        b.unwrap();
        assert!(c.unwrap());
        assert_eq!(doc.calls().len(), 3);
    }
}
