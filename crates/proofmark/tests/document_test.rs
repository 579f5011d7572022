//! Integration tests for the document adapter contract.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use proofmark::document::{DocumentAdapter, SerializedDocument, find_matches};
use proofmark::{HighlightColor, HighlightItem, InMemoryDocument, Result, TextRange};

/// Host that only implements the primitives and takes time on each call.
///
/// Tracks how many calls are in flight at once.
struct SlowHost {
    text: String,
    marks: Mutex<Vec<(TextRange, HighlightColor)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowHost {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marks: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    async fn busy(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn color_at(&self, offset: usize) -> Option<HighlightColor> {
        self.marks
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(range, _)| range.contains(offset))
            .map(|(_, color)| color.clone())
    }
}

#[async_trait]
impl DocumentAdapter for SlowHost {
    async fn fetch_text(&self) -> Result<String> {
        self.busy().await;
        Ok(self.text.clone())
    }

    async fn search(&self, needle: &str) -> Result<Vec<TextRange>> {
        self.busy().await;
        Ok(find_matches(&self.text, needle))
    }

    async fn highlight(&self, range: TextRange, color: &HighlightColor) -> Result<()> {
        self.busy().await;
        self.marks.lock().unwrap().push((range, color.clone()));
        Ok(())
    }

    async fn replace_first(&self, _needle: &str, _new_text: &str) -> Result<bool> {
        self.busy().await;
        Ok(false)
    }

    async fn clear_all_highlights(&self) -> Result<()> {
        self.busy().await;
        self.marks.lock().unwrap().clear();
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_default_batch_highlight_last_item_wins() {
    let host = SlowHost::new("the quick fox, the quick dog");
    let items = [
        HighlightItem::new("the quick", HighlightColor::new("red")),
        HighlightItem::new("quick", HighlightColor::new("blue")),
    ];

    host.batch_highlight(&items).await.unwrap();

    assert_eq!(host.color_at(0), Some(HighlightColor::new("red")));
    assert_eq!(host.color_at(4), Some(HighlightColor::new("blue")));
    assert_eq!(host.color_at(19), Some(HighlightColor::new("blue")));
    assert_eq!(host.marks.lock().unwrap().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_serialized_document_never_interleaves() {
    let host = Arc::new(SlowHost::new("alpha beta gamma"));
    let document = Arc::new(SerializedDocument::new(host.clone()));

    let mut tasks = Vec::new();
    for word in ["alpha", "beta", "gamma"] {
        let document = Arc::clone(&document);
        tasks.push(tokio::spawn(async move {
            let item = HighlightItem::new(word, HighlightColor::new("yellow"));
            document.batch_highlight(std::slice::from_ref(&item)).await
        }));
    }
    let fetch = {
        let document = Arc::clone(&document);
        tokio::spawn(async move { document.fetch_text().await })
    };

    for task in tasks {
        task.await.unwrap().unwrap();
    }
    assert_eq!(fetch.await.unwrap().unwrap(), "alpha beta gamma");
    assert_eq!(host.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(host.marks.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_in_memory_document_behind_trait_object() {
    let memory = Arc::new(InMemoryDocument::new("Teh cat. teh hat. Tehran."));
    let document: Arc<dyn DocumentAdapter> = memory.clone();

    let matches = document.search("TEH").await.unwrap();
    assert_eq!(matches, vec![TextRange::new(0, 3), TextRange::new(9, 12)]);

    assert!(document.replace_first("teh", "The").await.unwrap());
    assert_eq!(memory.text(), "The cat. teh hat. Tehran.");

    assert!(!document.replace_first("dog", "cat").await.unwrap());
    assert!(!document.replace_first("   ", "x").await.unwrap());
    assert_eq!(memory.text(), "The cat. teh hat. Tehran.");
}

#[tokio::test]
async fn test_replace_with_longer_text_shifts_highlights() {
    let memory = InMemoryDocument::new("gonna go, gonna stay");
    memory
        .batch_highlight(&[HighlightItem::new("stay", HighlightColor::new("green"))])
        .await
        .unwrap();

    memory.replace_first("gonna", "going to").await.unwrap();

    assert_eq!(memory.text(), "going to go, gonna stay");
    assert_eq!(memory.color_of("stay"), Some(HighlightColor::new("green")));
    assert_eq!(memory.color_of("going to"), None);
}

#[tokio::test]
async fn test_replace_skips_embedded_candidate_for_overlapping_word() {
    let memory = InMemoryDocument::new("ba.a.a and more");

    assert!(memory.replace_first("A.A", "X").await.unwrap());
    assert_eq!(memory.text(), "ba.X and more");
}
