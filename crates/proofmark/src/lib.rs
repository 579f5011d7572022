//! proofmark: suggestion synchronization core for an AI-assisted proofreader.
//!
//! proofmark annotates a live document with provider-generated suggestions
//! (spelling, tone, style, style mixing, punctuation, euphony) and keeps that
//! state consistent while the user accepts or dismisses suggestions and the
//! document changes underneath.
//!
//! # Core Principles
//!
//! - **Text identity**: suggestions are matched by normalized text, never by
//!   stored offsets
//! - **Partial failure**: a failing provider branch empties that branch only
//! - **Untrusted input**: provider output is coerced field by field
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use proofmark::document::InMemoryDocument;
//! use proofmark::llm::{Branch, MockProvider};
//! use proofmark::{CheckSettings, Proofreader};
//! use serde_json::json;
//!
//! # async fn example() -> proofmark::Result<()> {
//! let document = Arc::new(InMemoryDocument::new("Teh cat sat."));
//! let provider = MockProvider::new().with_response(
//!     Branch::Main,
//!     json!({"spellingErrors": [{"wrong": "Teh", "suggestions": ["The"]}]}),
//! );
//!
//! let mut proofreader = Proofreader::new(document.clone(), Arc::new(provider));
//! let settings = CheckSettings::new("gpt-4o-mini").with_credential("sk-test");
//! let report = proofreader.run_check(&document.text(), &settings).await?;
//! println!("Accuracy: {}%", report.stats.accuracy);
//!
//! proofreader.apply("teh", "The").await?;
//! assert_eq!(document.text(), "The cat sat.");
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod llm;
pub mod normalize;
pub mod store;
pub mod suggestion;

mod proofreader;

pub use crate::proofreader::Proofreader;
pub use check::{BranchOutcome, CheckReport};
pub use config::{CheckSettings, ProofreaderConfig, StaggerConfig};
pub use debounce::HighlightDebouncer;
pub use document::{DocumentAdapter, HighlightColor, HighlightItem, InMemoryDocument, TextRange};
pub use error::{ProofmarkError, Result};
pub use llm::{Branch, MockProvider, OpenAiProvider, SuggestionProvider};
pub use normalize::normalize;
pub use store::SuggestionStore;
pub use suggestion::{Category, Stats};
