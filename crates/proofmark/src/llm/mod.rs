//! Suggestion provider integration.
//!
//! A provider receives the document text plus per-branch parameters and
//! returns loosely structured JSON. The core never trusts that JSON; see
//! [`crate::suggestion::parse_branch`] for how it is coerced.
//!
//! # Supported Providers
//!
//! - **OpenAI-compatible** - any chat-completions endpoint with JSON mode
//! - **Mock** - scripted responses for tests and offline runs
//!
//! # Example
//!
//! ```no_run
//! use proofmark::llm::{Branch, MockProvider};
//! use serde_json::json;
//!
//! let provider = MockProvider::new()
//!     .with_response(Branch::Main, json!({"spellingErrors": []}));
//! ```

mod mock;
mod openai;
mod prompts;
mod provider;

pub use mock::{MockProvider, MockReply, RecordedRequest};
pub use openai::OpenAiProvider;
pub use provider::{Branch, LlmConfig, ProviderRequest, SuggestionProvider};
