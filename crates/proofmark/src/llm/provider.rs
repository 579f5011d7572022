//! Suggestion provider trait and request types.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::suggestion::Category;

/// One of the four request groups dispatched per check cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Spelling, punctuation, euphony and style mixing in one request.
    Main,
    /// Rewrites toward the selected tone.
    Tone,
    /// Rewrites toward the selected language style.
    Style,
    /// Informational analysis of the document type.
    ContentAnalysis,
}

impl Branch {
    /// All branches in dispatch order.
    pub const ALL: [Branch; 4] = [
        Branch::Main,
        Branch::Tone,
        Branch::Style,
        Branch::ContentAnalysis,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Branch::Main => "main",
            Branch::Tone => "tone",
            Branch::Style => "style",
            Branch::ContentAnalysis => "content_analysis",
        }
    }

    /// The store categories this branch's response fills.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Branch::Main => &[
                Category::Spelling,
                Category::Punctuation,
                Category::Euphony,
                Category::StyleMixing,
            ],
            Branch::Tone => &[Category::Tone],
            Branch::Style => &[Category::Style],
            Branch::ContentAnalysis => &[Category::ContentAnalysis],
        }
    }
}

/// Everything a provider needs to answer one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    pub branch: Branch,
    pub document_text: String,
    pub doc_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// API credential. Never serialized.
    #[serde(skip)]
    pub credential: String,
    pub model_id: String,
    pub temperature: f64,
}

/// Configuration for HTTP-backed providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chat-completions endpoint.
    pub api_url: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Client-side timeout for one request.
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            max_tokens: 4096,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Trait for suggestion providers.
///
/// Implementations must be thread-safe (Send + Sync) so the four branches of
/// a check cycle can share one provider.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Ask for suggestions for one branch.
    ///
    /// # Returns
    /// The provider's structured answer, untrusted. `Ok(None)` means the
    /// provider had nothing to say. Errors are isolated to the branch by the
    /// caller and never abort a check cycle.
    async fn suggest(&self, request: &ProviderRequest) -> Result<Option<Value>>;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
