//! Mock suggestion provider for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;

use crate::error::{ProofmarkError, Result};

use super::provider::{Branch, ProviderRequest, SuggestionProvider};

/// What the mock answers for one branch.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this JSON value.
    Json(Value),
    /// Return `Ok(None)`.
    Nothing,
    /// Fail as if the provider were unreachable.
    Fail(String),
    /// Fail as if the provider answered with unparseable text.
    Malformed(String),
}

/// A request the mock received, with the (tokio) time it arrived.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: ProviderRequest,
    pub issued_at: Instant,
}

/// Mock provider that returns scripted responses per branch.
///
/// Unscripted branches answer `Ok(None)`. Every request is recorded so tests
/// can check which branches were dispatched and when.
pub struct MockProvider {
    replies: HashMap<Branch, MockReply>,
    latency: HashMap<Branch, Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockProvider {
    /// Create a mock with no scripted replies.
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            latency: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer `branch` with `response`.
    pub fn with_response(mut self, branch: Branch, response: Value) -> Self {
        self.replies.insert(branch, MockReply::Json(response));
        self
    }

    /// Make `branch` fail with a provider error.
    pub fn with_failure(mut self, branch: Branch, message: impl Into<String>) -> Self {
        self.replies.insert(branch, MockReply::Fail(message.into()));
        self
    }

    /// Set an arbitrary reply for `branch`.
    pub fn with_reply(mut self, branch: Branch, reply: MockReply) -> Self {
        self.replies.insert(branch, reply);
        self
    }

    /// Delay `branch`'s answer by `latency` after the request arrives.
    pub fn with_latency(mut self, branch: Branch, latency: Duration) -> Self {
        self.latency.insert(branch, latency);
        self
    }

    /// Load replies from a JSON object keyed by branch label
    /// (`main`, `tone`, `style`, `content_analysis`).
    pub fn from_json(script: &Value) -> Result<Self> {
        let object = script.as_object().ok_or_else(|| {
            ProofmarkError::Config("mock script must be a JSON object".to_string())
        })?;

        let mut mock = Self::new();
        for branch in Branch::ALL {
            if let Some(response) = object.get(branch.label()) {
                mock = mock.with_response(branch, response.clone());
            }
        }
        Ok(mock)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Branches that reached the provider, in arrival order.
    pub fn dispatched_branches(&self) -> Vec<Branch> {
        self.requests().iter().map(|r| r.request.branch).collect()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SuggestionProvider for MockProvider {
    async fn suggest(&self, request: &ProviderRequest) -> Result<Option<Value>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                request: request.clone(),
                issued_at: Instant::now(),
            });

        if let Some(latency) = self.latency.get(&request.branch) {
            tokio::time::sleep(*latency).await;
        }

        match self.replies.get(&request.branch) {
            Some(MockReply::Json(value)) => Ok(Some(value.clone())),
            Some(MockReply::Nothing) | None => Ok(None),
            Some(MockReply::Fail(message)) => Err(ProofmarkError::Provider(message.clone())),
            Some(MockReply::Malformed(message)) => {
                Err(ProofmarkError::MalformedResponse(message.clone()))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
