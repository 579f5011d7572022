//! OpenAI-compatible chat-completions provider implementation.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{ProofmarkError, Result};

use super::prompts;
use super::provider::{LlmConfig, ProviderRequest, SuggestionProvider};

/// Provider backed by an OpenAI-compatible chat-completions endpoint.
///
/// The credential and model come with each request; the provider itself only
/// holds the HTTP client and endpoint settings.
pub struct OpenAiProvider {
    client: Client,
    config: LlmConfig,
}

impl OpenAiProvider {
    /// Create a provider for the default OpenAI endpoint.
    pub fn new() -> Result<Self> {
        Self::with_config(LlmConfig::default())
    }

    /// Create a provider with custom configuration.
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProofmarkError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the configuration for this provider.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Build headers for API requests.
    fn build_headers(credential: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", credential))
                .map_err(|e| ProofmarkError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Send one branch request and return the model's message text.
    async fn send_message(&self, request: &ProviderRequest) -> Result<String> {
        let body = json!({
            "model": request.model_id,
            "max_tokens": self.config.max_tokens,
            "temperature": request.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": prompts::branch_prompt(request)
                }
            ]
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .headers(Self::build_headers(&request.credential)?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProofmarkError::Provider(format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProofmarkError::Provider(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let api_response: ChatResponse = response.json().await.map_err(|e| {
            ProofmarkError::MalformedResponse(format!("Failed to parse API response: {}", e))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProofmarkError::MalformedResponse("No message in response".to_string()))
    }
}

/// Parse JSON from model output, handling markdown code blocks.
pub(crate) fn parse_json_response(response: &str) -> Result<Value> {
    let json_str = if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(response)
    } else if response.contains("```") {
        response
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(response)
    } else {
        response.trim()
    };

    serde_json::from_str(json_str)
        .map_err(|e| ProofmarkError::MalformedResponse(format!("Failed to parse JSON: {}", e)))
}

#[async_trait]
impl SuggestionProvider for OpenAiProvider {
    async fn suggest(&self, request: &ProviderRequest) -> Result<Option<Value>> {
        let text = self.send_message(request).await?;
        debug!(
            branch = request.branch.label(),
            bytes = text.len(),
            "received provider message"
        );

        match parse_json_response(&text)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Chat-completions response structure.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Message in a completion choice.
#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_from_markdown() {
        let response = r#"```json
{
    "spellingErrors": [{"wrong": "teh", "suggestions": ["the"]}]
}
```"#;

        let parsed = parse_json_response(response).unwrap();
        assert_eq!(parsed["spellingErrors"][0]["wrong"], "teh");
    }

    #[test]
    fn test_parse_plain_json() {
        let parsed = parse_json_response(r#"  {"toneConversions": []} "#).unwrap();
        assert!(parsed["toneConversions"].is_array());
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        assert!(matches!(
            parse_json_response("Sorry, I cannot help with that."),
            Err(ProofmarkError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_null() {
        assert_eq!(parse_json_response("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_invalid_credential_header() {
        assert!(OpenAiProvider::build_headers("bad\nkey").is_err());
        assert!(OpenAiProvider::build_headers("sk-test").is_ok());
    }

    #[test]
    fn test_default_config() {
        let provider = OpenAiProvider::new().unwrap();
        assert!(provider.config().api_url.ends_with("/chat/completions"));
        assert_eq!(provider.name(), "openai");
    }
}
