//! CLI command implementations.

pub mod check;
pub mod fix;

use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use proofmark::llm::{LlmConfig, MockProvider, OpenAiProvider, SuggestionProvider};
use proofmark::{CheckSettings, InMemoryDocument, Proofreader, ProofreaderConfig};
use tracing::debug;

use crate::cli::CheckOptions;

/// Environment variables consulted for the provider credential, in order.
pub const CREDENTIAL_VARS: [&str; 2] = ["PROOFMARK_API_KEY", "OPENAI_API_KEY"];

/// A proofreading session over one text file.
pub struct Session {
    pub document: Arc<InMemoryDocument>,
    pub proofreader: Proofreader,
    pub settings: CheckSettings,
}

/// Load `file` and wire up the provider selected by `options`.
pub fn open_session(
    file: &Path,
    options: &CheckOptions,
) -> Result<Session, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let text = fs::read_to_string(file)?;

    let mut settings = CheckSettings::new(&options.model).with_doc_type(&options.doc_type);
    if let Some(tone) = &options.tone {
        settings = settings.with_tone(tone);
    }
    if let Some(style) = &options.style {
        settings = settings.with_style(style);
    }

    let provider: Arc<dyn SuggestionProvider> = match &options.mock_responses {
        Some(script_path) => {
            let script: serde_json::Value = serde_json::from_str(&fs::read_to_string(script_path)?)?;
            // Scripted runs never leave the process, so any credential will do.
            settings = settings.with_credential("mock");
            Arc::new(MockProvider::from_json(&script)?)
        }
        None => {
            if let Some(credential) = credential_from_env() {
                settings = settings.with_credential(credential);
            }
            let mut config = LlmConfig::default();
            if let Some(url) = &options.api_url {
                config.api_url = url.clone();
            }
            Arc::new(OpenAiProvider::with_config(config)?)
        }
    };

    debug!(
        provider = provider.name(),
        model = %settings.model,
        has_credential = settings.credential().is_some(),
        "session ready"
    );

    let document = Arc::new(InMemoryDocument::new(text));
    let config = ProofreaderConfig::new().with_temperature(options.temperature);
    let proofreader = Proofreader::with_config(document.clone(), provider, config)?;

    Ok(Session {
        document,
        proofreader,
        settings,
    })
}

/// First non-blank credential among [`CREDENTIAL_VARS`].
fn credential_from_env() -> Option<String> {
    CREDENTIAL_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}
