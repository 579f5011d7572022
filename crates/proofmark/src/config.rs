//! Configuration for check cycles and hover highlighting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProofmarkError, Result};

/// Delays before each branch's provider call, relative to the start of the
/// cycle. The main branch always goes out immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaggerConfig {
    pub tone: Duration,
    pub style: Duration,
    pub content_analysis: Duration,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            tone: Duration::from_millis(200),
            style: Duration::from_millis(400),
            content_analysis: Duration::from_millis(600),
        }
    }
}

impl StaggerConfig {
    /// Dispatch every branch immediately.
    pub fn none() -> Self {
        Self {
            tone: Duration::ZERO,
            style: Duration::ZERO,
            content_analysis: Duration::ZERO,
        }
    }
}

/// Configuration for a [`crate::Proofreader`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofreaderConfig {
    /// Branch dispatch offsets.
    pub stagger: StaggerConfig,
    /// Quiet period before a hover highlight fires.
    pub hover_debounce: Duration,
    /// Sampling temperature sent with every provider request.
    pub temperature: f64,
}

impl Default for ProofreaderConfig {
    fn default() -> Self {
        Self {
            stagger: StaggerConfig::default(),
            hover_debounce: Duration::from_millis(300),
            temperature: 0.3,
        }
    }
}

impl ProofreaderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the branch stagger offsets.
    pub fn with_stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = stagger;
        self
    }

    /// Set the hover quiet period.
    pub fn with_hover_debounce(mut self, quiet: Duration) -> Self {
        self.hover_debounce = quiet;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Check that values are usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ProofmarkError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Per-check parameters chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Provider credential. Never serialized.
    #[serde(skip)]
    pub credential: Option<String>,
    /// Model identifier passed to the provider.
    pub model: String,
    /// Document type identifier (e.g. "letter", "essay").
    pub doc_type: String,
    /// Selected tone, if any.
    pub tone: Option<String>,
    /// Selected language style; `"none"` means no style conversion.
    pub style: Option<String>,
}

impl CheckSettings {
    /// Create settings for `model` with no credential, tone, or style.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            doc_type: "general".to_string(),
            ..Self::default()
        }
    }

    /// Set the credential.
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Set the document type.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = doc_type.into();
        self
    }

    /// Select a tone.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Select a language style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// The credential, if present and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// The tone to request, if one is selected.
    pub fn selected_tone(&self) -> Option<&str> {
        self.tone.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// The style to request, if one other than "none" is selected.
    pub fn selected_style(&self) -> Option<&str> {
        self.style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
    }
}
