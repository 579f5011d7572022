//! One check cycle: staggered fan-out to the provider and fan-in of results.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CheckSettings, StaggerConfig};
use crate::error::{ProofmarkError, Result};
use crate::llm::{Branch, ProviderRequest, SuggestionProvider};
use crate::suggestion::{Category, CategoryItems, Stats, parse_branch};

/// How one branch of a check cycle ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BranchOutcome {
    /// The provider answered; `suggestions` were kept after coercion.
    Dispatched { suggestions: usize },
    /// Not selected for this cycle; the provider was not contacted.
    Skipped,
    /// The provider failed; the branch contributed nothing.
    Failed { reason: String },
}

impl BranchOutcome {
    /// Whether the provider was contacted.
    pub fn was_dispatched(&self) -> bool {
        !matches!(self, BranchOutcome::Skipped)
    }
}

/// The settled result of one branch.
#[derive(Debug, Clone)]
pub struct BranchResult {
    pub branch: Branch,
    pub outcome: BranchOutcome,
    pub items: Vec<CategoryItems>,
}

/// Summary of a completed check cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub stats: Stats,
    pub branches: IndexMap<Branch, BranchOutcome>,
    /// Suggestions per category after ingestion.
    pub counts: IndexMap<Category, usize>,
    /// Number of items in the post-check batch highlight.
    pub highlighted: usize,
    pub completed_at: DateTime<Utc>,
}

impl CheckReport {
    /// Branches whose provider call failed.
    pub fn failed_branches(&self) -> Vec<Branch> {
        self.branches
            .iter()
            .filter(|(_, outcome)| matches!(outcome, BranchOutcome::Failed { .. }))
            .map(|(&branch, _)| branch)
            .collect()
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ProofmarkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Check that a cycle may start: a credential is present and the text is
/// not blank. Touches neither the network nor the document.
pub fn precheck<'a>(document_text: &str, settings: &'a CheckSettings) -> Result<&'a str> {
    let credential = settings.credential().ok_or(ProofmarkError::MissingCredential)?;
    if document_text.trim().is_empty() {
        return Err(ProofmarkError::EmptyDocument);
    }
    Ok(credential)
}

/// Build the provider request for `branch`, or `None` when the user did not
/// select it.
pub fn branch_request(
    branch: Branch,
    document_text: &str,
    credential: &str,
    settings: &CheckSettings,
    temperature: f64,
) -> Option<ProviderRequest> {
    let (tone, style) = match branch {
        Branch::Main | Branch::ContentAnalysis => (None, None),
        Branch::Tone => (Some(settings.selected_tone()?.to_string()), None),
        Branch::Style => (None, Some(settings.selected_style()?.to_string())),
    };

    Some(ProviderRequest {
        branch,
        document_text: document_text.to_string(),
        doc_type: settings.doc_type.clone(),
        tone,
        style,
        credential: credential.to_string(),
        model_id: settings.model.clone(),
        temperature,
    })
}

/// Offset before `branch` is dispatched.
pub fn stagger_delay(branch: Branch, stagger: &StaggerConfig) -> Duration {
    match branch {
        Branch::Main => Duration::ZERO,
        Branch::Tone => stagger.tone,
        Branch::Style => stagger.style,
        Branch::ContentAnalysis => stagger.content_analysis,
    }
}

/// Run one branch to settlement.
///
/// An unselected branch resolves at once without waiting out its stagger.
/// A provider error degrades to empty collections for the branch.
pub async fn run_branch(
    provider: &dyn SuggestionProvider,
    branch: Branch,
    request: Option<ProviderRequest>,
    delay: Duration,
) -> BranchResult {
    let empty = || {
        branch
            .categories()
            .iter()
            .map(|&c| CategoryItems::empty(c))
            .collect::<Vec<_>>()
    };

    let Some(request) = request else {
        debug!(branch = branch.label(), "branch not selected");
        return BranchResult {
            branch,
            outcome: BranchOutcome::Skipped,
            items: empty(),
        };
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    debug!(
        branch = branch.label(),
        provider = provider.name(),
        ?delay,
        "dispatching branch"
    );

    match provider.suggest(&request).await {
        Ok(response) => {
            let items = parse_branch(branch, response.as_ref());
            let suggestions = items.iter().map(CategoryItems::len).sum();
            BranchResult {
                branch,
                outcome: BranchOutcome::Dispatched { suggestions },
                items,
            }
        }
        Err(e) => {
            warn!(branch = branch.label(), error = %e, "branch failed; continuing without it");
            BranchResult {
                branch,
                outcome: BranchOutcome::Failed {
                    reason: e.to_string(),
                },
                items: empty(),
            }
        }
    }
}

/// Dispatch all four branches concurrently and wait for every one to settle.
///
/// Results come back in [`Branch::ALL`] order.
pub async fn fan_out(
    provider: &dyn SuggestionProvider,
    document_text: &str,
    credential: &str,
    settings: &CheckSettings,
    stagger: &StaggerConfig,
    temperature: f64,
) -> [BranchResult; 4] {
    let dispatch = |branch: Branch| {
        let request = branch_request(branch, document_text, credential, settings, temperature);
        run_branch(provider, branch, request, stagger_delay(branch, stagger))
    };

    let (main, tone, style, content) = tokio::join!(
        dispatch(Branch::Main),
        dispatch(Branch::Tone),
        dispatch(Branch::Style),
        dispatch(Branch::ContentAnalysis),
    );
    [main, tone, style, content]
}
