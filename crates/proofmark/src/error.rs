//! Error types for the proofmark library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for proofmark operations.
#[derive(Debug, Error)]
pub enum ProofmarkError {
    /// No credential was supplied for the suggestion provider.
    #[error("Missing credential: configure an API key before running a check")]
    MissingCredential,

    /// The selection (or the whole document) is blank.
    #[error("Empty document: nothing to check")]
    EmptyDocument,

    /// The suggestion provider could not be reached or rejected the request.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider answered, but not with a JSON object we can read.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Error from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for proofmark operations.
pub type Result<T> = std::result::Result<T, ProofmarkError>;
