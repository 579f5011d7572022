//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Proofmark: AI-assisted proofreading from the command line
#[derive(Parser)]
#[command(name = "proofmark")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a text file and list suggestions by category
    Check {
        /// Path to the text file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        options: CheckOptions,

        /// Print the suggestion store and report as JSON
        #[arg(long)]
        json: bool,

        /// Save the check report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a text file and apply the first alternative of every spelling,
    /// tone and style suggestion
    Fix {
        /// Path to the text file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        options: CheckOptions,

        /// Output path for the corrected text (default: <file>.fixed.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Options shared by every command that runs a check cycle.
#[derive(Args, Clone, Debug)]
pub struct CheckOptions {
    /// Model identifier passed to the provider
    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: String,

    /// Document type hint (e.g., "letter", "essay")
    #[arg(long, default_value = "general")]
    pub doc_type: String,

    /// Target tone; enables the tone branch
    #[arg(long)]
    pub tone: Option<String>,

    /// Target language style (e.g., "sadhu", "chalito"); "none" disables
    #[arg(long)]
    pub style: Option<String>,

    /// Sampling temperature sent with every request (0.0-2.0)
    #[arg(long, default_value_t = 0.3)]
    pub temperature: f64,

    /// Chat-completions endpoint for OpenAI-compatible providers
    #[arg(long)]
    pub api_url: Option<String>,

    /// Answer from a JSON file of scripted responses keyed by branch
    /// (main, tone, style, content_analysis) instead of calling a provider
    #[arg(long, value_name = "FILE")]
    pub mock_responses: Option<PathBuf>,
}
