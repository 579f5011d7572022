//! Fix command - check a file and apply the first alternative of every
//! spelling, tone and style suggestion.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use proofmark::SuggestionStore;

use super::open_session;
use crate::cli::CheckOptions;

pub async fn run(
    file: PathBuf,
    options: CheckOptions,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&file, &options)?;

    println!(
        "{} {}",
        "Checking".cyan().bold(),
        file.display().to_string().white()
    );
    let report = session.proofreader.check_document(&session.settings).await?;
    println!(
        "Accuracy before fixes: {}",
        format!("{}%", report.stats.accuracy).white().bold()
    );

    let mut applied = 0;
    let mut missed = 0;
    for (target, replacement) in planned_fixes(session.proofreader.store()) {
        // An earlier fix may already have pruned this key.
        if !session.proofreader.store().contains_key(&target) {
            continue;
        }
        if session.proofreader.apply(&target, &replacement).await? {
            applied += 1;
            if verbose {
                println!("  {} -> {}", target.red(), replacement.green());
            }
        } else {
            missed += 1;
            if verbose {
                println!("  {} {}", "not found:".yellow(), target);
            }
        }
    }

    let output_path = output.unwrap_or_else(|| default_output(&file));
    fs::write(&output_path, session.document.text())?;

    println!(
        "Applied {} fixes ({} no longer matched)",
        applied.to_string().green().bold(),
        missed
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// (target, replacement) pairs in category order: spelling, tone, style.
fn planned_fixes(store: &SuggestionStore) -> Vec<(String, String)> {
    let spelling = store
        .spelling()
        .iter()
        .filter_map(|s| Some((s.wrong.clone(), s.suggestions.first()?.clone())));
    let tone = store
        .tone()
        .iter()
        .map(|s| (s.current.clone(), s.suggestion.clone()));
    let style = store
        .style()
        .iter()
        .map(|s| (s.current.clone(), s.suggestion.clone()));

    spelling
        .chain(tone)
        .chain(style)
        .filter(|(_, replacement)| !replacement.trim().is_empty())
        .collect()
}

/// `<stem>.fixed.<ext>` next to the input.
fn default_output(file: &Path) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    let name = match file.extension() {
        Some(ext) => format!("{}.fixed.{}", stem, ext.to_string_lossy()),
        None => format!("{}.fixed", stem),
    };
    file.with_file_name(name)
}
