//! Check command - run one check cycle and list suggestions.

use std::path::PathBuf;

use colored::Colorize;
use proofmark::{BranchOutcome, Category, CheckReport, SuggestionStore};

use super::open_session;
use crate::cli::CheckOptions;

pub async fn run(
    file: PathBuf,
    options: CheckOptions,
    json: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&file, &options)?;

    if !json {
        println!(
            "{} {}",
            "Checking".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let report = session.proofreader.check_document(&session.settings).await?;
    let store = session.proofreader.store();

    if json {
        let snapshot = serde_json::json!({
            "report": report,
            "suggestions": store,
            "fingerprint": store.fingerprint(),
        });
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_report(&report, store, verbose);
    }

    if let Some(path) = output {
        report.save(&path)?;
        if !json {
            println!();
            println!(
                "{} {}",
                "Saved report to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    Ok(())
}

fn print_report(report: &CheckReport, store: &SuggestionStore, verbose: bool) {
    println!(
        "{} words, {} spelling errors, accuracy {}",
        report.stats.total_words.to_string().white().bold(),
        report.stats.error_count.to_string().red(),
        format!("{}%", report.stats.accuracy).green().bold()
    );

    for (branch, outcome) in &report.branches {
        match outcome {
            BranchOutcome::Failed { reason } => {
                println!("{} {} branch failed: {}", "!".yellow().bold(), branch.label(), reason)
            }
            BranchOutcome::Skipped if verbose => {
                println!("  {} branch skipped", branch.label())
            }
            _ => {}
        }
    }
    println!();

    for (category, count) in &report.counts {
        if *count == 0 {
            continue;
        }
        println!("{} ({})", category.label().yellow().bold(), count);
        for line in category_lines(*category, store) {
            println!("  {}", line);
        }
        println!();
    }

    if let Some(analysis) = store.content_analysis() {
        println!("{} {}", "Content type:".cyan().bold(), analysis.content_type);
        if let Some(description) = &analysis.description {
            println!("  {}", description);
        }
        for missing in &analysis.missing_elements {
            println!("  missing: {}", missing);
        }
    }

    if store.is_empty() {
        println!("{}", "No suggestions - text looks clean!".green());
    }
}

/// One display line per suggestion in `category`.
fn category_lines(category: Category, store: &SuggestionStore) -> Vec<String> {
    match category {
        Category::Spelling => store
            .spelling()
            .iter()
            .map(|s| format!("{} -> {}", s.wrong.red(), s.suggestions.join(", ")))
            .collect(),
        Category::Tone => store
            .tone()
            .iter()
            .map(|s| format!("{} -> {} ({})", s.current.red(), s.suggestion, s.reason))
            .collect(),
        Category::Style => store
            .style()
            .iter()
            .map(|s| format!("{} -> {} [{}]", s.current.red(), s.suggestion, s.kind))
            .collect(),
        Category::StyleMixing => store
            .style_mixing()
            .map(|m| {
                m.corrections
                    .iter()
                    .map(|c| format!("{} -> {} [{}]", c.current.red(), c.suggestion, c.kind))
                    .collect()
            })
            .unwrap_or_default(),
        Category::Punctuation => store
            .punctuation()
            .iter()
            .map(|p| format!("{}: {} -> {}", p.issue, p.current_sentence.red(), p.corrected_sentence))
            .collect(),
        Category::Euphony => store
            .euphony()
            .iter()
            .map(|e| format!("{} -> {}", e.current.red(), e.suggestions.join(", ")))
            .collect(),
        Category::ContentAnalysis => Vec::new(),
    }
}
