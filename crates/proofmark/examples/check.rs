//! Example: Proofread a text file with a scripted provider.
//!
//! Usage:
//!   cargo run --example check -- <file_path>
//!
//! The mock provider flags every word listed in `MISSPELLINGS`, so the
//! example runs without an API key.

use std::env;
use std::fs;
use std::sync::Arc;

use proofmark::llm::{Branch, MockProvider};
use proofmark::{CheckSettings, InMemoryDocument, Proofreader};
use serde_json::json;

const MISSPELLINGS: [(&str, &str); 3] = [("teh", "the"), ("recieve", "receive"), ("ভাল", "ভালো")];

#[tokio::main(flavor = "current_thread")]
async fn main() -> proofmark::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example check -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let text = match fs::read_to_string(file_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", file_path, e);
            std::process::exit(1);
        }
    };

    let spelling: Vec<_> = MISSPELLINGS
        .iter()
        .map(|(wrong, right)| json!({"wrong": wrong, "suggestions": [right]}))
        .collect();
    let provider = MockProvider::new().with_response(
        Branch::Main,
        json!({"spellingErrors": spelling, "punctuationIssues": [], "euphonyImprovements": []}),
    );

    let document = Arc::new(InMemoryDocument::new(text));
    let mut proofreader = Proofreader::new(document.clone(), Arc::new(provider));
    let settings = CheckSettings::new("mock").with_credential("mock");

    let report = proofreader.check_document(&settings).await?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Proofmark Check: {}", file_path);
    println!("{}", separator);
    println!();
    println!("  Words:    {}", report.stats.total_words);
    println!("  Errors:   {}", report.stats.error_count);
    println!("  Accuracy: {}%", report.stats.accuracy);
    println!();

    // Accept every spelling fix that is still present in the document.
    let fixes: Vec<_> = proofreader
        .store()
        .spelling()
        .iter()
        .filter_map(|s| Some((s.wrong.clone(), s.suggestions.first()?.clone())))
        .collect();
    for (wrong, right) in fixes {
        if proofreader.apply(&wrong, &right).await? {
            println!("  fixed: {} -> {}", wrong, right);
        }
    }

    println!();
    println!("{}", document.text());
    println!("{}", separator);

    Ok(())
}
