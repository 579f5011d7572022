//! Instruction text sent to chat-completion providers.
//!
//! Each branch asks for a JSON object using the field names the ingestion
//! boundary recognizes.

use super::provider::{Branch, ProviderRequest};

/// System prompt shared by all branches.
pub fn system_prompt() -> &'static str {
    "You are a careful proofreader. You answer only with a single JSON object \
     and never with prose. Quote document text exactly as it appears so it can \
     be found again by a text search."
}

/// User prompt for one branch.
pub fn branch_prompt(request: &ProviderRequest) -> String {
    let task = match request.branch {
        Branch::Main => main_task(),
        Branch::Tone => tone_task(request.tone.as_deref().unwrap_or("neutral")),
        Branch::Style => style_task(request.style.as_deref().unwrap_or("standard")),
        Branch::ContentAnalysis => content_task(),
    };

    format!(
        "Document type: {}\n\n{}\n\nDocument:\n\"\"\"\n{}\n\"\"\"",
        request.doc_type, task, request.document_text
    )
}

fn main_task() -> String {
    r#"Find spelling mistakes, punctuation problems, awkward-sounding phrases, and
any mixing of language styles. Respond with:
{
  "spellingErrors": [{"wrong": "...", "suggestions": ["..."], "position": 0}],
  "punctuationIssues": [{"issue": "...", "currentSentence": "...", "correctedSentence": "...", "explanation": "...", "position": 0}],
  "euphonyImprovements": [{"current": "...", "suggestions": ["..."], "reason": "...", "position": 0}],
  "languageStyleMixing": {"detected": false, "recommendedStyle": "...", "reason": "...", "corrections": [{"current": "...", "suggestion": "...", "type": "...", "position": 0}]}
}"#
    .to_string()
}

fn tone_task(tone: &str) -> String {
    format!(
        r#"Rewrite phrases so the document reads in a {tone} tone. Respond with:
{{"toneConversions": [{{"current": "...", "suggestion": "...", "reason": "...", "position": 0}}]}}"#
    )
}

fn style_task(style: &str) -> String {
    format!(
        r#"Convert phrases into the {style} language style. Respond with:
{{"styleConversions": [{{"current": "...", "suggestion": "...", "type": "...", "position": 0}}]}}"#
    )
}

fn content_task() -> String {
    r#"Describe what kind of document this is and what it lacks. Respond with:
{"contentType": "...", "description": "...", "missingElements": ["..."], "suggestions": ["..."]}"#
        .to_string()
}
