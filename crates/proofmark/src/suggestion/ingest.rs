//! Coercion of untrusted provider responses into typed suggestions.
//!
//! The provider answers with loosely structured JSON. Nothing about it is
//! trusted: every recognized field is read independently, entries with a
//! wrong shape or a blank matching field are dropped, and a missing or
//! malformed position becomes 0. A response that is not a JSON object yields
//! empty collections for every category the branch owns.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::llm::Branch;

use super::suggestion::{
    Category, CategoryItems, ContentAnalysis, EuphonyImprovement, PunctuationIssue,
    SpellingSuggestion, StyleCorrection, StyleMixing, StyleSuggestion, ToneSuggestion,
};

/// Convert a branch's raw response into one [`CategoryItems`] per category
/// the branch owns.
///
/// Always returns a value for each owned category, so ingesting the result
/// replaces those collections even when the provider returned nothing.
pub fn parse_branch(branch: Branch, response: Option<&Value>) -> Vec<CategoryItems> {
    let object = response.and_then(Value::as_object);
    if response.is_some() && object.is_none() {
        debug!(branch = branch.label(), "provider response is not an object");
    }

    branch
        .categories()
        .iter()
        .map(|&category| match object {
            Some(fields) => parse_category(category, fields),
            None => CategoryItems::empty(category),
        })
        .collect()
}

fn parse_category(category: Category, fields: &serde_json::Map<String, Value>) -> CategoryItems {
    match category {
        Category::Spelling => CategoryItems::Spelling(
            entries::<WireSpelling>(fields.get("spellingErrors"))
                .filter_map(WireSpelling::into_suggestion)
                .collect(),
        ),
        Category::Tone => CategoryItems::Tone(
            entries::<WireTone>(fields.get("toneConversions"))
                .filter_map(WireTone::into_suggestion)
                .collect(),
        ),
        Category::Style => CategoryItems::Style(
            entries::<WireStyle>(fields.get("styleConversions"))
                .filter_map(WireStyle::into_suggestion)
                .collect(),
        ),
        Category::StyleMixing => CategoryItems::StyleMixing(
            fields
                .get("languageStyleMixing")
                .and_then(|v| serde_json::from_value::<WireMixing>(v.clone()).ok())
                .map(WireMixing::into_mixing),
        ),
        Category::Punctuation => CategoryItems::Punctuation(
            entries::<WirePunctuation>(fields.get("punctuationIssues"))
                .filter_map(WirePunctuation::into_issue)
                .collect(),
        ),
        Category::Euphony => CategoryItems::Euphony(
            entries::<WireEuphony>(fields.get("euphonyImprovements"))
                .filter_map(WireEuphony::into_improvement)
                .collect(),
        ),
        Category::ContentAnalysis => CategoryItems::ContentAnalysis(parse_content_analysis(fields)),
    }
}

/// Deserialize each element of an array independently, skipping failures.
fn entries<'a, T>(value: Option<&'a Value>) -> impl Iterator<Item = T> + 'a
where
    T: for<'de> Deserialize<'de> + 'a,
{
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
}

fn parse_content_analysis(fields: &serde_json::Map<String, Value>) -> Option<ContentAnalysis> {
    // The content branch may answer flat or nested under "contentAnalysis".
    let source = match fields.get("contentAnalysis").and_then(Value::as_object) {
        Some(nested) => nested,
        None => fields,
    };
    let wire: WireContent = serde_json::from_value(Value::Object(source.clone())).ok()?;
    let content_type = wire.content_type.trim().to_string();
    if content_type.is_empty() {
        return None;
    }
    Some(ContentAnalysis {
        content_type,
        description: wire.description.filter(|d| !d.trim().is_empty()),
        missing_elements: wire.missing_elements,
        suggestions: wire.suggestions,
    })
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Accept any JSON value as text: strings pass through, numbers and bools
/// are stringified, everything else becomes empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept a list of strings, a single string, or anything else as empty.
fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Position hints default to 0 when missing, negative, fractional garbage,
/// or not a number at all.
fn lenient_position<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

#[derive(Deserialize)]
struct WireSpelling {
    #[serde(default, deserialize_with = "lenient_string")]
    wrong: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    suggestions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_position")]
    position: usize,
}

impl WireSpelling {
    fn into_suggestion(self) -> Option<SpellingSuggestion> {
        Some(SpellingSuggestion {
            wrong: non_blank(self.wrong)?,
            suggestions: self.suggestions,
            position: self.position,
        })
    }
}

#[derive(Deserialize)]
struct WireTone {
    #[serde(default, deserialize_with = "lenient_string")]
    current: String,
    #[serde(default, deserialize_with = "lenient_string")]
    suggestion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    reason: String,
    #[serde(default, deserialize_with = "lenient_position")]
    position: usize,
}

impl WireTone {
    fn into_suggestion(self) -> Option<ToneSuggestion> {
        Some(ToneSuggestion {
            current: non_blank(self.current)?,
            suggestion: self.suggestion,
            reason: self.reason,
            position: self.position,
        })
    }
}

#[derive(Deserialize)]
struct WireStyle {
    #[serde(default, deserialize_with = "lenient_string")]
    current: String,
    #[serde(default, deserialize_with = "lenient_string")]
    suggestion: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    kind: String,
    #[serde(default, deserialize_with = "lenient_position")]
    position: usize,
}

impl WireStyle {
    fn into_suggestion(self) -> Option<StyleSuggestion> {
        Some(StyleSuggestion {
            current: non_blank(self.current)?,
            suggestion: self.suggestion,
            kind: self.kind,
            position: self.position,
        })
    }

    fn into_correction(self) -> Option<StyleCorrection> {
        Some(StyleCorrection {
            current: non_blank(self.current)?,
            suggestion: self.suggestion,
            kind: self.kind,
            position: self.position,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMixing {
    #[serde(default, deserialize_with = "lenient_bool")]
    detected: bool,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    recommended_style: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    reason: Option<String>,
    #[serde(default)]
    corrections: Value,
}

impl WireMixing {
    fn into_mixing(self) -> StyleMixing {
        StyleMixing {
            detected: self.detected,
            recommended_style: self.recommended_style,
            reason: self.reason,
            corrections: entries::<WireStyle>(Some(&self.corrections))
                .filter_map(WireStyle::into_correction)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePunctuation {
    #[serde(default, deserialize_with = "lenient_string")]
    issue: String,
    #[serde(default, deserialize_with = "lenient_string")]
    current_sentence: String,
    #[serde(default, deserialize_with = "lenient_string")]
    corrected_sentence: String,
    #[serde(default, deserialize_with = "lenient_string")]
    explanation: String,
    #[serde(default, deserialize_with = "lenient_position")]
    position: usize,
}

impl WirePunctuation {
    fn into_issue(self) -> Option<PunctuationIssue> {
        Some(PunctuationIssue {
            issue: self.issue,
            current_sentence: non_blank(self.current_sentence)?,
            corrected_sentence: self.corrected_sentence,
            explanation: self.explanation,
            position: self.position,
        })
    }
}

#[derive(Deserialize)]
struct WireEuphony {
    #[serde(default, deserialize_with = "lenient_string")]
    current: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    suggestions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    reason: String,
    #[serde(default, deserialize_with = "lenient_position")]
    position: usize,
}

impl WireEuphony {
    fn into_improvement(self) -> Option<EuphonyImprovement> {
        Some(EuphonyImprovement {
            current: non_blank(self.current)?,
            suggestions: self.suggestions,
            reason: self.reason,
            position: self.position,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContent {
    #[serde(default, deserialize_with = "lenient_string")]
    content_type: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    missing_elements: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spelling(items: &[CategoryItems]) -> &[SpellingSuggestion] {
        match &items[0] {
            CategoryItems::Spelling(s) => s,
            other => panic!("expected spelling, got {:?}", other.category()),
        }
    }

    #[test]
    fn test_main_branch_owns_four_categories() {
        let items = parse_branch(Branch::Main, None);
        let categories: Vec<_> = items.iter().map(CategoryItems::category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Spelling,
                Category::Punctuation,
                Category::Euphony,
                Category::StyleMixing
            ]
        );
        assert!(items.iter().all(CategoryItems::is_empty));
    }

    #[test]
    fn test_parses_spelling_and_defaults_position() {
        let response = json!({
            "spellingErrors": [
                {"wrong": "ভাল", "suggestions": ["ভালো"]},
                {"wrong": "teh", "suggestions": "the", "position": "12"}
            ]
        });
        let items = parse_branch(Branch::Main, Some(&response));
        let spelling = spelling(&items);
        assert_eq!(spelling.len(), 2);
        assert_eq!(spelling[0].position, 0);
        assert_eq!(spelling[1].suggestions, vec!["the".to_string()]);
        assert_eq!(spelling[1].position, 12);
    }

    #[test]
    fn test_drops_malformed_entries() {
        let response = json!({
            "spellingErrors": [
                "not an object",
                {"suggestions": ["x"]},
                {"wrong": "   "},
                {"wrong": "ok", "suggestions": [1, "fine", null], "position": -3}
            ]
        });
        let items = parse_branch(Branch::Main, Some(&response));
        let spelling = spelling(&items);
        assert_eq!(spelling.len(), 1);
        assert_eq!(spelling[0].wrong, "ok");
        assert_eq!(spelling[0].suggestions, vec!["fine".to_string()]);
        assert_eq!(spelling[0].position, 0);
    }

    #[test]
    fn test_wrong_typed_collection_is_empty() {
        let response = json!({"spellingErrors": {"wrong": "x"}, "punctuationIssues": 7});
        let items = parse_branch(Branch::Main, Some(&response));
        assert!(items.iter().all(CategoryItems::is_empty));
    }

    #[test]
    fn test_non_object_response_is_empty() {
        let response = json!(["spellingErrors"]);
        let items = parse_branch(Branch::Tone, Some(&response));
        assert_eq!(items, vec![CategoryItems::Tone(Vec::new())]);
    }

    #[test]
    fn test_parses_style_mixing() {
        let response = json!({
            "languageStyleMixing": {
                "detected": true,
                "recommendedStyle": "chalit",
                "reason": 42,
                "corrections": [
                    {"current": "করিতেছি", "suggestion": "করছি", "type": "verb"},
                    {"current": ""}
                ]
            }
        });
        let items = parse_branch(Branch::Main, Some(&response));
        let CategoryItems::StyleMixing(Some(mixing)) = &items[3] else {
            panic!("expected style mixing");
        };
        assert!(mixing.detected);
        assert_eq!(mixing.recommended_style.as_deref(), Some("chalit"));
        assert_eq!(mixing.reason, None);
        assert_eq!(mixing.corrections.len(), 1);
        assert_eq!(mixing.corrections[0].kind, "verb");
    }

    #[test]
    fn test_parses_content_analysis_flat_and_nested() {
        let flat = json!({"contentType": "letter", "missingElements": ["greeting"]});
        let nested = json!({"contentAnalysis": {"contentType": "essay", "description": ""}});

        let items = parse_branch(Branch::ContentAnalysis, Some(&flat));
        let CategoryItems::ContentAnalysis(Some(analysis)) = &items[0] else {
            panic!("expected analysis");
        };
        assert_eq!(analysis.content_type, "letter");
        assert_eq!(analysis.missing_elements, vec!["greeting".to_string()]);

        let items = parse_branch(Branch::ContentAnalysis, Some(&nested));
        let CategoryItems::ContentAnalysis(Some(analysis)) = &items[0] else {
            panic!("expected analysis");
        };
        assert_eq!(analysis.content_type, "essay");
        assert_eq!(analysis.description, None);
    }

    #[test]
    fn test_content_analysis_requires_type() {
        let response = json!({"description": "no type"});
        let items = parse_branch(Branch::ContentAnalysis, Some(&response));
        assert_eq!(items, vec![CategoryItems::ContentAnalysis(None)]);
    }
}
