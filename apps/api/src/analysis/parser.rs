//! Resilient response parser: turns a model's free-text reply into an `AnalysisResult`.
//!
//! Recovery runs in a fixed order:
//! 1. strip code-fence markers anywhere in the reply and decode what is left;
//! 2. otherwise decode the span from the first `{` to the last `}`;
//! 3. otherwise fail with `ResponseFormatError`, carrying the raw reply.
//!
//! Once an object is decoded, field extraction never fails. Missing or
//! wrong-typed fields are coerced or defaulted (see `coerce_*`).

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::models::{AnalysisResult, MAX_MATCH_PERCENTAGE};

/// Substituted when the reply carries no usable `profile_summary`.
pub const PROFILE_SUMMARY_PLACEHOLDER: &str = "No profile summary provided.";

const FENCE: &str = "```";

/// No JSON object could be located in the model reply.
#[derive(Debug, Error)]
#[error("model reply did not contain a decodable JSON object")]
pub struct ResponseFormatError {
    pub raw_reply: String,
}

/// Parses a raw model reply into a fully populated `AnalysisResult`.
pub fn parse_analysis(raw_reply: &str) -> Result<AnalysisResult, ResponseFormatError> {
    let object = locate_json_object(raw_reply).ok_or_else(|| ResponseFormatError {
        raw_reply: raw_reply.to_string(),
    })?;
    Ok(result_from_object(&object))
}

/// Fence-strip first; the bracket scan only runs when that decode fails.
fn locate_json_object(raw_reply: &str) -> Option<Map<String, Value>> {
    let stripped = strip_fences(raw_reply);
    decode_object(stripped.trim()).or_else(|| decode_object(bracket_span(&stripped)?))
}

fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Removes every triple-backtick fence, along with a language tag directly after it.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + FENCE.len()..];
        let tag_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
            .unwrap_or(after.len());
        rest = &after[tag_len..];
    }
    out.push_str(rest);
    out
}

/// Slice from the first `{` to the last `}`, inclusive.
fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn result_from_object(object: &Map<String, Value>) -> AnalysisResult {
    AnalysisResult {
        match_percentage: coerce_percentage(object.get("match_percentage")),
        missing_keywords: coerce_string_list(object.get("missing_keywords")),
        profile_summary: object
            .get("profile_summary")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| PROFILE_SUMMARY_PLACEHOLDER.to_string()),
        actionable_tips: coerce_string_list(object.get("actionable_tips")),
        interview_questions: coerce_string_list(object.get("interview_questions")),
    }
}

/// Integers are clamped, floats rounded, strings like "72%" read by their leading digits.
/// Anything else scores 0.
fn coerce_percentage(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|i| i as f64)
            .or_else(|| n.as_f64())
            .unwrap_or(0.0),
        Some(Value::String(s)) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };

    score.round().clamp(0.0, f64::from(MAX_MATCH_PERCENTAGE)) as u8
}

/// Keeps model order and duplicates. A bare string becomes a one-item list.
fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}
