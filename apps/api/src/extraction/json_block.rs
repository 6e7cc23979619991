//! JSON-embedded mode: locate a brace-delimited block in model output and
//! read the verdict fields from it.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::extraction::labeled;
use crate::extraction::models::Verdict;
use crate::extraction::ExtractedFields;

/// First `{` to last `}`, across newlines.
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

const VERDICT_KEYS: &[&str] = &["verdict", "is_anti_india_statement"];
const SCORE_KEYS: &[&str] = &["score", "anti_india_score_percent"];
const CONTEXT_KEYS: &[&str] = &["context"];

#[derive(Debug, Error)]
pub enum JsonBlockError {
    #[error("no brace-delimited block in text")]
    NotFound,

    #[error("malformed JSON block: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("JSON block is not an object")]
    NotAnObject,
}

/// Returns the greedy brace-delimited span, if any.
pub fn find_block(text: &str) -> Option<&str> {
    JSON_BLOCK.find(text).map(|m| m.as_str())
}

/// Decodes the embedded block and reads whichever recognised keys it has.
pub fn parse_block(text: &str) -> Result<ExtractedFields, JsonBlockError> {
    let block = find_block(text).ok_or(JsonBlockError::NotFound)?;
    let value: Value = serde_json::from_str(block)?;
    let Value::Object(object) = value else {
        return Err(JsonBlockError::NotAnObject);
    };

    Ok(ExtractedFields {
        verdict: lookup(&object, VERDICT_KEYS, coerce_verdict),
        score: lookup(&object, SCORE_KEYS, coerce_score),
        context: lookup(&object, CONTEXT_KEYS, coerce_context),
    })
}

/// First key, in order, whose value coerces; `null` or unusable values are skipped.
fn lookup<T>(
    object: &Map<String, Value>,
    keys: &[&str],
    coerce: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(coerce)
}

fn coerce_verdict(value: &Value) -> Option<Verdict> {
    match value {
        Value::String(s) => Some(Verdict::from_model_text(s)),
        Value::Bool(true) => Some(Verdict::Yes),
        Value::Bool(false) => Some(Verdict::No),
        _ => None,
    }
}

/// Accepts integers, integral floats and numeric strings; clamps to 100.
/// Negative or non-numeric values count as absent.
pub(crate) fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => u,
            None => {
                let f = n.as_f64()?;
                if !f.is_finite() || f < 0.0 || f.fract() != 0.0 {
                    return None;
                }
                f as u64
            }
        },
        Value::String(s) => {
            let s = s.trim();
            let s = s.strip_suffix("/100").unwrap_or(s).trim_end_matches('%').trim();
            return labeled::parse_score(s);
        }
        _ => return None,
    };
    Some(raw.min(100) as u8)
}

fn coerce_context(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.trim().to_string())
}
