//! Response extraction — recovers a verdict/score/context triple from raw
//! model output.
//!
//! Two input shapes are tried in order:
//! 1. JSON-embedded: the greedy `{ ... }` span is decoded as an object.
//! 2. Labeled lines: `Verdict:`, `Score:` and `Context:` lines.
//!
//! The model gives no schema guarantee, so this is a heuristic. Every failure
//! path returns the raw text untouched. Pure: no I/O, no shared state.

pub mod json_block;
pub mod labeled;
pub mod models;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use models::{
    AnalysisResult, ExtractionFailure, ExtractionMode, FailureReason, Field, Verdict,
    DEFAULT_CONTEXT,
};

use json_block::JsonBlockError;

/// How many fields a mode must actually find before its output is trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRequirement {
    /// At least one field found; the rest take defaults.
    #[default]
    BestEffort,
    /// Verdict, score and context must all be present.
    AllFields,
}

impl FromStr for FieldRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "best_effort" => Ok(FieldRequirement::BestEffort),
            "all_fields" => Ok(FieldRequirement::AllFields),
            other => Err(format!(
                "unknown extraction requirement '{other}' (expected best_effort or all_fields)"
            )),
        }
    }
}

/// Caller policy for partial matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionPolicy {
    pub requirement: FieldRequirement,
    /// Verdict used when a mode matched other fields but no verdict.
    pub missing_verdict: Verdict,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            requirement: FieldRequirement::BestEffort,
            missing_verdict: Verdict::Unrecognized,
        }
    }
}

/// Fields found by one mode, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub verdict: Option<Verdict>,
    pub score: Option<u8>,
    pub context: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.verdict.is_none() && self.score.is_none() && self.context.is_none()
    }

    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| match field {
                Field::Verdict => self.verdict.is_none(),
                Field::Score => self.score.is_none(),
                Field::Context => self.context.is_none(),
            })
            .collect()
    }

    fn satisfies(&self, requirement: FieldRequirement) -> bool {
        match requirement {
            FieldRequirement::BestEffort => !self.is_empty(),
            FieldRequirement::AllFields => self.missing().is_empty(),
        }
    }

    fn into_result(self, mode: ExtractionMode, policy: &ExtractionPolicy) -> AnalysisResult {
        let defaulted = self.missing();
        AnalysisResult {
            verdict: self.verdict.unwrap_or(policy.missing_verdict),
            score: self.score.unwrap_or(0),
            context: self
                .context
                .unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
            mode,
            defaulted,
        }
    }
}

/// Extracts an `AnalysisResult` from raw model output.
///
/// Never panics on malformed input; every failure is an `ExtractionFailure`
/// holding `raw_text` verbatim.
pub fn extract(
    raw_text: &str,
    policy: &ExtractionPolicy,
) -> Result<AnalysisResult, ExtractionFailure> {
    let fail = |reason| ExtractionFailure {
        reason,
        raw_text: raw_text.to_string(),
    };

    if raw_text.trim().is_empty() {
        return Err(fail(FailureReason::NoStructureFound));
    }

    let json_fields = match json_block::parse_block(raw_text) {
        Ok(fields) if fields.satisfies(policy.requirement) => {
            debug!("Extracted analysis from JSON block");
            return Ok(fields.into_result(ExtractionMode::Json, policy));
        }
        Ok(fields) => {
            debug!(
                "JSON block lacks required fields {:?}, trying labeled lines",
                fields.missing()
            );
            Some(fields)
        }
        Err(JsonBlockError::NotFound) => None,
        Err(e) => {
            debug!("{e}; trying labeled lines");
            None
        }
    };

    let line_fields = labeled::parse_lines(raw_text);
    if line_fields.satisfies(policy.requirement) {
        debug!("Extracted analysis from labeled lines");
        return Ok(line_fields.into_result(ExtractionMode::LabeledLines, policy));
    }

    // Report against whichever mode came closest.
    let best = [json_fields.unwrap_or_default(), line_fields]
        .into_iter()
        .min_by_key(|fields| fields.missing().len())
        .unwrap_or_default();

    if best.is_empty() {
        Err(fail(FailureReason::NoStructureFound))
    } else {
        Err(fail(FailureReason::IncompleteFields {
            missing: best.missing(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best_effort() -> ExtractionPolicy {
        ExtractionPolicy::default()
    }

    fn strict() -> ExtractionPolicy {
        ExtractionPolicy {
            requirement: FieldRequirement::AllFields,
            ..ExtractionPolicy::default()
        }
    }

    #[test]
    fn test_well_formed_json_round_trips_values() {
        let result = extract(
            r#"{"verdict":"No","score":5,"context":"routine policy criticism"}"#,
            &best_effort(),
        )
        .unwrap();
        assert_eq!(result.verdict, Verdict::No);
        assert_eq!(result.score, 5);
        assert_eq!(result.context, "routine policy criticism");
        assert_eq!(result.mode, ExtractionMode::Json);
        assert!(result.is_complete());
    }

    #[test]
    fn test_json_with_surrounding_prose() {
        let raw = "Sure! Here is my analysis:\n```json\n{\n  \"is_anti_india_statement\": \"Yes\",\n  \"anti_india_score_percent\": 88,\n  \"context\": \"calls for violence\"\n}\n```\nLet me know if you need more.";
        let result = extract(raw, &best_effort()).unwrap();
        assert_eq!(result.verdict, Verdict::Yes);
        assert_eq!(result.score, 88);
        assert_eq!(result.context, "calls for violence");
    }

    #[test]
    fn test_labeled_lines_without_braces() {
        let result = extract(
            "Verdict: Yes\nScore: 85\nContext: disputes sovereignty claims",
            &best_effort(),
        )
        .unwrap();
        assert_eq!(result.verdict, Verdict::Yes);
        assert_eq!(result.score, 85);
        assert_eq!(result.context, "disputes sovereignty claims");
        assert_eq!(result.mode, ExtractionMode::LabeledLines);
    }

    #[test]
    fn test_long_form_labeled_scenario() {
        let result = extract(
            "Is_Anti_India_Statement: Yes\nAnti_India_Score_Percent: 92\nContext: explicit call for secession",
            &best_effort(),
        )
        .unwrap();
        assert_eq!(result.verdict, Verdict::Yes);
        assert_eq!(result.score, 92);
        assert_eq!(result.context, "explicit call for secession");
    }

    #[test]
    fn test_empty_input_fails_verbatim() {
        for raw in ["", "   \n\t"] {
            let failure = extract(raw, &best_effort()).unwrap_err();
            assert_eq!(failure.reason, FailureReason::NoStructureFound);
            assert_eq!(failure.raw_text, raw);
        }
    }

    #[test]
    fn test_unrelated_text_fails_verbatim() {
        let raw = "I'm sorry, I can't help with that request.";
        let failure = extract(raw, &best_effort()).unwrap_err();
        assert_eq!(failure.reason, FailureReason::NoStructureFound);
        assert_eq!(failure.raw_text, raw);
    }

    #[test]
    fn test_malformed_json_falls_back_to_labels() {
        let raw = "{verdict: Yes, oops}\nVerdict: No\nScore: 15\nContext: satire";
        let result = extract(raw, &best_effort()).unwrap();
        assert_eq!(result.mode, ExtractionMode::LabeledLines);
        assert_eq!(result.verdict, Verdict::No);
        assert_eq!(result.score, 15);
    }

    #[test]
    fn test_json_with_only_unknown_keys_falls_through() {
        let failure = extract(r#"{"sentiment":"negative"}"#, &best_effort()).unwrap_err();
        assert_eq!(failure.reason, FailureReason::NoStructureFound);
    }

    #[test]
    fn test_partial_json_defaults_missing_fields() {
        let result = extract(r#"{"verdict":"Yes"}"#, &best_effort()).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.context, DEFAULT_CONTEXT);
        assert_eq!(result.defaulted, vec![Field::Score, Field::Context]);
    }

    #[test]
    fn test_missing_verdict_follows_policy() {
        let policy = ExtractionPolicy {
            missing_verdict: Verdict::NotAvailable,
            ..ExtractionPolicy::default()
        };
        let result = extract("Score: 40\nContext: ambiguous", &policy).unwrap();
        assert_eq!(result.verdict, Verdict::NotAvailable);
        assert_eq!(result.defaulted, vec![Field::Verdict]);

        let result = extract("Score: 40", &best_effort()).unwrap();
        assert_eq!(result.verdict, Verdict::Unrecognized);
    }

    #[test]
    fn test_strict_policy_rejects_partial_json() {
        let raw = r#"{"verdict":"Yes","score":70}"#;
        let failure = extract(raw, &strict()).unwrap_err();
        assert_eq!(
            failure.reason,
            FailureReason::IncompleteFields {
                missing: vec![Field::Context]
            }
        );
        assert_eq!(failure.raw_text, raw);
    }

    #[test]
    fn test_strict_policy_labels_can_complete_partial_json() {
        let raw = "{\"verdict\":\"Yes\"}\nVerdict: Yes\nScore: 70\nContext: slogan";
        let result = extract(raw, &strict()).unwrap();
        assert_eq!(result.mode, ExtractionMode::LabeledLines);
        assert_eq!(result.score, 70);
    }

    #[test]
    fn test_non_numeric_score_defaults_to_zero() {
        let result = extract(
            r#"{"verdict":"No","score":"low","context":"fine"}"#,
            &best_effort(),
        )
        .unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.defaulted, vec![Field::Score]);
    }

    #[test]
    fn test_fractional_labeled_score_is_reported_as_defaulted() {
        let result = extract(
            "Verdict: Yes\nScore: 0.92\nContext: explicit call for secession",
            &best_effort(),
        )
        .unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.defaulted, vec![Field::Score]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_extract_is_idempotent() {
        let inputs = [
            r#"{"verdict":"No","score":5,"context":"routine"}"#,
            "Verdict: Yes\nScore: 85",
            "nothing to see",
        ];
        for raw in inputs {
            assert_eq!(extract(raw, &best_effort()), extract(raw, &best_effort()));
        }
    }

    #[test]
    fn test_field_requirement_from_str() {
        assert_eq!(
            "all-fields".parse::<FieldRequirement>(),
            Ok(FieldRequirement::AllFields)
        );
        assert_eq!(
            "Best_Effort".parse::<FieldRequirement>(),
            Ok(FieldRequirement::BestEffort)
        );
        assert!("sometimes".parse::<FieldRequirement>().is_err());
    }
}
