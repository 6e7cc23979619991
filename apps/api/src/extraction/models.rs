use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder shown when the model gave no rationale.
pub const DEFAULT_CONTEXT: &str = "No context provided";

/// Categorical judgment of whether a statement falls in the target category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Yes,
    No,
    #[default]
    Unrecognized,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "Yes",
            Verdict::No => "No",
            Verdict::Unrecognized => "Unrecognized",
            Verdict::NotAvailable => "N/A",
        }
    }

    /// Lenient reading of a model-supplied verdict. Anything that is not
    /// recognisably one of the four values collapses to `Unrecognized`.
    pub fn from_model_text(text: &str) -> Self {
        text.parse().unwrap_or(Verdict::Unrecognized)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown verdict: {0:?}")]
pub struct UnknownVerdict(pub String);

impl FromStr for Verdict {
    type Err = UnknownVerdict;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Verdict::Yes),
            "no" => Ok(Verdict::No),
            "unrecognized" | "unrecognised" => Ok(Verdict::Unrecognized),
            "n/a" | "na" | "not available" => Ok(Verdict::NotAvailable),
            _ => Err(UnknownVerdict(s.to_string())),
        }
    }
}

/// One of the three fields the extractor tries to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Verdict,
    Score,
    Context,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Verdict, Field::Score, Field::Context];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Verdict => "verdict",
            Field::Score => "score",
            Field::Context => "context",
        })
    }
}

/// Which input shape the result was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    Json,
    LabeledLines,
}

/// A verdict/score/context triple recovered from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub verdict: Verdict,
    /// 0 – 100
    pub score: u8,
    pub context: String,
    pub mode: ExtractionMode,
    /// Fields filled from defaults rather than found in the text.
    pub defaulted: Vec<Field>,
}

impl AnalysisResult {
    pub fn is_complete(&self) -> bool {
        self.defaulted.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Neither a decodable JSON block nor any labeled line was found.
    NoStructureFound,
    /// Some fields were found, but fewer than the policy requires.
    IncompleteFields { missing: Vec<Field> },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoStructureFound => f.write_str("no structured verdict found"),
            FailureReason::IncompleteFields { missing } => {
                let names: Vec<String> = missing.iter().map(Field::to_string).collect();
                write!(f, "missing required fields: {}", names.join(", "))
            }
        }
    }
}

/// Raised when no result could be derived. Always carries the untouched
/// model output so the caller can show it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not extract analysis: {reason}")]
pub struct ExtractionFailure {
    pub reason: FailureReason,
    pub raw_text: String,
}
