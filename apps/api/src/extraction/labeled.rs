//! Labeled-line mode: `Verdict: Yes` / `Score: 85` / `Context: ...` lines,
//! matched case-insensitively and independently of each other.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::Verdict;
use crate::extraction::ExtractedFields;

// Leading `-`, `*`, `#`, `>` and emphasis markers are tolerated around labels.
static VERDICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t>*#_-]*(?:verdict|classification|is[ _-]anti[ _-]india[ _-]statement)[ \t*_]*:[ \t*_]*(yes|no|unrecognized)\b",
    )
    .expect("valid regex")
});

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t>*#_-]*(?:threat[ _-]score|anti[ _-]india[ _-]score(?:[ _-]percent)?|score)[ \t*_]*:[ \t*_]*(\d+(?:\.\d+)?)(?:\s*%|\s*/\s*100)?",
    )
    .expect("valid regex")
});

static CONTEXT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ims)^[ \t>*#_-]*context[ \t*_]*:[ \t*_]*(.*)").expect("valid regex")
});

/// Scans for the three labels. Fields that are not present stay `None`.
pub fn parse_lines(text: &str) -> ExtractedFields {
    ExtractedFields {
        verdict: capture(&VERDICT_LINE, text).map(Verdict::from_model_text),
        score: capture(&SCORE_LINE, text).and_then(parse_score),
        context: capture(&CONTEXT_LINE, text)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    }
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// Fractional or overflowing values count as absent; `85.0` reads as 85.
pub(crate) fn parse_score(raw: &str) -> Option<u8> {
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    if fraction.bytes().any(|b| b != b'0') {
        return None;
    }
    whole.parse::<u64>().ok().map(|n| n.min(100) as u8)
}
