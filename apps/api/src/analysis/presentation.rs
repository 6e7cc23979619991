//! Presentation policy — how a result is banded and coloured for display.

use serde::Serialize;

use crate::extraction::{AnalysisResult, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskBand {
    pub const ALL: [RiskBand; 4] = [
        RiskBand::Low,
        RiskBand::Medium,
        RiskBand::High,
        RiskBand::Critical,
    ];

    /// 0–20 low, 21–50 medium, 51–80 high, 81–100 critical.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => RiskBand::Low,
            21..=50 => RiskBand::Medium,
            51..=80 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }

    /// Inclusive score range covered by the band.
    pub fn range(&self) -> (u8, u8) {
        match self {
            RiskBand::Low => (0, 20),
            RiskBand::Medium => (21, 50),
            RiskBand::High => (51, 80),
            RiskBand::Critical => (81, 100),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::High => "High Risk",
            RiskBand::Critical => "Critical Risk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskBand::Low => "Statement appears safe",
            RiskBand::Medium => "Borderline content detected",
            RiskBand::High => "Concerning language found",
            RiskBand::Critical => "High threat level detected",
        }
    }
}

/// Display severity for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Success,
    Warning,
    Alert,
}

impl AlertLevel {
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Yes => AlertLevel::Alert,
            Verdict::No => AlertLevel::Success,
            Verdict::Unrecognized | Verdict::NotAvailable => AlertLevel::Warning,
        }
    }

    pub fn for_score(score: u8) -> Self {
        match score {
            0..=20 => AlertLevel::Success,
            21..=50 => AlertLevel::Warning,
            _ => AlertLevel::Alert,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    pub risk_band: RiskBand,
    pub risk_label: &'static str,
    pub risk_description: &'static str,
    pub verdict_alert: AlertLevel,
    pub score_alert: AlertLevel,
    /// False when any field was filled from a default.
    pub complete: bool,
}

impl Presentation {
    pub fn for_result(result: &AnalysisResult) -> Self {
        let band = RiskBand::from_score(result.score);
        Self {
            risk_band: band,
            risk_label: band.label(),
            risk_description: band.description(),
            verdict_alert: AlertLevel::for_verdict(result.verdict),
            score_alert: AlertLevel::for_score(result.score),
            complete: result.is_complete(),
        }
    }
}

/// One row of the scoring guide.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringBand {
    pub band: RiskBand,
    pub min_score: u8,
    pub max_score: u8,
    pub label: &'static str,
    pub description: &'static str,
}

pub fn scoring_guide() -> Vec<ScoringBand> {
    RiskBand::ALL
        .into_iter()
        .map(|band| {
            let (min_score, max_score) = band.range();
            ScoringBand {
                band,
                min_score,
                max_score,
                label: band.label(),
                description: band.description(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ExtractionMode, Field};

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(20), RiskBand::Low);
        assert_eq!(RiskBand::from_score(21), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(50), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(51), RiskBand::High);
        assert_eq!(RiskBand::from_score(80), RiskBand::High);
        assert_eq!(RiskBand::from_score(81), RiskBand::Critical);
        assert_eq!(RiskBand::from_score(100), RiskBand::Critical);
    }

    #[test]
    fn test_band_from_score_agrees_with_range() {
        for band in RiskBand::ALL {
            let (lo, hi) = band.range();
            assert_eq!(RiskBand::from_score(lo), band);
            assert_eq!(RiskBand::from_score(hi), band);
        }
    }

    #[test]
    fn test_verdict_alerts() {
        assert_eq!(AlertLevel::for_verdict(Verdict::Yes), AlertLevel::Alert);
        assert_eq!(AlertLevel::for_verdict(Verdict::No), AlertLevel::Success);
        assert_eq!(
            AlertLevel::for_verdict(Verdict::Unrecognized),
            AlertLevel::Warning
        );
        assert_eq!(
            AlertLevel::for_verdict(Verdict::NotAvailable),
            AlertLevel::Warning
        );
    }

    #[test]
    fn test_score_alert_thresholds() {
        assert_eq!(AlertLevel::for_score(20), AlertLevel::Success);
        assert_eq!(AlertLevel::for_score(50), AlertLevel::Warning);
        assert_eq!(AlertLevel::for_score(51), AlertLevel::Alert);
    }

    #[test]
    fn test_presentation_for_low_risk_no() {
        let result = AnalysisResult {
            verdict: Verdict::No,
            score: 5,
            context: "routine policy criticism".to_string(),
            mode: ExtractionMode::Json,
            defaulted: vec![],
        };
        let p = Presentation::for_result(&result);
        assert_eq!(p.risk_band, RiskBand::Low);
        assert_eq!(p.verdict_alert, AlertLevel::Success);
        assert_eq!(p.score_alert, AlertLevel::Success);
        assert!(p.complete);
    }

    #[test]
    fn test_presentation_flags_defaulted_fields() {
        let result = AnalysisResult {
            verdict: Verdict::Yes,
            score: 0,
            context: "x".to_string(),
            mode: ExtractionMode::LabeledLines,
            defaulted: vec![Field::Score],
        };
        assert!(!Presentation::for_result(&result).complete);
    }

    #[test]
    fn test_scoring_guide_covers_full_range() {
        let guide = scoring_guide();
        assert_eq!(guide.len(), 4);
        assert_eq!(guide[0].min_score, 0);
        assert_eq!(guide[3].max_score, 100);
        for pair in guide.windows(2) {
            assert_eq!(pair[0].max_score + 1, pair[1].min_score);
        }
    }
}
