//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::presentation::{scoring_guide, Presentation, ScoringBand};
use crate::analysis::{analyze_statement, Analysis};
use crate::errors::AppError;
use crate::extraction::{AnalysisResult, FailureReason};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub statement: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub model: String,
    #[serde(flatten)]
    pub outcome: AnalyzeOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzeOutcome {
    Parsed {
        result: AnalysisResult,
        presentation: Presentation,
    },
    /// The model reply is returned verbatim for manual review.
    Unparsed {
        reason: FailureReason,
        raw_response: String,
    },
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        let outcome = match analysis.extraction {
            Ok(result) => AnalyzeOutcome::Parsed {
                presentation: Presentation::for_result(&result),
                result,
            },
            Err(failure) => AnalyzeOutcome::Unparsed {
                reason: failure.reason,
                raw_response: failure.raw_text,
            },
        };
        Self {
            analysis_id: analysis.id,
            analyzed_at: analysis.analyzed_at,
            model: analysis.model,
            outcome,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoringGuideResponse {
    pub bands: Vec<ScoringBand>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Analyzes one statement. The whole call, retries included, is bounded by
/// the configured analysis deadline.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;
    let deadline = state.config.analysis_deadline;
    let analysis = tokio::time::timeout(
        deadline,
        analyze_statement(
            &request.statement,
            state.llm.as_ref(),
            &state.template,
            &state.config.extraction_policy,
        ),
    )
    .await
    .map_err(|_| AppError::Timeout(deadline))??;

    Ok(Json(analysis.into()))
}

/// GET /api/v1/scoring-guide
pub async fn handle_scoring_guide() -> Json<ScoringGuideResponse> {
    Json(ScoringGuideResponse {
        bands: scoring_guide(),
    })
}
