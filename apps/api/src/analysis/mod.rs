//! Statement analysis: render the prompt, call the model, extract the verdict.
//! All model calls go through `llm_client::TextGenerator`.

pub mod handlers;
pub mod presentation;
pub mod prompts;
pub mod template;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract, AnalysisResult, ExtractionFailure, ExtractionPolicy};
use crate::llm_client::TextGenerator;
use template::PromptTemplate;

/// Outcome of one analysis request. Not persisted.
#[derive(Debug)]
pub struct Analysis {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub model: String,
    pub extraction: Result<AnalysisResult, ExtractionFailure>,
}

/// Runs one statement through the model and extracts the verdict.
///
/// Errors only when the statement is empty or the model call fails; an
/// unparseable model reply is a successful `Analysis` with a failed extraction.
pub async fn analyze_statement(
    statement: &str,
    llm: &dyn TextGenerator,
    template: &PromptTemplate,
    policy: &ExtractionPolicy,
) -> Result<Analysis, AppError> {
    if statement.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a statement to analyze".to_string(),
        ));
    }

    let id = Uuid::new_v4();
    let prompt = template.render(statement)?;
    let raw = llm.generate(&prompt).await?;
    let extraction = extract(&raw, policy);

    match &extraction {
        Ok(result) => info!(
            %id,
            verdict = %result.verdict,
            score = result.score,
            mode = ?result.mode,
            "Statement analyzed"
        ),
        Err(failure) => warn!(%id, reason = %failure.reason, "Model response could not be parsed"),
    }

    Ok(Analysis {
        id,
        analyzed_at: Utc::now(),
        model: llm.model().to_string(),
        extraction,
    })
}
