use std::sync::Arc;

use crate::analysis::template::PromptTemplate;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `LlmClient` in production, stubs in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub template: Arc<PromptTemplate>,
    pub config: Config,
}
