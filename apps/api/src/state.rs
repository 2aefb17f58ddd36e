use std::sync::Arc;

use crate::careers::matcher::CareerMatcher;
use crate::llm_client::LlmClient;
use crate::salary::SalaryClient;
use crate::skills::dictionary::KeywordMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Primary → fallback model chain. Every LLM call goes through here.
    pub llm: LlmClient,
    pub careers: CareerMatcher,
    pub salary: SalaryClient,
    pub keywords: Arc<KeywordMatcher>,
}
