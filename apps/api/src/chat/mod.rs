//! Career chatbot: free-form questions answered by the LLM chain.

use crate::errors::AppError;
use crate::llm_client::LlmClient;

pub const EMPTY_QUESTION_ANSWER: &str = "Please provide a valid question.";

/// Answers `message`. A blank message gets a fixed prompt to ask again, without an LLM call.
pub async fn answer(message: Option<&str>, llm: &LlmClient) -> Result<String, AppError> {
    match message.map(str::trim) {
        Some(question) if !question.is_empty() => Ok(llm.complete(question).await?),
        _ => Ok(EMPTY_QUESTION_ANSWER.to_string()),
    }
}
