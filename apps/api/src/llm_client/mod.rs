/// LLM Client: the single point of entry for all text-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call `generateContent` directly.
/// All text generation MUST go through `LlmClient` (embeddings live in `careers::embedding`).
///
/// `LlmClient` holds an ordered chain of backends (primary model first). A call moves to the
/// next backend only when the current one fails with a quota/rate-limit error; any other
/// error aborts the chain immediately.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
#[cfg(test)]
pub mod testing;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No JSON object found in model response")]
    NoJsonObject,

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No LLM backends configured")]
    NoBackends,
}

impl LlmError {
    /// Quota and rate-limit failures, recognised by the text of a transport or API error.
    /// Errors raised while reading the model's answer are never quota errors.
    pub fn is_quota(&self) -> bool {
        match self {
            LlmError::Api { status, message } => *status == 429 || mentions_quota(message),
            LlmError::Http(e) => mentions_quota(&e.to_string()),
            _ => false,
        }
    }

    /// The model answered, but not in the shape the caller asked for.
    pub fn is_malformed_output(&self) -> bool {
        matches!(self, LlmError::Parse(_) | LlmError::NoJsonObject)
    }
}

fn mentions_quota(text: &str) -> bool {
    let text = text.to_lowercase();
    text.contains("429") || text.contains("quota")
}

/// One text-completion model.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub output_tokens: u32,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini backend
// ────────────────────────────────────────────────────────────────────────────

/// A single Gemini model behind the `generateContent` endpoint.
///
/// Transport failures and 5xx responses are retried with exponential backoff.
/// 429 is returned at once so the chain can switch models.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model);
        let request_body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "{} call attempt {} failed, retrying after {}ms...",
                    self.model,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("{} returned {}: {}", self.model, status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generated: GenerateResponse = response.json().await?;

            if let Some(usage) = &generated.usage {
                debug!(
                    "{} call succeeded: prompt_tokens={}, output_tokens={}",
                    self.model, usage.prompt_tokens, usage.output_tokens
                );
            }

            return generated.text().ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback chain
// ────────────────────────────────────────────────────────────────────────────

/// The LLM client shared by every service: an ordered list of backends.
#[derive(Clone)]
pub struct LlmClient {
    backends: Vec<Arc<dyn CompletionBackend>>,
}

impl LlmClient {
    pub fn new(backends: Vec<Arc<dyn CompletionBackend>>) -> Self {
        Self { backends }
    }

    /// Primary model, then fallback model, sharing one HTTP client.
    pub fn gemini(api_key: &str, primary_model: &str, fallback_model: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();
        Self::new(vec![
            Arc::new(GeminiBackend::new(
                client.clone(),
                api_key.to_string(),
                primary_model.to_string(),
            )),
            Arc::new(GeminiBackend::new(
                client,
                api_key.to_string(),
                fallback_model.to_string(),
            )),
        ])
    }

    pub fn models(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.model()).collect()
    }

    /// Tries each backend in order. Only a quota error moves on to the next one;
    /// the last backend's error is returned if all of them are exhausted.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let mut last_error = LlmError::NoBackends;

        for (index, backend) in self.backends.iter().enumerate() {
            match backend.complete(prompt).await {
                Ok(text) => return Ok(text.trim().to_string()),
                Err(e) if e.is_quota() => {
                    if let Some(next) = self.backends.get(index + 1) {
                        warn!(
                            "{} quota hit, falling back to {}: {e}",
                            backend.model(),
                            next.model()
                        );
                    }
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    /// Calls the LLM and deserializes the whole (fence-stripped) response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn complete_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let text = self.complete(prompt).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }

    /// Calls the LLM and deserializes the single JSON object embedded in its free-text answer.
    pub async fn complete_embedded_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
    ) -> Result<T, LlmError> {
        let text = self.complete(prompt).await?;
        let object = extract_json_object(&text)?;
        serde_json::from_str(object).map_err(LlmError::Parse)
    }
}

/// Returns the content of the first ```json (or bare ```) block, or the trimmed text
/// unchanged if there is none.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let body = if let Some((_, rest)) = text.split_once("```json") {
        rest
    } else if let Some((_, rest)) = text.split_once("```") {
        rest
    } else {
        return text;
    };
    body.split_once("```")
        .map(|(inner, _)| inner)
        .unwrap_or(body)
        .trim()
}

/// The span from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(text: &str) -> Result<&str, LlmError> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(LlmError::NoJsonObject),
    }
}
