//! Scripted completion backend for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{CompletionBackend, LlmClient, LlmError};

/// Replays queued responses in order and counts calls. Errors once the queue is empty.
pub struct ScriptedBackend {
    model: String,
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(model: &str, responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            model: model.to_string(),
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Builds an `LlmClient` over scripted backends, in order.
pub fn chain(backends: Vec<Arc<ScriptedBackend>>) -> LlmClient {
    LlmClient::new(
        backends
            .into_iter()
            .map(|b| b as Arc<dyn CompletionBackend>)
            .collect(),
    )
}
