//! Shared test doubles.

use crate::ask::ChatSettings;
use crate::context::FirstChunks;
use pdfchat_core::{AppError, AppResult};
use pdfchat_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use pdfchat_prompt::default_prompt;
use std::sync::Mutex;

/// `LlmClient` that answers from a script and records every request.
pub struct MockLlmClient {
    reply: Result<String, String>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn replying(content: &str) -> Self {
        Self {
            reply: Ok(content.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            Ok(content) => Ok(LlmResponse {
                content: content.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(10, 5),
                done: true,
            }),
            Err(message) => Err(AppError::ChatFailed(message.clone())),
        }
    }
}

/// Default chat settings: built-in prompt, first five chunks.
pub fn chat_settings() -> ChatSettings {
    ChatSettings {
        model: "test-model".to_string(),
        temperature: None,
        max_tokens: None,
        prompt: default_prompt(),
        selector: Box::new(FirstChunks::default()),
    }
}
