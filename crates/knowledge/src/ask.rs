//! Question answering over a loaded document.
//!
//! Builds the chat request for a question (context selection, then prompt
//! rendering) and runs one-shot questions for the `ask` command.

use crate::context::ContextSelector;
use crate::store::ChunkStore;
use crate::types::{DocumentId, LoadedDocument};
use pdfchat_core::AppResult;
use pdfchat_llm::{LlmClient, LlmRequest, LlmUsage};
use pdfchat_prompt::{build_prompt, PromptDefinition};
use serde::{Deserialize, Serialize};

/// Everything needed to turn a question into a chat request.
pub struct ChatSettings {
    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Cap on generated tokens
    pub max_tokens: Option<u32>,

    /// Prompt templates
    pub prompt: PromptDefinition,

    /// Context window strategy
    pub selector: Box<dyn ContextSelector>,
}

/// Answer to a one-shot question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResult {
    /// Document the question was asked about
    pub document: DocumentId,

    /// Model answer
    pub answer: String,

    /// Model that answered
    pub model: String,

    /// Characters of context sent
    pub context_chars: usize,

    /// Token usage reported by the provider
    pub usage: LlmUsage,
}

/// Build the chat request for `question` about `document`.
pub fn build_request(
    settings: &ChatSettings,
    document: &LoadedDocument,
    question: &str,
) -> AppResult<LlmRequest> {
    prepare(settings, document, question).map(|(request, _)| request)
}

/// Build the request and report how many characters of context it carries.
fn prepare(
    settings: &ChatSettings,
    document: &LoadedDocument,
    question: &str,
) -> AppResult<(LlmRequest, usize)> {
    let context = settings
        .selector
        .select_context(&document.chunks, question);
    let context_chars = context.chars().count();

    tracing::debug!(
        "Selected {} chars of context from '{}' ({} strategy)",
        context_chars,
        document.id,
        settings.selector.name()
    );

    let built = build_prompt(&settings.prompt, document.id.as_str(), &context, question)?;

    let mut request = LlmRequest::new(built.user, &settings.model).with_system(built.system);
    if let Some(temperature) = settings.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(max_tokens) = settings.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }

    Ok((request, context_chars))
}

/// Load `document` from the store and ask one question about it.
pub async fn ask(
    store: &dyn ChunkStore,
    client: &dyn LlmClient,
    settings: &ChatSettings,
    document: &DocumentId,
    question: &str,
) -> AppResult<AskResult> {
    tracing::info!("Asking '{}' about document '{}'", question, document);

    let loaded = LoadedDocument {
        id: document.clone(),
        chunks: store.load(document)?,
    };

    let (request, context_chars) = prepare(settings, &loaded, question)?;

    let response = client.complete(&request).await?;

    Ok(AskResult {
        document: document.clone(),
        answer: response.content,
        model: response.model,
        context_chars,
        usage: response.usage,
    })
}
