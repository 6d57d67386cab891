//! Command handlers for the PDF Chat CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod documents;
pub mod upload;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use documents::{ListCommand, RemoveCommand, ShowCommand};
pub use upload::UploadCommand;

use pdfchat_core::config::{AppConfig, ContextStrategy};
use pdfchat_core::AppResult;
use pdfchat_knowledge::{selector_from_settings, ChatSettings, ChunkConfig, TextChunker, VaultStore};
use pdfchat_prompt::{load_prompt, DEFAULT_PROMPT_ID};

/// Open the configured vault.
pub fn vault(config: &AppConfig) -> VaultStore {
    VaultStore::new(config.vault_dir())
}

/// Build the chunker from the chunking settings.
pub fn chunker(config: &AppConfig) -> AppResult<TextChunker> {
    TextChunker::new(ChunkConfig::from(&config.chunking))
}

/// Resolve prompt, model and context strategy for chatting.
///
/// `temperature` and `strategy` come from command flags and win over the
/// configured values.
pub fn chat_settings(
    config: &AppConfig,
    temperature: Option<f32>,
    strategy: Option<ContextStrategy>,
) -> AppResult<ChatSettings> {
    let prompt = load_prompt(&config.workspace, DEFAULT_PROMPT_ID)?;
    tracing::debug!("Loaded prompt definition: {}", prompt.id);

    let mut context = config.context.clone();
    if let Some(strategy) = strategy {
        context.strategy = strategy;
    }

    Ok(ChatSettings {
        model: config.llm.model.clone(),
        temperature: temperature.or(config.llm.temperature),
        max_tokens: config.llm.max_tokens,
        prompt,
        selector: selector_from_settings(&context),
    })
}

/// Print a value as pretty JSON on stdout.
pub fn print_json(value: &serde_json::Value) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
