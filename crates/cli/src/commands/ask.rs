//! Ask command handler.
//!
//! Answers one question about a stored document and exits.

use clap::Args;
use pdfchat_core::config::{AppConfig, ContextStrategy};
use pdfchat_core::AppResult;
use pdfchat_knowledge::DocumentId;
use pdfchat_llm::create_client;

/// Ask one question about a stored document
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Document id (file stem of the uploaded file)
    pub document: DocumentId,

    /// The question to ask
    pub question: String,

    /// Temperature for response generation (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Context selection strategy (first, keyword)
    #[arg(long)]
    pub strategy: Option<ContextStrategy>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let store = super::vault(config);
        let settings = super::chat_settings(config, self.temperature, self.strategy)?;
        let client = create_client(&config.llm)?;

        let result = pdfchat_knowledge::ask(
            &store,
            client.as_ref(),
            &settings,
            &self.document,
            &self.question,
        )
        .await?;

        if self.json {
            return super::print_json(&serde_json::json!({
                "document": result.document,
                "answer": result.answer,
                "model": result.model,
                "provider": client.provider_name(),
                "contextChars": result.context_chars,
                "usage": {
                    "promptTokens": result.usage.prompt_tokens,
                    "completionTokens": result.usage.completion_tokens,
                    "totalTokens": result.usage.total_tokens
                }
            }));
        }

        println!("{}", result.answer);

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                "Token usage - Prompt: {}, Completion: {}, Total: {}",
                result.usage.prompt_tokens,
                result.usage.completion_tokens,
                result.usage.total_tokens
            );
        }

        Ok(())
    }
}
