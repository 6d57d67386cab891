//! LLM provider factory.
//!
//! This module provides a factory for creating LLM clients from the chat
//! settings of the application configuration.

use crate::client::LlmClient;
use crate::providers::{ollama::DEFAULT_BASE_URL, OllamaClient};
use pdfchat_core::config::LlmSettings;
use pdfchat_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the configured provider.
///
/// # Arguments
/// * `settings` - Provider name, endpoint and timeout
///
/// # Returns
/// A shared trait object implementing `LlmClient`
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or the HTTP client
/// cannot be built.
pub fn create_client(settings: &LlmSettings) -> AppResult<Arc<dyn LlmClient>> {
    match settings.provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = settings.endpoint.as_deref().unwrap_or(DEFAULT_BASE_URL);
            tracing::debug!("Creating Ollama client for {}", base_url);
            let client =
                OllamaClient::with_timeout(base_url, Duration::from_secs(settings.timeout_secs))?;
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!(
            "Unknown provider: {}",
            settings.provider
        ))),
    }
}
