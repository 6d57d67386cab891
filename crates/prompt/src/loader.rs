//! Prompt loader for loading YAML prompt definitions.

use crate::types::PromptDefinition;
use pdfchat_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Identifier of the prompt used for document chat.
pub const DEFAULT_PROMPT_ID: &str = "chat.default";

/// Built-in chat prompt: the selected chunks as system context, the question
/// verbatim as the user message.
pub fn default_prompt() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_PROMPT_ID.to_string(),
        title: "Chat with a document".to_string(),
        api_version: "1.0".to_string(),
        system_template: "Context from PDF: {{context}}".to_string(),
        user_template: "{{question}}".to_string(),
    }
}

/// Path of a workspace prompt override.
pub fn prompt_path(workspace_path: &Path, prompt_id: &str) -> PathBuf {
    workspace_path
        .join(".pdfchat")
        .join("prompts")
        .join(format!("{}.yml", prompt_id))
}

/// Load a prompt definition by ID from the workspace.
///
/// Looks for `.pdfchat/prompts/<id>.yml`. When no file exists and `prompt_id`
/// is the default chat prompt, the built-in definition is returned.
///
/// # Example
/// ```no_run
/// use pdfchat_prompt::{load_prompt, DEFAULT_PROMPT_ID};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), DEFAULT_PROMPT_ID)?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompt_path(workspace_path, prompt_id);

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        if prompt_id == DEFAULT_PROMPT_ID {
            tracing::debug!("No prompt override, using built-in '{}'", prompt_id);
            return Ok(default_prompt());
        }
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(definition: &PromptDefinition) -> AppResult<()> {
    if definition.id.trim().is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if !definition.system_template.contains("{{context}}") {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' systemTemplate must reference {{{{context}}}}",
            definition.id
        )));
    }

    if definition.user_template.trim().is_empty() {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' userTemplate cannot be empty",
            definition.id
        )));
    }

    Ok(())
}
