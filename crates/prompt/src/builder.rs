//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use pdfchat_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build the chat prompt for one question.
///
/// Renders the definition's system and user templates with the variables
/// `document`, `context` and `question`.
///
/// # Example
/// ```
/// use pdfchat_prompt::{build_prompt, default_prompt};
///
/// let built = build_prompt(&default_prompt(), "manual", "Press the red button.", "What do I press?")
///     .unwrap();
/// assert_eq!(built.system, "Context from PDF: Press the red button.");
/// assert_eq!(built.user, "What do I press?");
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    document: &str,
    context: &str,
    question: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let mut variables = HashMap::new();
    variables.insert("document".to_string(), document.to_string());
    variables.insert("context".to_string(), context.to_string());
    variables.insert("question".to_string(), question.to_string());

    let handlebars = registry(definition)?;

    let system = handlebars
        .render("system", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render system template: {}", e)))?;
    let user = handlebars
        .render("user", &variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render user template: {}", e)))?;

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Register both templates of a definition.
fn registry(definition: &PromptDefinition) -> AppResult<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("system", &definition.system_template)
        .map_err(|e| AppError::Prompt(format!("Failed to register system template: {}", e)))?;
    handlebars
        .register_template_string("user", &definition.user_template)
        .map_err(|e| AppError::Prompt(format!("Failed to register user template: {}", e)))?;

    Ok(handlebars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::default_prompt;

    #[test]
    fn test_build_default_prompt() {
        let built = build_prompt(
            &default_prompt(),
            "report",
            "Revenue grew 4% in Q3.",
            "How much did revenue grow?",
        )
        .unwrap();

        assert_eq!(built.system, "Context from PDF: Revenue grew 4% in Q3.");
        assert_eq!(built.user, "How much did revenue grow?");
        assert_eq!(built.metadata.source_prompt_id, "chat.default");
        assert_eq!(
            built.metadata.resolved_variables.get("document").map(String::as_str),
            Some("report")
        );
    }

    #[test]
    fn test_no_html_escaping() {
        let built = build_prompt(&default_prompt(), "doc", "a < b && \"c\"", "x > y?").unwrap();
        assert_eq!(built.system, "Context from PDF: a < b && \"c\"");
        assert_eq!(built.user, "x > y?");
    }

    #[test]
    fn test_custom_templates() {
        let mut def = default_prompt();
        def.system_template = "Excerpt of {{document}}:\n{{context}}".to_string();
        def.user_template = "Question: {{question}}".to_string();

        let built = build_prompt(&def, "manual", "Step one.", "What first?").unwrap();
        assert_eq!(built.system, "Excerpt of manual:\nStep one.");
        assert_eq!(built.user, "Question: What first?");
    }

    #[test]
    fn test_broken_template() {
        let mut def = default_prompt();
        def.system_template = "{{#if context}}unterminated".to_string();

        let result = build_prompt(&def, "doc", "ctx", "q");
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }
}
