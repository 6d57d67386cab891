//! Prompt system for PDF Chat.
//!
//! This crate provides the chat prompt:
//! - YAML-based prompt definitions with a built-in default
//! - Handlebars template rendering of the system and user messages

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{default_prompt, load_prompt, DEFAULT_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
