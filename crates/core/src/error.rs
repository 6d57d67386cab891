//! Error types for PDF Chat.
//!
//! This module defines a unified error enum that covers every failure the
//! application can surface: configuration, chunking parameters, text
//! extraction, vault storage, and chat calls.

use thiserror::Error;

/// Unified error type for PDF Chat.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chunker parameters that cannot produce a finite chunk sequence
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed user input (document ids, paths)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be turned into text
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// No vault entry for the requested document
    #[error("Not found: {0}")]
    NotFound(String),

    /// A vault entry exists but does not decode to a chunk sequence
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Chat model call failed (network, model, timeout)
    #[error("Chat failed: {0}")]
    ChatFailed(String),

    /// Prompt loading and rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
