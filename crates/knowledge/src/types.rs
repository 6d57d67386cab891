//! Knowledge system type definitions.

use pdfchat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier of a stored document: the file stem of the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate and wrap a document id.
    ///
    /// Ids name a single file inside the vault, so they may not be empty,
    /// start with a dot, or contain path separators or NUL.
    pub fn new(id: impl Into<String>) -> AppResult<Self> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "document id cannot be empty".to_string(),
            ));
        }

        if id.starts_with('.') || id.contains(&['/', '\\', '\0'][..]) {
            return Err(AppError::InvalidInput(format!(
                "invalid document id: {:?}",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Derive the id from an uploaded file path (`docs/report.pdf` → `report`).
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AppError::InvalidInput(format!("cannot derive a document id from {:?}", path))
            })?;
        Self::new(stem)
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

/// A document whose chunk sequence is held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// Document identifier
    pub id: DocumentId,

    /// Chunk sequence in document order
    pub chunks: Vec<String>,
}

/// Statistics from an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadStats {
    /// Id the chunks were stored under
    pub document: DocumentId,

    /// Number of chunks created
    pub chunks_count: usize,

    /// Characters of extracted text
    pub chars_extracted: usize,

    /// Duration in seconds
    pub duration_secs: f64,
}

/// Summary of a stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document identifier
    pub document: DocumentId,

    /// Number of chunks
    pub chunks_count: usize,

    /// Total characters across all chunks (overlap counted twice)
    pub chars_total: usize,

    /// Length of the longest chunk in characters
    pub longest_chunk: usize,
}

impl DocumentSummary {
    /// Summarize a loaded document.
    pub fn of(document: &LoadedDocument) -> Self {
        let lengths = document.chunks.iter().map(|c| c.chars().count());
        Self {
            document: document.id.clone(),
            chunks_count: document.chunks.len(),
            chars_total: lengths.clone().sum(),
            longest_chunk: lengths.max().unwrap_or(0),
        }
    }
}
