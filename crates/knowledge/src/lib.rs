//! Document knowledge for PDF chat.
//!
//! Extracts text from uploaded files, splits it into overlapping chunks,
//! keeps one chunk sequence per document in the vault, and answers questions
//! about a loaded document through the chat model.

pub mod ask;
pub mod chunker;
pub mod context;
pub mod parser;
pub mod session;
pub mod store;
pub mod transcript;
pub mod types;
pub mod worker;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use ask::{ask, build_request, AskResult, ChatSettings};
pub use chunker::{chunk_text, ChunkConfig, ChunkSpan, TextChunker};
pub use context::{selector_from_settings, ContextSelector, FirstChunks, KeywordOverlap};
pub use session::{SendOutcome, Session};
pub use store::{ChunkStore, VaultStore};
pub use transcript::{Sender, Transcript, TranscriptEntry};
pub use types::{DocumentId, DocumentSummary, LoadedDocument, UploadStats};
pub use worker::{ChatOutcome, ChatWorker, RequestId};

use pdfchat_core::{AppError, AppResult};
use std::path::Path;
use std::time::Instant;

/// Upload a file: extract its text, chunk it and store the chunks under the
/// file stem.
///
/// Nothing is written unless extraction and chunking both succeed.
pub fn upload(store: &dyn ChunkStore, chunker: &TextChunker, path: &Path) -> AppResult<UploadStats> {
    let start = Instant::now();
    let id = DocumentId::from_path(path)?;

    tracing::info!("Uploading {:?} as '{}'", path, id);

    let text = parser::parse_file(path)?;
    let chunks = chunker.chunk(&text);

    if chunks.is_empty() {
        return Err(AppError::ExtractionFailed(format!(
            "{:?} produced no chunks",
            path
        )));
    }

    if store.contains(&id) {
        tracing::info!("Replacing existing document '{}'", id);
    }

    store.save(&id, &chunks)?;

    let duration = start.elapsed();
    tracing::info!(
        "Upload completed: '{}' {} chunks from {} chars in {:.2}s",
        id,
        chunks.len(),
        text.chars().count(),
        duration.as_secs_f64()
    );

    Ok(UploadStats {
        document: id,
        chunks_count: chunks.len(),
        chars_extracted: text.chars().count(),
        duration_secs: duration.as_secs_f64(),
    })
}

/// Load a stored document.
pub fn open(store: &dyn ChunkStore, id: &DocumentId) -> AppResult<LoadedDocument> {
    let chunks = store.load(id)?;
    Ok(LoadedDocument {
        id: id.clone(),
        chunks,
    })
}

/// Summarize every readable document in the vault. Corrupt entries are
/// skipped with a warning.
pub fn summaries(store: &dyn ChunkStore) -> AppResult<Vec<DocumentSummary>> {
    let mut result = Vec::new();
    for id in store.list()? {
        match open(store, &id) {
            Ok(doc) => result.push(DocumentSummary::of(&doc)),
            Err(AppError::CorruptData(msg)) => {
                tracing::warn!("Skipping '{}': {}", id, msg);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(result)
}
