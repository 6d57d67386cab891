//! Interactive chat session.
//!
//! A `Session` owns everything the chat surface mutates: the currently loaded
//! document, the pending request and the transcript. Chat calls run on the
//! `ChatWorker`; the owner of the session feeds their outcomes back through
//! `apply_outcome`, so state is only ever touched from one place.
//!
//! At most one question is in flight. Further questions are rejected until the
//! pending outcome arrives, and outcomes for any other request id are ignored.

use crate::ask::{build_request, ChatSettings};
use crate::chunker::TextChunker;
use crate::store::ChunkStore;
use crate::transcript::{Sender, Transcript};
use crate::types::{DocumentId, LoadedDocument, UploadStats};
use crate::worker::{ChatOutcome, ChatWorker, RequestId};
use pdfchat_core::AppResult;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// What happened to a message passed to `Session::send_message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The question was handed to the worker.
    Submitted(RequestId),
    /// A previous question is still waiting for its answer.
    Busy,
    /// No document has been opened yet.
    NoDocument,
    /// The message was blank.
    Empty,
}

pub struct Session {
    store: Arc<dyn ChunkStore>,
    chunker: TextChunker,
    chat: ChatSettings,
    worker: ChatWorker,
    current: Option<LoadedDocument>,
    pending: Option<RequestId>,
    transcript: Transcript,
}

impl Session {
    pub fn new(
        store: Arc<dyn ChunkStore>,
        chunker: TextChunker,
        chat: ChatSettings,
        worker: ChatWorker,
    ) -> Self {
        Self {
            store,
            chunker,
            chat,
            worker,
            current: None,
            pending: None,
            transcript: Transcript::new(),
        }
    }

    /// Extract, chunk and store a file. The current document is unchanged.
    pub fn upload(&mut self, path: &Path) -> AppResult<UploadStats> {
        match crate::upload(self.store.as_ref(), &self.chunker, path) {
            Ok(stats) => {
                self.transcript.push(
                    Sender::System,
                    format!(
                        "Uploaded {} with {} chunks",
                        stats.document, stats.chunks_count
                    ),
                );
                Ok(stats)
            }
            Err(e) => {
                self.transcript.push(Sender::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Load a stored document and make it the current one.
    ///
    /// On failure the previously loaded document stays current.
    pub fn open(&mut self, id: &DocumentId) -> AppResult<()> {
        match self.store.load(id) {
            Ok(chunks) => {
                self.transcript.push(
                    Sender::System,
                    format!("Loaded {} with {} chunks", id, chunks.len()),
                );
                self.current = Some(LoadedDocument {
                    id: id.clone(),
                    chunks,
                });
                Ok(())
            }
            Err(e) => {
                self.transcript.push(Sender::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Documents available in the vault.
    pub fn list(&self) -> AppResult<BTreeSet<DocumentId>> {
        self.store.list()
    }

    /// Record a question and hand it to the worker.
    pub fn send_message(&mut self, text: &str) -> AppResult<SendOutcome> {
        let question = text.trim();
        if question.is_empty() {
            return Ok(SendOutcome::Empty);
        }

        let Some(document) = &self.current else {
            self.transcript
                .push(Sender::System, "No document loaded. Open one with /open DOC.");
            return Ok(SendOutcome::NoDocument);
        };

        if self.pending.is_some() {
            self.transcript
                .push(Sender::System, "Still waiting for the previous answer.");
            return Ok(SendOutcome::Busy);
        }

        let request = match build_request(&self.chat, document, question) {
            Ok(request) => request,
            Err(e) => {
                self.transcript.push(Sender::Error, e.to_string());
                return Err(e);
            }
        };

        self.transcript.push(Sender::You, question);
        let request_id = self.worker.submit(request);
        self.pending = Some(request_id);

        Ok(SendOutcome::Submitted(request_id))
    }

    /// Apply a worker outcome. Returns false when the outcome was stale.
    pub fn apply_outcome(&mut self, outcome: ChatOutcome) -> bool {
        if self.pending != Some(outcome.request_id) {
            tracing::debug!(
                "Ignoring outcome of request {} (pending: {:?})",
                outcome.request_id,
                self.pending
            );
            return false;
        }

        self.pending = None;
        match outcome.result {
            Ok(response) => {
                self.transcript.push(Sender::Assistant, response.content);
            }
            Err(e) => {
                self.transcript.push(Sender::Error, e.to_string());
            }
        }
        true
    }

    /// Append a message that did not come from a session action.
    pub fn record(&mut self, sender: Sender, text: impl Into<String>) {
        self.transcript.push(sender, text);
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current(&self) -> Option<&LoadedDocument> {
        self.current.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
