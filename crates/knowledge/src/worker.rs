//! Background chat worker.
//!
//! Each submitted request runs on its own tokio task; the outcome is sent back
//! over an unbounded channel tagged with the id returned by `submit`. The
//! worker never touches session state.

use pdfchat_core::AppResult;
use pdfchat_llm::{LlmClient, LlmRequest, LlmResponse};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifier handed out by `ChatWorker::submit`.
pub type RequestId = u64;

/// Result of one chat request.
#[derive(Debug)]
pub struct ChatOutcome {
    pub request_id: RequestId,
    pub result: AppResult<LlmResponse>,
}

/// Runs chat requests off the interactive loop.
pub struct ChatWorker {
    client: Arc<dyn LlmClient>,
    outcomes: mpsc::UnboundedSender<ChatOutcome>,
    next_id: RequestId,
}

impl ChatWorker {
    /// Create a worker and the receiver its outcomes arrive on.
    pub fn new(client: Arc<dyn LlmClient>) -> (Self, mpsc::UnboundedReceiver<ChatOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        let worker = Self {
            client,
            outcomes,
            next_id: 1,
        };
        (worker, receiver)
    }

    /// Provider name of the underlying client.
    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Start `request` in the background and return its id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, request: LlmRequest) -> RequestId {
        let request_id = self.next_id;
        self.next_id += 1;

        let client = Arc::clone(&self.client);
        let outcomes = self.outcomes.clone();

        tracing::debug!(
            "Submitting chat request {} to {} (model {})",
            request_id,
            client.provider_name(),
            request.model
        );

        tokio::spawn(async move {
            let result = client.complete(&request).await;
            if let Err(e) = &result {
                tracing::warn!("Chat request {} failed: {}", request_id, e);
            }

            // The receiver is gone once the session has shut down.
            if outcomes.send(ChatOutcome { request_id, result }).is_err() {
                tracing::debug!("Dropping outcome of request {}", request_id);
            }
        });

        request_id
    }
}
