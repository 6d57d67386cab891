//! Vault inspection commands: list, show and remove.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppResult};
use pdfchat_knowledge::{ChunkStore, DocumentId, DocumentSummary};

/// List stored documents
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing list command");

        let store = super::vault(config);
        let summaries = pdfchat_knowledge::summaries(&store)?;

        if self.json {
            return super::print_json(&serde_json::json!({
                "vault": store.dir(),
                "documents": summaries,
            }));
        }

        if summaries.is_empty() {
            println!("No documents in {}", store.dir().display());
            return Ok(());
        }

        for summary in &summaries {
            println!("{:<32} {:>5} chunks", summary.document, summary.chunks_count);
        }

        Ok(())
    }
}

/// Show the chunks of a stored document
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Document id (file stem of the uploaded file)
    pub document: DocumentId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing show command for '{}'", self.document);

        let store = super::vault(config);
        let doc = pdfchat_knowledge::open(&store, &self.document)?;
        let summary = DocumentSummary::of(&doc);

        if self.json {
            return super::print_json(&serde_json::json!({
                "summary": summary,
                "chunks": doc.chunks,
            }));
        }

        println!(
            "{}: {} chunks, {} chars, longest {}",
            summary.document, summary.chunks_count, summary.chars_total, summary.longest_chunk
        );
        for (i, chunk) in doc.chunks.iter().enumerate() {
            println!("\n[Chunk {}]\n{}", i + 1, chunk);
        }

        Ok(())
    }
}

/// Remove a document from the vault
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Document id (file stem of the uploaded file)
    pub document: DocumentId,
}

impl RemoveCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing remove command for '{}'", self.document);

        super::vault(config).remove(&self.document)?;
        println!("Removed {}", self.document);

        Ok(())
    }
}
