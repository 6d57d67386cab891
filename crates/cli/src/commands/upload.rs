//! Upload command handler.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Extract, chunk and store documents in the vault
#[derive(Args, Debug)]
pub struct UploadCommand {
    /// Files to upload (.pdf, .txt, .md)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl UploadCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing upload command for {} file(s)", self.paths.len());

        let store = super::vault(config);
        let chunker = super::chunker(config)?;

        let mut uploaded = Vec::new();
        let mut failures = 0usize;

        for path in &self.paths {
            match pdfchat_knowledge::upload(&store, &chunker, path) {
                Ok(stats) => {
                    if !self.json {
                        println!(
                            "Uploaded {} with {} chunks ({} chars) in {:.2}s",
                            stats.document,
                            stats.chunks_count,
                            stats.chars_extracted,
                            stats.duration_secs
                        );
                    }
                    uploaded.push(stats);
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!("Failed to upload {:?}: {}", path, e);
                    if !self.json {
                        eprintln!("Error uploading {}: {}", path.display(), e);
                    }
                }
            }
        }

        if self.json {
            super::print_json(&serde_json::json!({
                "vault": store.dir(),
                "uploaded": uploaded,
                "failed": failures,
            }))?;
        }

        if failures > 0 {
            return Err(AppError::ExtractionFailed(format!(
                "{} of {} uploads failed",
                failures,
                self.paths.len()
            )));
        }

        Ok(())
    }
}
