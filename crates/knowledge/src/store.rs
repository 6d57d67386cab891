//! Chunk store: persists each document's chunk sequence in the vault.
//!
//! The vault is a single directory holding one `<document>.json` file per
//! document. Each file is a pretty-printed JSON array of strings, in chunk
//! order, so entries stay human-inspectable.

use crate::types::DocumentId;
use pdfchat_core::{AppError, AppResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of vault entries.
pub const VAULT_EXTENSION: &str = "json";

/// Persistence for chunk sequences keyed by document id.
pub trait ChunkStore: Send + Sync {
    /// Store `chunks` under `id`, replacing any previous entry.
    fn save(&self, id: &DocumentId, chunks: &[String]) -> AppResult<()>;

    /// Enumerate stored documents.
    fn list(&self) -> AppResult<BTreeSet<DocumentId>>;

    /// Load the chunk sequence stored under `id`.
    ///
    /// Fails with `NotFound` when there is no entry and `CorruptData` when
    /// the entry does not decode to a sequence of strings.
    fn load(&self, id: &DocumentId) -> AppResult<Vec<String>>;

    /// Delete the entry stored under `id`.
    fn remove(&self, id: &DocumentId) -> AppResult<()>;

    /// Whether an entry exists for `id`.
    fn contains(&self, id: &DocumentId) -> bool;
}

/// Directory-backed chunk store.
#[derive(Debug, Clone)]
pub struct VaultStore {
    dir: PathBuf,
}

impl VaultStore {
    /// Open a vault rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the vault directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `id`.
    pub fn entry_path(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, VAULT_EXTENSION))
    }
}

impl ChunkStore for VaultStore {
    fn save(&self, id: &DocumentId, chunks: &[String]) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;

        let payload = serde_json::to_string_pretty(chunks)?;

        // Write a sibling temp file and rename it into place so readers never
        // observe a partially written entry.
        let target = self.entry_path(id);
        let temp = self
            .dir
            .join(format!(".{}.{}.tmp", id, uuid::Uuid::new_v4()));
        fs::write(&temp, payload)?;
        if let Err(e) = fs::rename(&temp, &target) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!("Saved {} chunks for '{}' to {:?}", chunks.len(), id, target);
        Ok(())
    }

    fn list(&self) -> AppResult<BTreeSet<DocumentId>> {
        let mut documents = BTreeSet::new();

        if !self.dir.exists() {
            return Ok(documents);
        }

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(VAULT_EXTENSION)
            {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match DocumentId::new(stem) {
                Ok(id) => {
                    documents.insert(id);
                }
                Err(e) => tracing::debug!("Skipping vault file {:?}: {}", path, e),
            }
        }

        Ok(documents)
    }

    fn load(&self, id: &DocumentId) -> AppResult<Vec<String>> {
        let path = self.entry_path(id);
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "no document '{}' in vault {:?}",
                id, self.dir
            )));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                AppError::CorruptData(format!("{:?} is not valid UTF-8", path))
            } else {
                AppError::Io(e)
            }
        })?;

        let chunks: Vec<String> = serde_json::from_str(&contents).map_err(|e| {
            AppError::CorruptData(format!(
                "{:?} is not a JSON array of strings: {}",
                path, e
            ))
        })?;

        tracing::debug!("Loaded {} chunks for '{}'", chunks.len(), id);
        Ok(chunks)
    }

    fn remove(&self, id: &DocumentId) -> AppResult<()> {
        let path = self.entry_path(id);
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "no document '{}' in vault {:?}",
                id, self.dir
            )));
        }

        fs::remove_file(&path)?;
        tracing::debug!("Removed '{}' from vault", id);
        Ok(())
    }

    fn contains(&self, id: &DocumentId) -> bool {
        self.entry_path(id).is_file()
    }
}
