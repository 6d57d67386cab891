//! Configuration management for PDF Chat.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config files (.pdfchat/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The configuration is workspace-centric: the vault and
//! the optional prompt overrides live under the workspace directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: &[&str] = &["ollama"];

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .pdfchat/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Chat model settings
    pub llm: LlmSettings,

    /// Where chunk sequences are persisted
    pub vault: VaultSettings,

    /// Chunker parameters
    pub chunking: ChunkingSettings,

    /// Context window selection
    pub context: ContextSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Chat model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider name (e.g. "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Provider endpoint; the provider default is used when absent
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Cap on generated tokens
    #[serde(rename = "maxTokens")]
    pub max_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "llama3.1:8b".to_string(),
            endpoint: None,
            timeout_secs: 120,
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Vault (chunk store) settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultSettings {
    /// Vault directory; relative paths resolve against the workspace.
    /// Defaults to `<workspace>/pdf_vault`.
    pub dir: Option<PathBuf>,
}

/// Chunker parameters, in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length
    #[serde(rename = "chunkSize")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks
    #[serde(rename = "chunkOverlap")]
    pub chunk_overlap: usize,

    /// Emit whitespace-free runs longer than `chunk_size` whole
    #[serde(rename = "keepLongWords")]
    pub keep_long_words: bool,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            keep_long_words: false,
        }
    }
}

/// How chunks are picked for the context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextStrategy {
    /// The first `max_chunks` chunks in document order
    #[default]
    First,
    /// Chunks sharing the most terms with the question
    Keyword,
}

impl FromStr for ContextStrategy {
    type Err = AppError;

    /// Parse a strategy name, as given to `--strategy`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" | "first-n" => Ok(Self::First),
            "keyword" | "keywords" => Ok(Self::Keyword),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown context strategy: {} (expected first or keyword)",
                s
            ))),
        }
    }
}

/// Context window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    /// Number of chunks in the context window
    #[serde(rename = "maxChunks")]
    pub max_chunks: usize,

    /// Text placed between selected chunks
    pub separator: String,

    /// Selection policy
    pub strategy: ContextStrategy,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            max_chunks: 5,
            separator: " ".to_string(),
            strategy: ContextStrategy::First,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSettings>,
    vault: Option<VaultSettings>,
    chunking: Option<ChunkingSettings>,
    context: Option<ContextSettings>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            llm: LlmSettings::default(),
            vault: VaultSettings::default(),
            chunking: ChunkingSettings::default(),
            context: ContextSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and environment variables.
    ///
    /// `workspace` defaults to the current directory and `config_file` to
    /// `<workspace>/.pdfchat/config.yaml`. An explicit config file must exist.
    ///
    /// Environment variables (applied after the config file):
    /// - `PDFCHAT_PROVIDER`: LLM provider
    /// - `PDFCHAT_MODEL`: Model identifier
    /// - `PDFCHAT_ENDPOINT`: Provider endpoint
    /// - `PDFCHAT_VAULT`: Vault directory
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use pdfchat_core::config::AppConfig;
    ///
    /// let config = AppConfig::load_from(None, None).expect("Failed to load config");
    /// println!("Vault: {:?}", config.vault_dir());
    /// ```
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }
        config.config_file = config_file;

        // Validate workspace exists
        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // Load from YAML config file if it exists
        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.config_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("PDFCHAT_PROVIDER") {
            config.llm.provider = provider;
        }

        if let Ok(model) = std::env::var("PDFCHAT_MODEL") {
            config.llm.model = model;
        }

        if let Ok(endpoint) = std::env::var("PDFCHAT_ENDPOINT") {
            config.llm.endpoint = Some(endpoint);
        }

        if let Ok(vault) = std::env::var("PDFCHAT_VAULT") {
            config.vault.dir = Some(PathBuf::from(vault));
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        tracing::debug!("Merging config file {:?}", path);

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(llm) = config_file.llm {
            result.llm = llm;
        }

        if let Some(vault) = config_file.vault {
            result.vault = vault;
        }

        if let Some(chunking) = config_file.chunking {
            result.chunking = chunking;
        }

        if let Some(context) = config_file.context {
            result.context = context;
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.llm.provider = provider;
        }

        if let Some(model) = model {
            self.llm.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .pdfchat directory.
    pub fn config_dir(&self) -> PathBuf {
        self.workspace.join(".pdfchat")
    }

    /// Resolve the vault directory.
    pub fn vault_dir(&self) -> PathBuf {
        match self.vault.dir {
            Some(ref dir) if dir.is_absolute() => dir.clone(),
            Some(ref dir) => self.workspace.join(dir),
            None => self.workspace.join("pdf_vault"),
        }
    }

    /// Validate the provider and the chunking parameters.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.llm.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.llm.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.chunking.chunk_size == 0 {
            return Err(AppError::InvalidConfiguration(
                "chunkSize must be greater than zero".to_string(),
            ));
        }

        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(AppError::InvalidConfiguration(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }

        if self.context.max_chunks == 0 {
            return Err(AppError::Config(
                "context.maxChunks must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
