//! PDF Chat CLI
//!
//! Main entry point for the pdfchat command-line tool.
//! Upload documents into the vault and chat with them through a local model.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AskCommand, ChatCommand, ListCommand, RemoveCommand, ShowCommand, UploadCommand,
};
use pdfchat_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// PDF Chat - ask questions about your documents with a local model
#[derive(Parser, Debug)]
#[command(name = "pdfchat")]
#[command(about = "Chat with PDF documents using a local model", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PDFCHAT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PDFCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Chat provider (ollama)
    #[arg(short, long, global = true, env = "PDFCHAT_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "PDFCHAT_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract, chunk and store documents in the vault
    Upload(UploadCommand),

    /// List stored documents
    List(ListCommand),

    /// Show the chunks of a stored document
    Show(ShowCommand),

    /// Remove a document from the vault
    Remove(RemoveCommand),

    /// Ask one question about a stored document
    Ask(AskCommand),

    /// Interactive chat session
    Chat(ChatCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load configuration: defaults, config file, then environment
    let config = AppConfig::load_from(cli.workspace, cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    config.validate()?;

    tracing::info!("PDF Chat CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Vault: {:?}", config.vault_dir());
    tracing::debug!("Provider: {}", config.llm.provider);
    tracing::debug!("Model: {}", config.llm.model);

    let command_name = match &cli.command {
        Commands::Upload(_) => "upload",
        Commands::List(_) => "list",
        Commands::Show(_) => "show",
        Commands::Remove(_) => "remove",
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Upload(cmd) => cmd.execute(&config),
        Commands::List(cmd) => cmd.execute(&config),
        Commands::Show(cmd) => cmd.execute(&config),
        Commands::Remove(cmd) => cmd.execute(&config),
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
