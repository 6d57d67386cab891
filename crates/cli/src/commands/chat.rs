//! Chat command handler.
//!
//! Runs the interactive session. Plain lines are questions about the open
//! document; lines starting with `/` are session commands. Answers arrive from
//! the chat worker while the prompt stays responsive.

use clap::Args;
use pdfchat_core::config::{AppConfig, ContextStrategy};
use pdfchat_core::AppResult;
use pdfchat_knowledge::{ChatWorker, DocumentId, Sender, Session};
use pdfchat_llm::create_client;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  /upload PATH   extract, chunk and store a file
  /open DOC      load a stored document
  /list          list stored documents
  /help          show this help
  /quit          leave the session
Anything else is a question about the open document.";

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Document to open at start
    pub document: Option<DocumentId>,

    /// Temperature for response generation (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Context selection strategy (first, keyword)
    #[arg(long)]
    pub strategy: Option<ContextStrategy>,
}

/// One line of input, parsed.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput {
    Question(String),
    Upload(PathBuf),
    Open(String),
    List,
    Help,
    Quit,
    Unknown(String),
}

impl ReplInput {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix('/') else {
            return Self::Question(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match (name, arg.is_empty()) {
            ("upload", false) => Self::Upload(PathBuf::from(arg)),
            ("open", false) => Self::Open(arg.to_string()),
            ("list", _) => Self::List,
            ("help", _) => Self::Help,
            ("quit", _) | ("exit", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let client = create_client(&config.llm)?;
        let (worker, mut outcomes) = ChatWorker::new(client);
        let mut session = Session::new(
            Arc::new(super::vault(config)),
            super::chunker(config)?,
            super::chat_settings(config, self.temperature, self.strategy)?,
            worker,
        );

        session.record(
            Sender::System,
            format!(
                "Chatting with {} via {}. Type /help for commands.",
                config.llm.model, config.llm.provider
            ),
        );

        if let Some(document) = &self.document {
            // Failures are already in the transcript.
            let _ = session.open(document);
        } else {
            list_documents(&mut session);
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut shown = 0;

        loop {
            shown = flush_transcript(&session, shown);
            prompt(&session);

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if !handle_line(&mut session, &line) {
                        break;
                    }
                }
                Some(outcome) = outcomes.recv() => {
                    session.apply_outcome(outcome);
                }
            }
        }

        flush_transcript(&session, shown);
        if session.is_busy() {
            tracing::info!("Leaving with a question still pending");
        }

        Ok(())
    }
}

/// Act on one input line. Returns false when the session should end.
fn handle_line(session: &mut Session, line: &str) -> bool {
    match ReplInput::parse(line) {
        ReplInput::Question(question) => {
            if let Err(e) = session.send_message(&question) {
                tracing::debug!("Question not sent: {}", e);
            }
        }
        ReplInput::Upload(path) => {
            if let Err(e) = session.upload(&path) {
                tracing::debug!("Upload failed: {}", e);
            }
        }
        ReplInput::Open(name) => match DocumentId::new(name) {
            Ok(id) => {
                if let Err(e) = session.open(&id) {
                    tracing::debug!("Open failed: {}", e);
                }
            }
            Err(e) => session.record(Sender::Error, e.to_string()),
        },
        ReplInput::List => list_documents(session),
        ReplInput::Help => session.record(Sender::System, HELP),
        ReplInput::Quit => return false,
        ReplInput::Unknown(input) => session.record(
            Sender::System,
            format!("Unknown command: {}. Type /help for commands.", input),
        ),
    }
    true
}

fn list_documents(session: &mut Session) {
    match session.list() {
        Ok(documents) if documents.is_empty() => session.record(
            Sender::System,
            "The vault is empty. Add a document with /upload PATH.",
        ),
        Ok(documents) => {
            let names: Vec<String> = documents.into_iter().map(String::from).collect();
            session.record(
                Sender::System,
                format!("Documents: {}", names.join(", ")),
            );
        }
        Err(e) => session.record(Sender::Error, e.to_string()),
    }
}

/// Print entries appended since `shown` and return the new count.
fn flush_transcript(session: &Session, shown: usize) -> usize {
    let transcript = session.transcript();
    for entry in transcript.since(shown) {
        println!("{}", entry.render());
    }
    transcript.len()
}

fn prompt(session: &Session) {
    let marker = if session.is_busy() { "(waiting) > " } else { "> " };
    print!("{}", marker);
    let _ = std::io::stdout().flush();
}
