//! End-to-end flows: upload a file, open it, chat about it.

use super::support::{chat_settings, MockLlmClient};
use crate::chunker::{ChunkConfig, TextChunker};
use crate::session::{SendOutcome, Session};
use crate::store::{ChunkStore, VaultStore};
use crate::transcript::Sender;
use crate::types::DocumentId;
use crate::worker::{ChatOutcome, ChatWorker};
use pdfchat_core::AppError;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

struct Fixture {
    _temp: TempDir,
    workspace: std::path::PathBuf,
    store: Arc<VaultStore>,
    client: Arc<MockLlmClient>,
    session: Session,
    outcomes: UnboundedReceiver<ChatOutcome>,
}

fn fixture(client: MockLlmClient) -> Fixture {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().to_path_buf();
    let store = Arc::new(VaultStore::new(workspace.join("pdf_vault")));
    let client = Arc::new(client);

    let (worker, outcomes) = ChatWorker::new(client.clone());
    let chunker = TextChunker::new(ChunkConfig {
        max_size: 40,
        overlap: 10,
        keep_long_words: false,
    })
    .unwrap();
    let session = Session::new(store.clone(), chunker, chat_settings(), worker);

    Fixture {
        _temp: temp,
        workspace,
        store,
        client,
        session,
        outcomes,
    }
}

fn write_notes(fx: &Fixture, name: &str, body: &str) -> std::path::PathBuf {
    let path = fx.workspace.join(name);
    fs::write(&path, body).unwrap();
    path
}

const NOTES: &str = "The boiler must be serviced every spring.\n\n\
                     Filters are replaced every three months.";

#[tokio::test]
async fn test_upload_open_ask() {
    let mut fx = fixture(MockLlmClient::replying("Every spring."));
    let path = write_notes(&fx, "boiler.txt", NOTES);

    let stats = fx.session.upload(&path).unwrap();
    assert_eq!(stats.document.as_str(), "boiler");
    assert!(stats.chunks_count >= 2);
    assert!(fx.store.contains(&stats.document));
    assert!(fx.session.current().is_none());

    fx.session.open(&stats.document).unwrap();
    assert_eq!(
        fx.session.current().unwrap().chunks.len(),
        stats.chunks_count
    );

    let sent = fx
        .session
        .send_message("  When is the boiler serviced?  ")
        .unwrap();
    let SendOutcome::Submitted(id) = sent else {
        panic!("Expected Submitted, got {:?}", sent);
    };
    assert!(fx.session.is_busy());

    let outcome = fx.outcomes.recv().await.unwrap();
    assert_eq!(outcome.request_id, id);
    assert!(fx.session.apply_outcome(outcome));
    assert!(!fx.session.is_busy());

    let senders: Vec<Sender> = fx
        .session
        .transcript()
        .entries()
        .iter()
        .map(|e| e.sender)
        .collect();
    assert_eq!(
        senders,
        vec![Sender::System, Sender::System, Sender::You, Sender::Assistant]
    );

    let entries = fx.session.transcript().entries();
    assert_eq!(entries[2].text, "When is the boiler serviced?");
    assert_eq!(entries[3].text, "Every spring.");

    let request = &fx.client.requests()[0];
    let system = request.system.as_deref().unwrap();
    assert!(system.starts_with("Context from PDF: The boiler must be serviced"));
    assert_eq!(request.prompt, "When is the boiler serviced?");
}

#[tokio::test]
async fn test_send_without_document() {
    let mut fx = fixture(MockLlmClient::replying("unused"));

    let sent = fx.session.send_message("Hello?").unwrap();
    assert_eq!(sent, SendOutcome::NoDocument);
    assert!(!fx.session.is_busy());
    assert_eq!(
        fx.session.transcript().last().unwrap().sender,
        Sender::System
    );
    assert!(fx.client.requests().is_empty());
}

#[tokio::test]
async fn test_blank_message_is_ignored() {
    let mut fx = fixture(MockLlmClient::replying("unused"));
    fx.store
        .save(&DocumentId::new("doc").unwrap(), &["text".to_string()])
        .unwrap();
    fx.session.open(&DocumentId::new("doc").unwrap()).unwrap();
    let before = fx.session.transcript().len();

    assert_eq!(fx.session.send_message("   ").unwrap(), SendOutcome::Empty);
    assert_eq!(fx.session.transcript().len(), before);
}

#[tokio::test]
async fn test_second_question_rejected_while_busy() {
    let mut fx = fixture(MockLlmClient::replying("First answer."));
    let id = DocumentId::new("doc").unwrap();
    fx.store.save(&id, &["Some content.".to_string()]).unwrap();
    fx.session.open(&id).unwrap();

    let first = fx.session.send_message("First?").unwrap();
    assert!(matches!(first, SendOutcome::Submitted(_)));

    let second = fx.session.send_message("Second?").unwrap();
    assert_eq!(second, SendOutcome::Busy);
    assert_eq!(
        fx.session.transcript().last().unwrap().sender,
        Sender::System
    );

    let outcome = fx.outcomes.recv().await.unwrap();
    assert!(fx.session.apply_outcome(outcome));

    // Accepted again once the answer is in.
    let third = fx.session.send_message("Third?").unwrap();
    assert!(matches!(third, SendOutcome::Submitted(_)));

    let prompts: Vec<String> = {
        let outcome = fx.outcomes.recv().await.unwrap();
        fx.session.apply_outcome(outcome);
        fx.client.requests().into_iter().map(|r| r.prompt).collect()
    };
    assert_eq!(prompts, vec!["First?", "Third?"]);
}

#[tokio::test]
async fn test_stale_outcome_ignored() {
    let mut fx = fixture(MockLlmClient::replying("Real answer."));
    let id = DocumentId::new("doc").unwrap();
    fx.store.save(&id, &["Some content.".to_string()]).unwrap();
    fx.session.open(&id).unwrap();

    let SendOutcome::Submitted(pending) = fx.session.send_message("Question?").unwrap() else {
        panic!("Expected Submitted");
    };

    let stale = ChatOutcome {
        request_id: pending + 100,
        result: Err(AppError::ChatFailed("late".to_string())),
    };
    let before = fx.session.transcript().len();
    assert!(!fx.session.apply_outcome(stale));
    assert!(fx.session.is_busy());
    assert_eq!(fx.session.transcript().len(), before);

    let outcome = fx.outcomes.recv().await.unwrap();
    assert!(fx.session.apply_outcome(outcome));
    assert_eq!(fx.session.transcript().last().unwrap().text, "Real answer.");
}

#[tokio::test]
async fn test_chat_failure_becomes_error_entry() {
    let mut fx = fixture(MockLlmClient::failing("model 'llama3.1:8b' not found"));
    let id = DocumentId::new("doc").unwrap();
    fx.store.save(&id, &["Some content.".to_string()]).unwrap();
    fx.session.open(&id).unwrap();

    fx.session.send_message("Anything?").unwrap();
    let outcome = fx.outcomes.recv().await.unwrap();
    assert!(fx.session.apply_outcome(outcome));

    let last = fx.session.transcript().last().unwrap();
    assert_eq!(last.sender, Sender::Error);
    assert!(last.text.contains("not found"));

    // The session stays usable.
    assert!(!fx.session.is_busy());
    assert!(matches!(
        fx.session.send_message("Again?").unwrap(),
        SendOutcome::Submitted(_)
    ));
}

#[tokio::test]
async fn test_open_missing_keeps_current() {
    let mut fx = fixture(MockLlmClient::replying("unused"));
    let id = DocumentId::new("doc").unwrap();
    fx.store.save(&id, &["Some content.".to_string()]).unwrap();
    fx.session.open(&id).unwrap();

    let result = fx.session.open(&DocumentId::new("ghost").unwrap());
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(fx.session.current().unwrap().id, id);
    assert_eq!(
        fx.session.transcript().last().unwrap().sender,
        Sender::Error
    );
}

#[tokio::test]
async fn test_failed_upload_writes_nothing() {
    let mut fx = fixture(MockLlmClient::replying("unused"));
    let blank = write_notes(&fx, "blank.txt", " \n\n ");
    let unsupported = write_notes(&fx, "sheet.xlsx", "cells");

    assert!(matches!(
        fx.session.upload(&blank),
        Err(AppError::ExtractionFailed(_))
    ));
    assert!(matches!(
        fx.session.upload(&unsupported),
        Err(AppError::ExtractionFailed(_))
    ));

    assert!(fx.session.list().unwrap().is_empty());
    assert!(!fx.workspace.join("pdf_vault").exists());
}

#[tokio::test]
async fn test_reupload_replaces_chunks() {
    let mut fx = fixture(MockLlmClient::replying("unused"));
    let path = write_notes(&fx, "notes.txt", "Short note.");
    fx.session.upload(&path).unwrap();

    fs::write(&path, NOTES).unwrap();
    let stats = fx.session.upload(&path).unwrap();

    let stored = fx.store.load(&stats.document).unwrap();
    assert_eq!(stored.len(), stats.chunks_count);
    assert!(stored[0].starts_with("The boiler"));
    assert_eq!(fx.session.list().unwrap().len(), 1);
}

#[test]
fn test_summaries_skip_corrupt() {
    let temp = TempDir::new().unwrap();
    let store = VaultStore::new(temp.path());
    store
        .save(&DocumentId::new("good").unwrap(), &["abc".to_string()])
        .unwrap();
    fs::write(temp.path().join("bad.json"), "not json").unwrap();

    let summaries = crate::summaries(&store).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].document.as_str(), "good");
    assert_eq!(summaries[0].chunks_count, 1);
}
