//! Chat transcript.

use chrono::{DateTime, Local};
use std::fmt;

/// Who a transcript entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    You,
    Assistant,
    System,
    Error,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::You => "You",
            Self::Assistant => "Assistant",
            Self::System => "System",
            Self::Error => "Error",
        };
        f.write_str(label)
    }
}

/// One message in the transcript.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl TranscriptEntry {
    /// Render as `Sender HH:MM` followed by the message on its own line.
    pub fn render(&self) -> String {
        format!(
            "{} {}\n{}\n",
            self.sender,
            self.timestamp.format("%H:%M"),
            self.text
        )
    }
}

/// Append-only log of a chat session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current local time.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &TranscriptEntry {
        self.push_at(sender, Local::now(), text)
    }

    /// Append a message with an explicit timestamp.
    pub fn push_at(
        &mut self,
        sender: Sender,
        timestamp: DateTime<Local>,
        text: impl Into<String>,
    ) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry {
            sender,
            timestamp,
            text: text.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Entries appended at or after position `index`.
    pub fn since(&self, index: usize) -> &[TranscriptEntry] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_format() {
        let mut transcript = Transcript::new();
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();

        let entry = transcript.push_at(Sender::Assistant, at, "The answer is 42.");
        assert_eq!(entry.render(), "Assistant 14:05\nThe answer is 42.\n");
    }

    #[test]
    fn test_sender_labels() {
        assert_eq!(Sender::You.to_string(), "You");
        assert_eq!(Sender::System.to_string(), "System");
        assert_eq!(Sender::Error.to_string(), "Error");
    }

    #[test]
    fn test_since() {
        let mut transcript = Transcript::new();
        transcript.push(Sender::System, "one");
        transcript.push(Sender::You, "two");
        transcript.push(Sender::Assistant, "three");

        let tail: Vec<&str> = transcript.since(1).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(tail, vec!["two", "three"]);
        assert!(transcript.since(3).is_empty());
        assert!(transcript.since(10).is_empty());
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().sender, Sender::Assistant);
    }
}
