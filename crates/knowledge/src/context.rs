//! Context window selection.
//!
//! A `ContextSelector` decides which chunks of the loaded document accompany a
//! question to the chat model.

use pdfchat_core::config::{ContextSettings, ContextStrategy};
use std::collections::HashSet;

/// Words too common to say anything about relevance.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "what", "who", "how", "why", "when", "where", "does",
    "did", "about", "there", "can", "you", "your",
];

/// Strategy for building the context window sent alongside a question.
pub trait ContextSelector: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Concatenate the chunks chosen for `question`.
    fn select_context(&self, chunks: &[String], question: &str) -> String;
}

/// The first `count` chunks in document order.
#[derive(Debug, Clone)]
pub struct FirstChunks {
    pub count: usize,
    pub separator: String,
}

impl Default for FirstChunks {
    fn default() -> Self {
        Self {
            count: 5,
            separator: " ".to_string(),
        }
    }
}

impl ContextSelector for FirstChunks {
    fn name(&self) -> &str {
        "first"
    }

    fn select_context(&self, chunks: &[String], _question: &str) -> String {
        chunks
            .iter()
            .take(self.count)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// The `count` chunks sharing the most distinct terms with the question,
/// emitted in document order.
#[derive(Debug, Clone)]
pub struct KeywordOverlap {
    pub count: usize,
    pub separator: String,
}

impl KeywordOverlap {
    fn score(chunk: &str, terms: &HashSet<String>) -> usize {
        let words = terms_of(chunk);
        terms.iter().filter(|t| words.contains(*t)).count()
    }
}

impl ContextSelector for KeywordOverlap {
    fn name(&self) -> &str {
        "keyword"
    }

    fn select_context(&self, chunks: &[String], question: &str) -> String {
        let terms = terms_of(question);
        if terms.is_empty() {
            tracing::debug!("Question has no usable terms, using first chunks");
            return FirstChunks {
                count: self.count,
                separator: self.separator.clone(),
            }
            .select_context(chunks, question);
        }

        let mut ranked: Vec<(usize, usize)> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| (i, Self::score(chunk, &terms)))
            .collect();

        // Highest score first; ties keep document order
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut picked: Vec<usize> = ranked.iter().take(self.count).map(|(i, _)| *i).collect();
        picked.sort_unstable();

        tracing::debug!("Keyword selection picked chunks {:?}", picked);

        picked
            .into_iter()
            .map(|i| chunks[i].as_str())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Lower-cased words of at least three characters, minus stop words.
fn terms_of(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() >= 3 && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Build the selector named by the configuration.
pub fn selector_from_settings(settings: &ContextSettings) -> Box<dyn ContextSelector> {
    match settings.strategy {
        ContextStrategy::First => Box::new(FirstChunks {
            count: settings.max_chunks,
            separator: settings.separator.clone(),
        }),
        ContextStrategy::Keyword => Box::new(KeywordOverlap {
            count: settings.max_chunks,
            separator: settings.separator.clone(),
        }),
    }
}
