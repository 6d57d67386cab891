//! Text chunking with configurable size and overlap.
//!
//! Splits extracted document text into bounded, overlapping chunks. Sizes are
//! measured in characters (Unicode scalar values), never bytes, so multi-byte
//! text is never cut inside a character.
//!
//! Within each window the split point prefers, in order: the last paragraph
//! break, the last sentence end, the last line break, the last whitespace run,
//! and finally a hard cut at the window edge.

use pdfchat_core::config::ChunkingSettings;
use pdfchat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Chunker parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum chunk length in characters
    pub max_size: usize,

    /// Characters shared by consecutive chunks
    pub overlap: usize,

    /// Emit a whitespace-free run longer than `max_size` whole instead of
    /// hard-cutting it
    pub keep_long_words: bool,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            overlap: 200,
            keep_long_words: false,
        }
    }
}

impl From<&ChunkingSettings> for ChunkConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self {
            max_size: settings.chunk_size,
            overlap: settings.chunk_overlap,
            keep_long_words: settings.keep_long_words,
        }
    }
}

/// Byte range of a chunk within the source text, after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    pub start: usize,
    pub end: usize,
}

/// Kind of natural boundary, in ascending priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    Whitespace,
    Newline,
    Sentence,
    Paragraph,
}

/// Deterministic text chunker.
#[derive(Debug, Clone)]
pub struct TextChunker {
    config: ChunkConfig,
}

impl TextChunker {
    /// Create a chunker, rejecting parameters that cannot make progress.
    pub fn new(config: ChunkConfig) -> AppResult<Self> {
        if config.max_size == 0 {
            return Err(AppError::InvalidConfiguration(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        if config.overlap >= config.max_size {
            return Err(AppError::InvalidConfiguration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                config.overlap, config.max_size
            )));
        }

        Ok(Self { config })
    }

    /// Split `text` into trimmed, non-empty chunks in document order.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.spans(text)
            .into_iter()
            .map(|span| text[span.start..span.end].to_string())
            .collect()
    }

    /// Split `text` and report where each chunk lies in it.
    pub fn spans(&self, text: &str) -> Vec<ChunkSpan> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let len = chars.len();
        let byte_at = |i: usize| chars.get(i).map(|(b, _)| *b).unwrap_or(text.len());

        let mut spans = Vec::new();
        let mut cursor = 0;

        loop {
            let window_end = cursor + self.config.max_size;
            if window_end >= len {
                push_trimmed(text, byte_at(cursor), text.len(), &mut spans);
                break;
            }

            let split = self.find_split(&chars, cursor, window_end);
            push_trimmed(text, byte_at(cursor), byte_at(split), &mut spans);

            if split >= len {
                break;
            }

            cursor = split.saturating_sub(self.config.overlap).max(cursor + 1);
        }

        tracing::debug!(
            "Chunked {} chars into {} chunks (size: {}, overlap: {})",
            len,
            spans.len(),
            self.config.max_size,
            self.config.overlap
        );

        spans
    }

    /// Pick the split point for the window `[cursor, window_end]`.
    ///
    /// A split point `s` cuts between `chars[s - 1]` and `chars[s]`. Only
    /// points past `cursor + overlap` are eligible, so the next cursor
    /// (`s - overlap`) always moves forward.
    fn find_split(&self, chars: &[(usize, char)], cursor: usize, window_end: usize) -> usize {
        let first_eligible = cursor + self.config.overlap + 1;
        let mut best: Option<(Boundary, usize)> = None;

        // Walk backwards so the first hit of each kind is the last in the window.
        for s in (first_eligible..=window_end).rev() {
            let Some(kind) = boundary_at(chars, s) else {
                continue;
            };

            match best {
                Some((found, _)) if found >= kind => {}
                _ => best = Some((kind, s)),
            }

            if kind == Boundary::Paragraph {
                break;
            }
        }

        match best {
            Some((_, s)) => s,
            None if self.config.keep_long_words => {
                let mut end = window_end;
                while end < chars.len() && !chars[end].1.is_whitespace() {
                    end += 1;
                }
                end
            }
            None => window_end,
        }
    }
}

/// Classify the cut before `chars[s]`, if it starts a whitespace run.
fn boundary_at(chars: &[(usize, char)], s: usize) -> Option<Boundary> {
    let (_, c) = *chars.get(s)?;
    let (_, prev) = chars[s - 1];
    if !c.is_whitespace() || prev.is_whitespace() {
        return None;
    }

    let newlines = chars[s..]
        .iter()
        .take_while(|(_, ch)| ch.is_whitespace())
        .filter(|(_, ch)| *ch == '\n')
        .take(2)
        .count();

    let kind = if newlines >= 2 {
        Boundary::Paragraph
    } else if matches!(prev, '.' | '!' | '?') {
        Boundary::Sentence
    } else if newlines == 1 {
        Boundary::Newline
    } else {
        Boundary::Whitespace
    };

    Some(kind)
}

/// Record `text[start..end]` with surrounding whitespace removed, unless empty.
fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<ChunkSpan>) {
    let slice = &text[start..end];
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = start + slice.trim_end().len();

    if trimmed_start < trimmed_end {
        spans.push(ChunkSpan {
            start: trimmed_start,
            end: trimmed_end,
        });
    }
}

/// Chunk text with the given size and overlap.
///
/// Fails with `InvalidConfiguration` if `max_size == 0` or
/// `overlap >= max_size`.
pub fn chunk_text(text: &str, max_size: usize, overlap: usize) -> AppResult<Vec<String>> {
    let chunker = TextChunker::new(ChunkConfig {
        max_size,
        overlap,
        keep_long_words: false,
    })?;
    Ok(chunker.chunk(text))
}
