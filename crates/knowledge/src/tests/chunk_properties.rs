//! Property tests for the chunker.

use crate::chunker::{ChunkConfig, TextChunker};
use proptest::prelude::*;

fn prose() -> impl Strategy<Value = String> {
    "[a-zA-Zé0-9 .,!?\n\t]{0,600}"
}

fn chunker(max_size: usize, overlap: usize) -> TextChunker {
    TextChunker::new(ChunkConfig {
        max_size,
        overlap,
        keep_long_words: false,
    })
    .unwrap()
}

fn params() -> impl Strategy<Value = (usize, usize)> {
    (4usize..120).prop_flat_map(|size| (Just(size), 0..size))
}

proptest! {
    #[test]
    fn chunks_are_trimmed_substrings((size, overlap) in params(), text in prose()) {
        let chunker = chunker(size, overlap);
        for (chunk, span) in chunker.chunk(&text).iter().zip(chunker.spans(&text)) {
            prop_assert_eq!(chunk.as_str(), &text[span.start..span.end]);
            prop_assert!(!chunk.is_empty());
            prop_assert_eq!(chunk.trim(), chunk.as_str());
        }
    }

    #[test]
    fn chunks_respect_max_size((size, overlap) in params(), text in prose()) {
        for chunk in chunker(size, overlap).chunk(&text) {
            prop_assert!(
                chunk.chars().count() <= size,
                "chunk of {} chars exceeds {}",
                chunk.chars().count(),
                size
            );
        }
    }

    #[test]
    fn spans_move_forward((size, overlap) in params(), text in prose()) {
        let spans = chunker(size, overlap).spans(&text);
        for pair in spans.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
            prop_assert!(pair[0].end <= pair[1].end);
        }
    }

    #[test]
    fn neighbours_share_at_most_overlap((size, overlap) in params(), text in prose()) {
        let spans = chunker(size, overlap).spans(&text);
        for pair in spans.windows(2) {
            let shared = if pair[1].start < pair[0].end {
                text[pair[1].start..pair[0].end].chars().count()
            } else {
                0
            };
            prop_assert!(
                shared <= overlap,
                "chunks share {} chars, overlap is {}",
                shared,
                overlap
            );
        }
    }

    #[test]
    fn every_word_is_covered((size, overlap) in params(), text in prose()) {
        let spans = chunker(size, overlap).spans(&text);
        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                continue;
            }
            prop_assert!(
                spans.iter().any(|s| s.start <= i && i < s.end),
                "char {:?} at byte {} not covered",
                c,
                i
            );
        }
    }

    #[test]
    fn chunking_is_deterministic((size, overlap) in params(), text in prose()) {
        let chunker = chunker(size, overlap);
        prop_assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn blank_text_yields_nothing(text in "[ \n\t]{0,200}") {
        prop_assert!(chunker(10, 3).chunk(&text).is_empty());
    }
}
