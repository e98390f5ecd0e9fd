//! Transcript chunking for models with a bounded context window.
//!
//! Fragments are packed greedily into contiguous chunks by the length of
//! their rendered prompt lines.

mod budget;

pub use budget::{ContextBudget, KNOWN_CONTEXT_LIMITS};

use crate::transcript::TranscriptFragment;

/// A contiguous run of fragments borrowed from the full transcript.
pub type Chunk<'a> = &'a [TranscriptFragment];

/// Splits fragments into chunks whose rendered text fits a character budget.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptChunker {
    max_chars: usize,
}

impl TranscriptChunker {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Estimated rendered length of one fragment: `[M:SS] text` plus newline.
    fn line_len(fragment: &TranscriptFragment) -> usize {
        fragment.render_line().chars().count() + 1
    }

    /// Split fragments into ordered, non-overlapping chunks covering the input.
    ///
    /// Every chunk holds at least one fragment. A fragment that alone exceeds
    /// the budget gets a chunk of its own.
    pub fn split<'a>(&self, fragments: &'a [TranscriptFragment]) -> Vec<Chunk<'a>> {
        let mut chunks = Vec::new();
        let mut chunk_start = 0;
        let mut current_chars = 0;

        for (i, fragment) in fragments.iter().enumerate() {
            let line_len = Self::line_len(fragment);
            if current_chars + line_len > self.max_chars && i > chunk_start {
                chunks.push(&fragments[chunk_start..i]);
                chunk_start = i;
                current_chars = 0;
            }
            current_chars += line_len;
        }

        if chunk_start < fragments.len() {
            chunks.push(&fragments[chunk_start..]);
        }

        chunks
    }
}
