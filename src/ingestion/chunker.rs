//! Sentence-aligned text chunking with word-approximated overlap

use regex::Regex;
use std::sync::LazyLock;

use crate::config::ChunkingConfig;

// Shortest runs terminated by `.`, `!`, or `?`; terminator runs like `...`
// stay attached to the sentence.
static SENTENCE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Splits normalized text into overlapping, sentence-aligned segments.
///
/// The size bound is a soft target: a single sentence longer than
/// `target_size` is emitted whole, never split mid-sentence. Overlap is
/// approximated as the last `overlap / 5` words of the closed chunk
/// (assuming ~5 characters per word), which avoids mid-word truncation.
pub struct TextChunker {
    /// Target chunk size in characters
    target_size: usize,
    /// Overlap between chunks in characters
    overlap: usize,
    /// Chunks at or below this length are dropped
    min_len: usize,
}

impl TextChunker {
    /// Create a chunker with the given target size and overlap
    pub fn new(target_size: usize, overlap: usize) -> Self {
        Self {
            target_size,
            overlap,
            min_len: 50,
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self {
            target_size: config.chunk_size,
            overlap: config.chunk_overlap,
            min_len: config.min_chunk_len,
        }
    }

    /// Split `text` into chunks. Empty input yields an empty Vec.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let sentences: Vec<&str> = SENTENCE_RUNS.find_iter(text).map(|m| m.as_str()).collect();
        // No terminator anywhere: the whole text is one sentence unit.
        let sentences = if sentences.is_empty() {
            vec![text]
        } else {
            sentences
        };

        let mut chunks = Vec::new();
        let mut current = String::new();

        for sentence in sentences {
            let sentence = sentence.trim();

            if current.len() + sentence.len() > self.target_size && !current.is_empty() {
                chunks.push(current.trim().to_string());

                // Seed the next chunk with the word tail of the one just closed.
                let words: Vec<&str> = current.split(' ').collect();
                let keep = self.overlap / 5;
                let tail = words[words.len().saturating_sub(keep)..].join(" ");
                current = format!("{} {}", tail, sentence);
            } else {
                current.push(' ');
                current.push_str(sentence);
            }
        }

        if !current.trim().is_empty() {
            chunks.push(current.trim().to_string());
        }

        chunks.retain(|chunk| chunk.len() > self.min_len);
        chunks
    }
}
