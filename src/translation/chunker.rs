/*!
 * Splitting lyrics into provider-sized chunks.
 *
 * Chunks are built from whole lines in their original order. A line is never
 * split: when a single line is longer than the budget it becomes its own
 * oversized chunk instead of being cut or truncated.
 */

use std::ops::Range;

/// Default chunk budget in characters, sized for the MyMemory GET limit
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 450;

/// A contiguous run of lyrics lines submitted in one provider request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text with surrounding blank lines and whitespace trimmed
    pub text: String,
    /// Indices of the source lines this chunk was built from
    pub lines: Range<usize>,
}

impl Chunk {
    /// Length of the chunk text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this chunk exceeds the budget it was built for
    pub fn is_oversized(&self, max_chars: usize) -> bool {
        self.char_len() > max_chars
    }
}

/// Split text into chunks of at most `max_chars` characters
///
/// Each line is counted with its line terminator. Chunks that are empty after
/// trimming are dropped.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;
    let mut start_line = 0usize;

    let lines: Vec<&str> = text.split('\n').collect();

    for (index, line) in lines.iter().enumerate() {
        let line_chars = line.chars().count() + 1;

        if current_chars + line_chars > max_chars && current_chars > 0 {
            push_chunk(&mut chunks, &current, start_line..index);
            current.clear();
            current_chars = 0;
            start_line = index;
        }

        current.push_str(line);
        current.push('\n');
        current_chars += line_chars;
    }

    push_chunk(&mut chunks, &current, start_line..lines.len());
    chunks
}

fn push_chunk(chunks: &mut Vec<Chunk>, text: &str, lines: Range<usize>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(Chunk {
            text: trimmed.to_string(),
            lines,
        });
    }
}
