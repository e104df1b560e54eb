//! Length-based text chunking
//!
//! Chunks are cut every `max_len` characters without regard to word or
//! sentence boundaries, so an entity straddling a boundary is seen by the
//! recognizer as two partial entities.

use crate::domain::{PiiError, Result};

/// A contiguous slice of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// Chunk text
    pub text: &'a str,
    /// Character offset of the chunk within the document
    pub offset: usize,
    /// Chunk length in characters
    pub char_len: usize,
}

/// Fixed-length, order-preserving chunker
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_len: usize,
}

impl Chunker {
    /// Create a chunker producing chunks of at most `max_len` characters
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::InvalidConfiguration`] when `max_len` is zero.
    pub fn new(max_len: usize) -> Result<Self> {
        if max_len == 0 {
            return Err(PiiError::InvalidConfiguration(
                "chunk length must be positive".to_string(),
            ));
        }
        Ok(Self { max_len })
    }

    /// Maximum chunk length in characters
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Split `text` into chunks; empty text yields no chunks
    pub fn chunks<'a>(&self, text: &'a str) -> Vec<TextChunk<'a>> {
        let mut chunks = Vec::with_capacity(text.len() / self.max_len + 1);
        let mut start_byte = 0;
        let mut start_char = 0;
        let mut char_len = 0;

        for (byte_idx, _) in text.char_indices() {
            if char_len == self.max_len {
                chunks.push(TextChunk {
                    text: &text[start_byte..byte_idx],
                    offset: start_char,
                    char_len,
                });
                start_byte = byte_idx;
                start_char += char_len;
                char_len = 0;
            }
            char_len += 1;
        }

        if char_len > 0 {
            chunks.push(TextChunk {
                text: &text[start_byte..],
                offset: start_char,
                char_len,
            });
        }

        chunks
    }
}

/// Split `text` into substrings of at most `max_len` characters
///
/// ```
/// use piiscrub::annotation::chunker::chunk;
///
/// let chunks = chunk("abcdefg", 3).unwrap();
/// assert_eq!(chunks, vec!["abc", "def", "g"]);
/// assert_eq!(chunks.concat(), "abcdefg");
/// ```
pub fn chunk(text: &str, max_len: usize) -> Result<Vec<&str>> {
    let chunker = Chunker::new(max_len)?;
    Ok(chunker.chunks(text).into_iter().map(|c| c.text).collect())
}

/// Truncate `text` to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
