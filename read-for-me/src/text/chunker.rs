//! Byte-bounded text chunking for TTS requests.

use super::TextChunk;

/// Default chunk ceiling in UTF-8 bytes, below the provider's 5000 byte limit.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 4500;

/// Split text into chunks of at most `max_bytes` UTF-8 bytes.
///
/// Each cut is made at the rightmost whitespace that starts before
/// `max_bytes`, and both sides of the cut are trimmed. When a prefix has no
/// usable whitespace the text is cut at `max_bytes` instead, which splits a
/// word. That cut is moved back to a character boundary, so a fallback chunk
/// is exactly `max_bytes` long for ASCII text and may be a few bytes shorter
/// otherwise. A single character wider than `max_bytes` is emitted whole.
///
/// Empty or whitespace-only input yields no chunks.
pub fn split_into_chunks(text: &str, max_bytes: usize) -> Vec<String> {
    debug_assert!(max_bytes > 0, "chunk ceiling must be positive");
    let max_bytes = max_bytes.max(1);

    let mut chunks = Vec::new();
    let mut remaining = text.trim();

    while remaining.len() > max_bytes {
        let split_at = match last_whitespace_before(remaining, max_bytes) {
            Some(pos) if pos > 0 => pos,
            _ => hard_split_point(remaining, max_bytes),
        };

        let (head, tail) = remaining.split_at(split_at);
        chunks.push(head.trim().to_string());
        remaining = tail.trim();
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}

/// Byte offset of the last whitespace character starting before `limit`.
fn last_whitespace_before(text: &str, limit: usize) -> Option<usize> {
    text.char_indices()
        .take_while(|(i, _)| *i < limit)
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .last()
}

/// Largest char boundary at or below `limit`, but never zero.
fn hard_split_point(text: &str, limit: usize) -> usize {
    let mut end = limit.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    if end == 0 {
        text.chars().next().map_or(text.len(), char::len_utf8)
    } else {
        end
    }
}

/// Split normalized document text into numbered chunks (1-based).
pub fn chunk_document(text: &str, max_bytes: usize) -> Vec<TextChunk> {
    split_into_chunks(text, max_bytes)
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextChunk::new(i + 1, text))
        .collect()
}
