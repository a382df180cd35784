//! Text processing module for TTS: normalization and chunking.

pub mod chunker;
pub mod normalizer;

pub use chunker::{DEFAULT_MAX_CHUNK_BYTES, chunk_document};
pub use normalizer::normalize;

/// A chunk of document text ready for one synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    /// Position in the document, starting at 1
    pub index: usize,
    /// The text content
    pub text: String,
}

impl TextChunk {
    /// Create a new text chunk.
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }
}
