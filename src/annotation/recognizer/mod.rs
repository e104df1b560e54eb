//! Entity recognizer capability
//!
//! The annotator consumes entity detection through the [`Recognizer`] trait.
//! The model behind it is external; the crate ships a pattern-based
//! [`RegexRecognizer`] and tests substitute deterministic stubs.

pub mod patterns;
pub mod regex;

pub use self::patterns::PatternRegistry;
pub use self::regex::RegexRecognizer;

use crate::domain::Result;

/// A raw span reported by a recognizer
///
/// Offsets are characters, local to the text passed to
/// [`Recognizer::recognize`], end exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    /// Start offset (characters)
    pub start: usize,
    /// End offset (characters, exclusive)
    pub end: usize,
    /// Label as produced by the model, normalized later
    pub label: String,
    /// Confidence score
    pub score: f32,
}

impl RecognizedEntity {
    /// Create a new recognized span
    pub fn new(start: usize, end: usize, label: impl Into<String>, score: f32) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            score,
        }
    }
}

/// Trait for entity recognition implementations
///
/// Implementations are shared across concurrent tasks and must be safe for
/// concurrent read-only use.
pub trait Recognizer: Send + Sync {
    /// Name recorded in annotation metadata
    fn name(&self) -> &str;

    /// Detect entities in `text`, ordered by start offset
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PiiError::RecognitionFailure`] when the model
    /// fails on this input. The annotator contains such failures per chunk.
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>>;
}
