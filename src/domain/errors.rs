//! Domain error types
//!
//! This module defines the error hierarchy for piiscrub. Errors fall in two
//! groups: systemic errors (configuration, unsupported strategy or hash
//! algorithm, out-of-range offsets) that fail a call before any work is done,
//! and per-unit errors (recognition, extraction) that callers isolate and
//! degrade into empty or error-tagged results.

use thiserror::Error;

/// Main piiscrub error type
#[derive(Debug, Error)]
pub enum PiiError {
    /// Non-positive chunk length or another out-of-range parameter
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The entity recognizer failed on a chunk
    #[error("Recognition failure: {0}")]
    RecognitionFailure(String),

    /// Unknown anonymization strategy name
    #[error("Unsupported anonymizer type: {0}")]
    UnsupportedStrategy(String),

    /// Unknown hash algorithm name
    #[error("Unsupported hash type: {0}")]
    UnsupportedHashAlgorithm(String),

    /// A span does not lie within the text being anonymized
    #[error("Span [{start}, {end}) is out of range for text of length {len}")]
    OffsetOutOfRange {
        /// Span start (characters)
        start: usize,
        /// Span end (characters, exclusive)
        end: usize,
        /// Text length (characters)
        len: usize,
    },

    /// Text extraction (OCR) failed for one source
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl PiiError {
    /// Whether the error is systemic and must fail the whole call
    pub fn is_systemic(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_)
                | Self::UnsupportedStrategy(_)
                | Self::UnsupportedHashAlgorithm(_)
                | Self::OffsetOutOfRange { .. }
        )
    }
}

impl From<std::io::Error> for PiiError {
    fn from(err: std::io::Error) -> Self {
        PiiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PiiError {
    fn from(err: serde_json::Error) -> Self {
        PiiError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PiiError {
    fn from(err: toml::de::Error) -> Self {
        PiiError::InvalidConfiguration(format!("TOML parse error: {err}"))
    }
}
