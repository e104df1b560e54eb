//! Annotation data models

use super::entity::EntityType;
use super::errors::PiiError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provenance of an annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionMetadata {
    /// Name of the recognizer that produced the span
    #[serde(default)]
    pub recognizer_name: Option<String>,
}

impl RecognitionMetadata {
    /// Metadata naming the recognizer
    pub fn from_recognizer(name: impl Into<String>) -> Self {
        Self {
            recognizer_name: Some(name.into()),
        }
    }
}

/// One detected entity occurrence
///
/// `start` and `end` are character offsets, end exclusive. When produced by
/// the annotator in document offset mode they index the original, unchunked
/// text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnnotation")]
pub struct AnnotationResult {
    /// Start offset (characters, inclusive)
    pub start: usize,
    /// End offset (characters, exclusive)
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// Normalized entity type
    pub entity_type: EntityType,
    /// Optional provenance
    #[serde(default)]
    pub recognition_metadata: Option<RecognitionMetadata>,
}

impl AnnotationResult {
    /// Create a new annotation, normalizing the label and clamping the score
    pub fn new(start: usize, end: usize, score: f32, label: impl AsRef<str>) -> Self {
        Self {
            start,
            end,
            score: clamp_score(score),
            entity_type: EntityType::normalize(label.as_ref()),
            recognition_metadata: None,
        }
    }

    /// Attach recognition metadata
    pub fn with_metadata(mut self, metadata: RecognitionMetadata) -> Self {
        self.recognition_metadata = Some(metadata);
        self
    }

    /// Return a copy shifted right by `offset` characters
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self.clone()
        }
    }

    /// Span length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check `start < end <= text_len`
    pub fn validate_bounds(&self, text_len: usize) -> Result<()> {
        if self.start >= self.end || self.end > text_len {
            return Err(PiiError::OffsetOutOfRange {
                start: self.start,
                end: self.end,
                len: text_len,
            });
        }
        Ok(())
    }
}

/// Deserialized form, clamped through [`AnnotationResult::new`]
#[derive(Deserialize)]
struct RawAnnotation {
    start: usize,
    end: usize,
    score: f32,
    entity_type: EntityType,
    #[serde(default)]
    recognition_metadata: Option<RecognitionMetadata>,
}

impl From<RawAnnotation> for AnnotationResult {
    fn from(raw: RawAnnotation) -> Self {
        Self {
            recognition_metadata: raw.recognition_metadata,
            ..Self::new(raw.start, raw.end, raw.score, raw.entity_type.label())
        }
    }
}

/// Combined annotations for one input text of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedText {
    /// Input text, before truncation
    pub text: String,
    /// Annotations across all chunks of the text
    pub annotations: Vec<AnnotationResult>,
}

impl AnnotatedText {
    /// Create a new annotated text
    pub fn new(text: impl Into<String>, annotations: Vec<AnnotationResult>) -> Self {
        Self {
            text: text.into(),
            annotations,
        }
    }
}

/// Key a batch by input text; later duplicates overwrite earlier ones
pub fn batch_into_map(batch: Vec<AnnotatedText>) -> HashMap<String, Vec<AnnotationResult>> {
    batch
        .into_iter()
        .map(|item| (item.text, item.annotations))
        .collect()
}

fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
