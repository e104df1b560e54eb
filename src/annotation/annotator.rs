//! Chunked annotation driver
//!
//! The [`Annotator`] splits a document into chunks, runs the injected
//! [`Recognizer`] over every chunk and concatenates the per-chunk spans into
//! one result per document.
//!
//! # Failure containment
//!
//! A recognizer error or panic is logged and turned into an empty span list
//! for that chunk. Sibling
//! chunks and sibling documents are unaffected, and nothing is cancelled.
//!
//! # Examples
//!
//! ```
//! use piiscrub::annotation::{Annotator, AnnotatorConfig, RegexRecognizer};
//! use std::sync::Arc;
//!
//! # fn example() -> piiscrub::domain::Result<()> {
//! let recognizer = Arc::new(RegexRecognizer::new()?);
//! let annotator = Annotator::new(recognizer, &AnnotatorConfig::default())?;
//!
//! let annotations = annotator.annotate_sync("Mail jane@example.com");
//! assert_eq!(annotations.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use super::chunker::{truncate_chars, Chunker, TextChunk};
use super::config::{AnnotatorConfig, OffsetMode};
use super::recognizer::{RecognizedEntity, Recognizer};
use crate::domain::{AnnotatedText, AnnotationResult, PiiError, RecognitionMetadata, Result};
use futures::stream::{self, StreamExt};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Drives a recognizer across the chunks of one or many documents
pub struct Annotator {
    recognizer: Arc<dyn Recognizer>,
    chunker: Chunker,
    max_input_length: usize,
    max_concurrency: usize,
    offset_mode: OffsetMode,
    score_threshold: Option<f32>,
}

impl Annotator {
    /// Create a new annotator
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::InvalidConfiguration`] if the configuration fails
    /// validation (for example a zero chunk length).
    pub fn new(recognizer: Arc<dyn Recognizer>, config: &AnnotatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            recognizer,
            chunker: Chunker::new(config.chunk_length)?,
            max_input_length: config.max_input_length,
            max_concurrency: config.max_concurrency,
            offset_mode: config.offset_mode,
            score_threshold: config.score_threshold,
        })
    }

    /// Name of the underlying recognizer
    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    /// Offset reporting mode
    pub fn offset_mode(&self) -> OffsetMode {
        self.offset_mode
    }

    /// Upper bound on in-flight recognizer calls per gather
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Annotate a single text, sequentially over its chunks
    pub fn annotate_sync(&self, text: &str) -> Vec<AnnotationResult> {
        if text.is_empty() {
            return Vec::new();
        }

        let bounded = self.bounded(text);
        let chunks = self.chunker.chunks(bounded);
        let per_chunk: Vec<Vec<AnnotationResult>> = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let outcome = recognize_contained(self.recognizer.as_ref(), chunk.text);
                self.collect_chunk(outcome, index, chunk.offset, chunk.char_len)
            })
            .collect();

        combine_annotations(per_chunk)
    }

    /// Annotate a single text, dispatching its chunks concurrently
    ///
    /// Recognizer calls run on the blocking thread pool; results are gathered
    /// in chunk order.
    pub async fn annotate(&self, text: &str) -> Vec<AnnotationResult> {
        if text.is_empty() {
            return Vec::new();
        }

        let bounded = self.bounded(text);
        let chunks: Vec<OwnedChunk> = self
            .chunker
            .chunks(bounded)
            .iter()
            .map(OwnedChunk::from)
            .collect();

        let per_chunk: Vec<Vec<AnnotationResult>> = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, chunk)| {
                let recognizer = Arc::clone(&self.recognizer);
                async move {
                    let offset = chunk.offset;
                    let char_len = chunk.char_len;
                    let outcome =
                        tokio::task::spawn_blocking(move || recognizer.recognize(&chunk.text))
                            .await
                            .unwrap_or_else(|e| {
                                Err(PiiError::RecognitionFailure(format!(
                                    "recognizer task failed: {e}"
                                )))
                            });
                    self.collect_chunk(outcome, index, offset, char_len)
                }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        combine_annotations(per_chunk)
    }

    /// Annotate a batch sequentially, preserving input order
    pub fn batch_annotate_sync(&self, texts: &[String]) -> Vec<AnnotatedText> {
        let start = Instant::now();
        let results: Vec<AnnotatedText> = texts
            .iter()
            .map(|text| AnnotatedText::new(text.clone(), self.annotate_sync(text)))
            .collect();

        tracing::debug!(
            texts = texts.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch annotation completed"
        );
        results
    }

    /// Annotate a batch concurrently, preserving input order
    ///
    /// Every text is annotated independently; completion order does not
    /// affect the order of the returned results.
    pub async fn batch_annotate(&self, texts: &[String]) -> Vec<AnnotatedText> {
        let start = Instant::now();
        let results: Vec<AnnotatedText> = stream::iter(texts.iter())
            .map(|text| async move { AnnotatedText::new(text.clone(), self.annotate(text).await) })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        tracing::debug!(
            texts = texts.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Concurrent batch annotation completed"
        );
        results
    }

    /// Apply the maximal input length
    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        let bounded = truncate_chars(text, self.max_input_length);
        if bounded.len() < text.len() {
            tracing::debug!(
                max_input_length = self.max_input_length,
                "Input truncated before recognition"
            );
        }
        bounded
    }

    /// Turn one chunk's recognizer outcome into annotations
    fn collect_chunk(
        &self,
        outcome: Result<Vec<RecognizedEntity>>,
        chunk_index: usize,
        chunk_offset: usize,
        chunk_len: usize,
    ) -> Vec<AnnotationResult> {
        let entities = match outcome {
            Ok(entities) => entities,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    chunk_index,
                    recognizer = self.recognizer.name(),
                    "Error processing text for PII annotations"
                );
                return Vec::new();
            }
        };

        let shift = match self.offset_mode {
            OffsetMode::Document => chunk_offset,
            OffsetMode::Chunk => 0,
        };

        entities
            .into_iter()
            .filter(|entity| {
                let in_bounds = entity.start < entity.end && entity.end <= chunk_len;
                if !in_bounds {
                    tracing::warn!(
                        start = entity.start,
                        end = entity.end,
                        chunk_len,
                        chunk_index,
                        "Dropping recognizer span outside its chunk"
                    );
                }
                in_bounds
            })
            .map(|entity| {
                AnnotationResult::new(entity.start, entity.end, entity.score, &entity.label)
                    .with_metadata(RecognitionMetadata::from_recognizer(self.recognizer.name()))
                    .shifted(shift)
            })
            .filter(|annotation| {
                self.score_threshold
                    .map_or(true, |threshold| annotation.score >= threshold)
            })
            .collect()
    }
}

/// Chunk copied out of the document for a blocking task
struct OwnedChunk {
    text: String,
    offset: usize,
    char_len: usize,
}

impl From<&TextChunk<'_>> for OwnedChunk {
    fn from(chunk: &TextChunk<'_>) -> Self {
        Self {
            text: chunk.text.to_string(),
            offset: chunk.offset,
            char_len: chunk.char_len,
        }
    }
}

/// Run the recognizer on the calling thread, turning a panic into an error
fn recognize_contained(recognizer: &dyn Recognizer, text: &str) -> Result<Vec<RecognizedEntity>> {
    panic::catch_unwind(AssertUnwindSafe(|| recognizer.recognize(text))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(PiiError::RecognitionFailure(format!("recognizer panicked: {message}")))
    })
}

/// Concatenate per-chunk annotations in chunk order
fn combine_annotations(per_chunk: Vec<Vec<AnnotationResult>>) -> Vec<AnnotationResult> {
    per_chunk.into_iter().flatten().collect()
}
