//! Text and OCR pipelines
//!
//! A [`Pipeline`] combines an [`Annotator`] and an [`Anonymizer`] and runs the
//! selected [`OperationType`]s over a batch of texts, or over a batch of
//! sources handed to a [`TextExtractor`] first.
//!
//! Every unit of a batch is isolated: an extraction failure or an
//! anonymization error is recorded on that unit's outcome and the rest of
//! the batch proceeds.

pub mod extractor;

pub use extractor::{FileTextExtractor, TextExtractor};

use crate::annotation::{Annotator, OffsetMode};
use crate::anonymization::Anonymizer;
use crate::domain::{AnnotatedText, AnnotationResult, AnonymizationResult, PiiError, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Operations a pipeline can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Detect PII spans
    AnnotatePii,
    /// Extract text from sources
    ExtractText,
    /// Detect PII spans, then anonymize them
    AnonymizePii,
}

impl OperationType {
    /// Configuration name of the operation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnnotatePii => "annotate_pii",
            Self::ExtractText => "extract_text",
            Self::AnonymizePii => "anonymize_pii",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "annotate_pii" => Ok(Self::AnnotatePii),
            "extract_text" => Ok(Self::ExtractText),
            "anonymize_pii" => Ok(Self::AnonymizePii),
            _ => Err(PiiError::InvalidConfiguration(format!(
                "Unknown operation: {s}"
            ))),
        }
    }
}

/// Result of running the text operations over one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOutcome {
    /// Input text
    pub text: String,
    /// Detected spans, when annotation ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<AnnotationResult>>,
    /// Anonymized text and replacement records, when anonymization ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymized: Option<AnonymizationResult>,
    /// Per-text failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TextOutcome {
    fn unprocessed(text: String) -> Self {
        Self {
            text,
            annotations: None,
            anonymized: None,
            error: None,
        }
    }
}

/// Result of one OCR source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageOutcome {
    /// Text was extracted (and processed when text operations are selected)
    Processed {
        /// Source identifier
        source: String,
        /// Text operations outcome
        result: TextOutcome,
    },
    /// Extraction failed
    Failed {
        /// Source identifier
        source: String,
        /// Error message
        error: String,
    },
}

impl ImageOutcome {
    /// Source identifier
    pub fn source(&self) -> &str {
        match self {
            Self::Processed { source, .. } | Self::Failed { source, .. } => source,
        }
    }

    /// Whether extraction failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// One pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun<T> {
    /// Unique run identifier
    pub run_id: Uuid,
    /// Run start time
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration
    pub duration_ms: u64,
    /// One outcome per input, in input order
    pub outcomes: Vec<T>,
}

/// Annotation and anonymization pipeline
pub struct Pipeline {
    annotator: Arc<Annotator>,
    anonymizer: Anonymizer,
    operations: Vec<OperationType>,
}

impl Pipeline {
    /// Create a pipeline performing [`OperationType::AnnotatePii`]
    pub fn new(annotator: Arc<Annotator>, anonymizer: Anonymizer) -> Self {
        Self {
            annotator,
            anonymizer,
            operations: vec![OperationType::AnnotatePii],
        }
    }

    /// Replace the selected operations
    pub fn with_operations(mut self, operations: Vec<OperationType>) -> Self {
        self.operations = operations;
        self
    }

    /// Selected operations
    pub fn operations(&self) -> &[OperationType] {
        &self.operations
    }

    /// Check that the selected operations fit the annotator
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::InvalidConfiguration`] when [`OperationType::AnonymizePii`]
    /// is selected with an annotator reporting chunk-relative offsets. Those
    /// spans do not index the document and would anonymize the wrong text.
    pub fn validate(&self) -> Result<()> {
        if self.anonymizes() && self.annotator.offset_mode() == OffsetMode::Chunk {
            return Err(PiiError::InvalidConfiguration(
                "anonymize_pii requires annotator.offset_mode = \"document\"".to_string(),
            ));
        }
        Ok(())
    }

    fn annotates(&self) -> bool {
        self.operations.contains(&OperationType::AnnotatePii) || self.anonymizes()
    }

    fn anonymizes(&self) -> bool {
        self.operations.contains(&OperationType::AnonymizePii)
    }

    /// Run the text operations over `texts`, annotating concurrently
    pub async fn run_text_pipeline(&self, texts: &[String]) -> PipelineRun<TextOutcome> {
        let run = RunClock::start("text", texts.len());

        let outcomes = if self.annotates() {
            let batch = self.annotator.batch_annotate(texts).await;
            batch.into_iter().map(|item| self.finish(item)).collect()
        } else {
            tracing::info!(run_id = %run.run_id, "No annotation operation selected; returning texts unchanged");
            texts.iter().cloned().map(TextOutcome::unprocessed).collect()
        };

        run.finish(outcomes)
    }

    /// Run the text operations over `texts` sequentially
    pub fn run_text_pipeline_sync(&self, texts: &[String]) -> PipelineRun<TextOutcome> {
        let run = RunClock::start("text_sync", texts.len());

        let outcomes = if self.annotates() {
            let batch = self.annotator.batch_annotate_sync(texts);
            batch.into_iter().map(|item| self.finish(item)).collect()
        } else {
            tracing::info!(run_id = %run.run_id, "No annotation operation selected; returning texts unchanged");
            texts.iter().cloned().map(TextOutcome::unprocessed).collect()
        };

        run.finish(outcomes)
    }

    /// Extract text from every source, then run the text operations on it
    ///
    /// Sources are processed concurrently and reported in input order. A
    /// failed extraction yields [`ImageOutcome::Failed`] for that source only.
    pub async fn run_ocr_pipeline(
        &self,
        extractor: &dyn TextExtractor,
        sources: &[String],
    ) -> PipelineRun<ImageOutcome> {
        let run = RunClock::start("ocr", sources.len());

        let outcomes: Vec<ImageOutcome> = stream::iter(sources.iter())
            .map(|source| async move {
                match extractor.extract_text(source).await {
                    Ok(text) => ImageOutcome::Processed {
                        source: source.clone(),
                        result: self.process_text(text).await,
                    },
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            source = %source,
                            extractor = extractor.name(),
                            "Text extraction failed"
                        );
                        ImageOutcome::Failed {
                            source: source.clone(),
                            error: e.to_string(),
                        }
                    }
                }
            })
            .buffered(self.annotator.max_concurrency())
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        if failed > 0 {
            tracing::warn!(run_id = %run.run_id, failed, "Some sources could not be extracted");
        }

        run.finish(outcomes)
    }

    async fn process_text(&self, text: String) -> TextOutcome {
        if !self.annotates() {
            return TextOutcome::unprocessed(text);
        }
        let annotations = self.annotator.annotate(&text).await;
        self.finish(AnnotatedText::new(text, annotations))
    }

    /// Attach the anonymization step to an annotated text
    fn finish(&self, item: AnnotatedText) -> TextOutcome {
        let mut outcome = TextOutcome {
            text: item.text,
            annotations: None,
            anonymized: None,
            error: None,
        };

        if self.anonymizes() {
            let result = self
                .validate()
                .and_then(|()| self.anonymizer.anonymize(&outcome.text, &item.annotations));
            match result {
                Ok(result) => outcome.anonymized = Some(result),
                Err(e) => {
                    tracing::error!(error = %e, "Anonymization failed for text");
                    outcome.error = Some(e.to_string());
                }
            }
        }
        outcome.annotations = Some(item.annotations);

        outcome
    }
}

/// Run identity and timing
struct RunClock {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    start: Instant,
    kind: &'static str,
}

impl RunClock {
    fn start(kind: &'static str, inputs: usize) -> Self {
        let run_id = Uuid::new_v4();
        tracing::info!(run_id = %run_id, kind, inputs, "Starting pipeline");
        Self {
            run_id,
            started_at: Utc::now(),
            start: Instant::now(),
            kind,
        }
    }

    fn finish<T>(self, outcomes: Vec<T>) -> PipelineRun<T> {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(
            run_id = %self.run_id,
            kind = self.kind,
            outcomes = outcomes.len(),
            duration_ms,
            "Pipeline completed"
        );
        PipelineRun {
            run_id: self.run_id,
            started_at: self.started_at,
            duration_ms,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotatorConfig, RecognizedEntity, Recognizer};
    use crate::anonymization::AnonymizerType;
    use async_trait::async_trait;
    use test_case::test_case;

    /// Tags every occurrence of "Bob"
    struct BobRecognizer;

    impl Recognizer for BobRecognizer {
        fn name(&self) -> &str {
            "bob"
        }

        fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
            Ok(text
                .match_indices("Bob")
                .map(|(i, _)| {
                    let start = text[..i].chars().count();
                    RecognizedEntity::new(start, start + 3, "PERSON", 0.9)
                })
                .collect())
        }
    }

    /// Extracts the source name itself, failing on names starting with "bad"
    struct EchoExtractor;

    #[async_trait]
    impl TextExtractor for EchoExtractor {
        fn name(&self) -> &str {
            "echo"
        }

        async fn extract_text(&self, source: &str) -> Result<String> {
            if source.starts_with("bad") {
                return Err(PiiError::Extraction(format!("unreadable image: {source}")));
            }
            Ok(format!("scan of {source}"))
        }
    }

    fn pipeline(operations: Vec<OperationType>) -> Pipeline {
        let annotator =
            Annotator::new(Arc::new(BobRecognizer), &AnnotatorConfig::default()).unwrap();
        Pipeline::new(Arc::new(annotator), Anonymizer::new(AnonymizerType::Replace))
            .with_operations(operations)
    }

    fn texts() -> Vec<String> {
        vec!["Hi Bob".to_string(), "nobody".to_string()]
    }

    #[test_case("annotate_pii", OperationType::AnnotatePii)]
    #[test_case("EXTRACT_TEXT", OperationType::ExtractText)]
    #[test_case("anonymize_pii", OperationType::AnonymizePii)]
    fn test_parse_operation(name: &str, expected: OperationType) {
        assert_eq!(name.parse::<OperationType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_operation() {
        assert!("redact_pii_everywhere".parse::<OperationType>().is_err());
    }

    #[test]
    fn test_default_operation_is_annotate() {
        let annotator =
            Annotator::new(Arc::new(BobRecognizer), &AnnotatorConfig::default()).unwrap();
        let pipeline = Pipeline::new(Arc::new(annotator), Anonymizer::default());
        assert_eq!(pipeline.operations(), &[OperationType::AnnotatePii]);
    }

    #[test]
    fn test_sync_annotate_only() {
        let run = pipeline(vec![OperationType::AnnotatePii]).run_text_pipeline_sync(&texts());

        assert_eq!(run.outcomes.len(), 2);
        assert_eq!(run.outcomes[0].annotations.as_ref().unwrap().len(), 1);
        assert!(run.outcomes[0].anonymized.is_none());
        assert!(run.outcomes[1].annotations.as_ref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_anonymize_implies_annotation() {
        let run = pipeline(vec![OperationType::AnonymizePii])
            .run_text_pipeline(&texts())
            .await;

        let first = &run.outcomes[0];
        assert_eq!(first.annotations.as_ref().unwrap().len(), 1);
        assert_eq!(
            first.anonymized.as_ref().unwrap().anonymized_text,
            "Hi [PERSON_0]"
        );
        assert_eq!(
            run.outcomes[1].anonymized.as_ref().unwrap().anonymized_text,
            "nobody"
        );
    }

    #[tokio::test]
    async fn test_no_text_operation_returns_texts() {
        let run = pipeline(vec![OperationType::ExtractText])
            .run_text_pipeline(&texts())
            .await;

        assert_eq!(run.outcomes[0], TextOutcome::unprocessed("Hi Bob".to_string()));
        assert!(run.outcomes.iter().all(|o| o.annotations.is_none()));
    }

    #[tokio::test]
    async fn test_ocr_failures_are_isolated() {
        let sources = vec![
            "good-1.png".to_string(),
            "bad-2.png".to_string(),
            "Bob.png".to_string(),
        ];
        let run = pipeline(vec![OperationType::ExtractText, OperationType::AnnotatePii])
            .run_ocr_pipeline(&EchoExtractor, &sources)
            .await;

        assert_eq!(run.outcomes.len(), 3);
        assert!(!run.outcomes[0].is_failed());
        assert!(run.outcomes[1].is_failed());
        assert_eq!(run.outcomes[1].source(), "bad-2.png");

        match &run.outcomes[2] {
            ImageOutcome::Processed { result, .. } => {
                assert_eq!(result.text, "scan of Bob.png");
                assert_eq!(result.annotations.as_ref().unwrap()[0].start, 8);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ocr_extract_only() {
        let sources = vec!["Bob.png".to_string()];
        let run = pipeline(vec![OperationType::ExtractText])
            .run_ocr_pipeline(&EchoExtractor, &sources)
            .await;

        match &run.outcomes[0] {
            ImageOutcome::Processed { result, .. } => assert!(result.annotations.is_none()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    fn chunk_mode_pipeline(operations: Vec<OperationType>) -> Pipeline {
        let config = AnnotatorConfig {
            chunk_length: 4,
            offset_mode: OffsetMode::Chunk,
            ..AnnotatorConfig::default()
        };
        let annotator = Annotator::new(Arc::new(BobRecognizer), &config).unwrap();
        Pipeline::new(Arc::new(annotator), Anonymizer::new(AnonymizerType::Redact))
            .with_operations(operations)
    }

    #[test]
    fn test_chunk_offsets_rejected_for_anonymization() {
        let pipeline = chunk_mode_pipeline(vec![OperationType::AnonymizePii]);
        assert!(matches!(
            pipeline.validate(),
            Err(PiiError::InvalidConfiguration(_))
        ));
        assert!(chunk_mode_pipeline(vec![OperationType::AnnotatePii])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_chunk_offsets_never_anonymize_wrong_text() {
        // "Bob" sits in the second chunk; its chunk-local span is [0, 3)
        let texts = vec!["HeyaBob!".to_string()];
        let run = chunk_mode_pipeline(vec![OperationType::AnonymizePii])
            .run_text_pipeline_sync(&texts);

        let outcome = &run.outcomes[0];
        assert_eq!(outcome.annotations.as_ref().unwrap()[0].start, 0);
        assert!(outcome.anonymized.is_none());
        assert!(outcome.error.as_deref().unwrap().contains("offset_mode"));
    }

    #[test]
    fn test_failed_outcome_serialization() {
        let outcome = ImageOutcome::Failed {
            source: "a.png".to_string(),
            error: "Extraction error: timeout".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["source"], "a.png");
    }
}
