//! PII annotation
//!
//! This module detects PII spans in free text. It consists of:
//! - **Chunking**: fixed-length, character-based splitting of long documents
//! - **Recognition**: the [`Recognizer`] seam plus a pattern-based [`RegexRecognizer`]
//! - **Annotation**: the [`Annotator`], which drives a recognizer over chunks
//!   and batches, sequentially or concurrently
//!
//! # Usage
//!
//! ```rust
//! use piiscrub::annotation::{Annotator, AnnotatorConfig, RegexRecognizer};
//! use std::sync::Arc;
//!
//! # async fn example() -> piiscrub::domain::Result<()> {
//! let annotator = Annotator::new(
//!     Arc::new(RegexRecognizer::new()?),
//!     &AnnotatorConfig::default(),
//! )?;
//!
//! let texts = vec!["call 555-123-4567".to_string(), "no pii here".to_string()];
//! let batch = annotator.batch_annotate(&texts).await;
//! assert_eq!(batch.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod annotator;
pub mod chunker;
pub mod config;
pub mod recognizer;

pub use annotator::Annotator;
pub use chunker::{chunk, Chunker, TextChunk};
pub use config::{AnnotatorConfig, OffsetMode, RecognizerConfig};
pub use recognizer::{PatternRegistry, RecognizedEntity, Recognizer, RegexRecognizer};
