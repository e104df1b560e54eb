//! Domain models and types for piiscrub.
//!
//! The domain layer provides:
//! - **Entity taxonomy** ([`EntityType`]) with lossless normalization of recognizer labels
//! - **Annotation model** ([`AnnotationResult`], [`RecognitionMetadata`])
//! - **Anonymization model** ([`AnonymizationResult`], [`ReplacedEntity`])
//! - **Error types** ([`PiiError`]) and the [`Result`] alias
//!
//! All offsets in this crate are character offsets (Unicode scalar values),
//! never byte offsets.
//!
//! ```rust
//! use piiscrub::domain::{AnnotationResult, EntityType};
//!
//! let annotation = AnnotationResult::new(0, 5, 0.8, "BOGUS");
//! assert_eq!(annotation.entity_type, EntityType::Unknown);
//! ```

pub mod annotation;
pub mod anonymization;
pub mod entity;
pub mod errors;
pub mod result;

pub use annotation::{AnnotatedText, AnnotationResult, RecognitionMetadata};
pub use anonymization::{AnonymizationResult, ReplacedEntity};
pub use entity::EntityType;
pub use errors::PiiError;
pub use result::Result;
