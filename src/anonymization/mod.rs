//! Anonymization module
//!
//! This module transforms text using the PII spans produced by the
//! annotator. It supports three strategies:
//! - **Redact**: fixed `[REDACTED]` placeholder
//! - **Replace**: numbered `[LABEL_n]` placeholders
//! - **Hash**: length-matched hex digest of the original span (md5, sha256, sha3_256)
//!
//! # Usage
//!
//! ```rust
//! use piiscrub::anonymization::{Anonymizer, AnonymizerConfig};
//! use piiscrub::domain::AnnotationResult;
//!
//! # fn example() -> piiscrub::domain::Result<()> {
//! let anonymizer = Anonymizer::from_config(&AnonymizerConfig::default())?;
//! let spans = vec![AnnotationResult::new(6, 9, 0.9, "PERSON")];
//! let result = anonymizer.anonymize("Hello Bob", &spans)?;
//! assert_eq!(result.anonymized_text, "Hello [REDACTED]");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod strategies;

pub use config::{AnonymizerConfig, AnonymizerType, HashType, OffsetPolicy};
pub use engine::Anonymizer;
pub use strategies::{HashStrategy, PlaceholderStrategy, RedactionStrategy, Strategy};
