// piiscrub - PII detection and anonymization
// Copyright (c) 2025 piiscrub Contributors
// Licensed under the MIT License

//! # piiscrub - PII detection and anonymization
//!
//! piiscrub finds personally identifiable information in free text (and in
//! text extracted from images) and redacts, replaces or hashes it.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Chunking** long documents into bounded, order-preserving pieces
//! - **Annotating** chunks with an injected entity [`Recognizer`](annotation::Recognizer),
//!   sequentially or concurrently
//! - **Anonymizing** the detected spans with the redact, replace or hash strategy
//! - **Orchestrating** text and OCR batches with per-unit failure isolation
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`annotation`] - Chunker, recognizers and the annotator
//! - [`anonymization`] - Replacement strategies and the anonymizer
//! - [`pipeline`] - Text and OCR pipelines
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`output`] - JSON persistence of results
//!
//! ## Quick Start
//!
//! ```rust
//! use piiscrub::annotation::{Annotator, AnnotatorConfig, RegexRecognizer};
//! use piiscrub::anonymization::{Anonymizer, AnonymizerType};
//! use std::sync::Arc;
//!
//! # fn example() -> piiscrub::domain::Result<()> {
//! let annotator = Annotator::new(
//!     Arc::new(RegexRecognizer::new()?),
//!     &AnnotatorConfig::default(),
//! )?;
//!
//! let text = "Write to jane.doe@example.com";
//! let annotations = annotator.annotate_sync(text);
//!
//! let result = Anonymizer::new(AnonymizerType::Replace).anonymize(text, &annotations)?;
//! assert_eq!(result.anonymized_text, "Write to [EMAIL_0]");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Offsets
//!
//! All span offsets are character offsets, end exclusive. By default the
//! annotator reports them relative to the whole document so they can be fed
//! straight into the anonymizer.
//!
//! ## Error Handling
//!
//! The library uses [`domain::PiiError`] for all errors. Configuration and
//! strategy errors fail a call before any text is touched; recognizer and
//! extraction failures are contained per chunk or per source.

pub mod annotation;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod output;
pub mod pipeline;
