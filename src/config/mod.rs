//! Configuration management for piiscrub.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! piiscrub uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PIISCRUB_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation before any text is processed
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnnotatorConfig`](crate::annotation::AnnotatorConfig) - Chunking, truncation, concurrency
//! - [`RecognizerConfig`](crate::annotation::RecognizerConfig) - Built-in pattern recognizer
//! - [`AnonymizerConfig`](crate::anonymization::AnonymizerConfig) - Strategy, hash type, allow-list
//! - [`LoggingConfig`] - File logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [annotator]
//! chunk_length = 1000
//! max_input_length = 1000000
//!
//! [recognizer]
//! pattern_library = "${PIISCRUB_PATTERNS}"
//!
//! [anonymizer]
//! strategy = "hash"
//! hash_type = "sha256"
//! entities = ["EMAIL", "PHONE_NUMBER"]
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use piiscrub::config::load_config;
//!
//! match load_config("piiscrub.toml") {
//!     Ok(config) => println!("Configuration valid: {}", config.anonymizer.strategy),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, PiiConfig};
