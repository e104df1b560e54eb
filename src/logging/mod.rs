//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - JSON-formatted file logs with rotation
//! - Configurable log levels, overridable through `RUST_LOG`
//!
//! Log events carry counts, offsets and entity types. Span text is never
//! logged.
//!
//! # Example
//!
//! ```no_run
//! use piiscrub::logging::init_logging;
//! use piiscrub::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(texts = 3, "Batch started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};
