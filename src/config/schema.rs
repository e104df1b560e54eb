//! Configuration schema definitions
//!
//! Every section has defaults, so an empty file (or no file at all) is a
//! valid configuration.

use crate::annotation::{AnnotatorConfig, RecognizerConfig};
use crate::anonymization::AnonymizerConfig;
use crate::domain::{PiiError, Result};
use serde::{Deserialize, Serialize};

/// Accepted log levels
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted local log rotation strategies
pub const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PiiConfig {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Chunking, truncation and concurrency of annotation
    #[serde(default)]
    pub annotator: AnnotatorConfig,

    /// Built-in regex recognizer
    #[serde(default)]
    pub recognizer: RecognizerConfig,

    /// Strategy, hash algorithm and entity allow-list
    #[serde(default)]
    pub anonymizer: AnonymizerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PiiConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns the first failing section's error. Unknown strategy and hash
    /// names keep their dedicated variants.
    pub fn validate(&self) -> Result<()> {
        self.application.validate()?;
        self.annotator.validate()?;
        self.recognizer.validate()?;
        self.anonymizer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(PiiError::InvalidConfiguration(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if !VALID_ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(PiiError::InvalidConfiguration(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                VALID_ROTATIONS.join(", ")
            )));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(PiiError::InvalidConfiguration(
                "logging.local_path must be set when local logging is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
