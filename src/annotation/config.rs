//! Annotator and recognizer configuration

use crate::domain::{PiiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default chunk length in characters
pub const DEFAULT_CHUNK_LENGTH: usize = 1000;

/// Default maximal input length in characters before truncation
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1_000_000;

/// How chunk-local recognizer offsets are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetMode {
    /// Shift spans by their chunk's start so they index the whole document
    #[default]
    Document,
    /// Leave spans relative to the chunk they were found in
    Chunk,
}

/// Annotator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Chunk length in characters
    #[serde(default = "default_chunk_length")]
    pub chunk_length: usize,

    /// Inputs longer than this many characters are truncated
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,

    /// Maximum concurrent recognizer invocations per gather
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Offset reporting mode
    #[serde(default)]
    pub offset_mode: OffsetMode,

    /// Drop annotations scoring below this value
    #[serde(default)]
    pub score_threshold: Option<f32>,
}

fn default_chunk_length() -> usize {
    DEFAULT_CHUNK_LENGTH
}

fn default_max_input_length() -> usize {
    DEFAULT_MAX_INPUT_LENGTH
}

fn default_max_concurrency() -> usize {
    8
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            chunk_length: default_chunk_length(),
            max_input_length: default_max_input_length(),
            max_concurrency: default_max_concurrency(),
            offset_mode: OffsetMode::default(),
            score_threshold: None,
        }
    }
}

impl AnnotatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_length == 0 {
            return Err(PiiError::InvalidConfiguration(
                "annotator.chunk_length must be positive".to_string(),
            ));
        }
        if self.max_input_length == 0 {
            return Err(PiiError::InvalidConfiguration(
                "annotator.max_input_length must be positive".to_string(),
            ));
        }
        if self.max_concurrency == 0 || self.max_concurrency > 256 {
            return Err(PiiError::InvalidConfiguration(format!(
                "annotator.max_concurrency must be between 1 and 256, got {}",
                self.max_concurrency
            )));
        }
        if let Some(threshold) = self.score_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(PiiError::InvalidConfiguration(format!(
                    "annotator.score_threshold must be between 0.0 and 1.0, got {threshold}"
                )));
            }
        }
        Ok(())
    }
}

/// Built-in regex recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Path to a pattern library TOML file, built-in patterns when unset
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Patterns below this confidence are not run
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
}

fn default_confidence_threshold() -> f32 {
    0.5
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            pattern_library: None,
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

impl RecognizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(PiiError::InvalidConfiguration(format!(
                    "Pattern library file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(PiiError::InvalidConfiguration(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(PiiError::InvalidConfiguration(format!(
                "recognizer.confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnotatorConfig::default();
        assert_eq!(config.chunk_length, 1000);
        assert_eq!(config.max_input_length, 1_000_000);
        assert_eq!(config.offset_mode, OffsetMode::Document);
        assert!(config.score_threshold.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_length_rejected() {
        let config = AnnotatorConfig {
            chunk_length: 0,
            ..AnnotatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PiiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_concurrency_bounds() {
        let mut config = AnnotatorConfig::default();
        config.max_concurrency = 0;
        assert!(config.validate().is_err());

        config.max_concurrency = 257;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_score_threshold_range() {
        let config = AnnotatorConfig {
            score_threshold: Some(1.5),
            ..AnnotatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recognizer_missing_library() {
        let config = RecognizerConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..RecognizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offset_mode_serde() {
        let config: AnnotatorConfig = toml::from_str("offset_mode = \"chunk\"").unwrap();
        assert_eq!(config.offset_mode, OffsetMode::Chunk);
        assert_eq!(config.chunk_length, DEFAULT_CHUNK_LENGTH);
    }
}
