//! Pattern library for the regex recognizer

use crate::domain::{EntityType, PiiError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Entity type label
    pub category: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// Entity type reported for matches
    pub entity_type: EntityType,
    /// Confidence score
    pub confidence: f32,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    // BTreeMap keeps compilation order stable across runs
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Registry of compiled patterns
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            return Err(PiiError::InvalidConfiguration(format!(
                "Pattern library must be a TOML file: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PiiError::InvalidConfiguration(format!(
                "Failed to read pattern library {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)?;

        let mut patterns = Vec::new();

        for (name, def) in library.patterns {
            let entity_type = Self::parse_category(&def.category).ok_or_else(|| {
                PiiError::InvalidConfiguration(format!(
                    "Invalid category in pattern '{}': {}",
                    name, def.category
                ))
            })?;

            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(PiiError::InvalidConfiguration(format!(
                    "Confidence for pattern '{}' must be between 0.0 and 1.0, got {}",
                    name, def.confidence
                )));
            }

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    PiiError::InvalidConfiguration(format!(
                        "Invalid regex in pattern '{name}': {pattern_str}: {e}"
                    ))
                })?;

                patterns.push(CompiledPattern {
                    regex,
                    entity_type,
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Create a registry with the built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Library categories must name a known type; only a literal `UNKNOWN` may map to it
    fn parse_category(s: &str) -> Option<EntityType> {
        match EntityType::normalize(s) {
            EntityType::Unknown if !s.trim().eq_ignore_ascii_case("UNKNOWN") => None,
            entity_type => Some(entity_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_patterns() {
        let registry = PatternRegistry::default_patterns().unwrap();
        assert!(!registry.all_patterns().is_empty());
    }

    fn patterns_of(registry: &PatternRegistry, entity_type: EntityType) -> Vec<&CompiledPattern> {
        registry
            .all_patterns()
            .iter()
            .filter(|p| p.entity_type == entity_type)
            .collect()
    }

    #[test]
    fn test_email_pattern() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let email_patterns = patterns_of(&registry, EntityType::Email);
        assert!(!email_patterns.is_empty());

        let pattern = &email_patterns[0];
        assert!(pattern.regex.is_match("test@example.com"));
        assert!(!pattern.regex.is_match("not-an-email"));
    }

    #[test]
    fn test_phone_pattern() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let phone_patterns = patterns_of(&registry, EntityType::PhoneNumber);

        assert!(phone_patterns
            .iter()
            .any(|p| p.regex.is_match("Call me at (555) 123-4567")));
        assert!(phone_patterns
            .iter()
            .any(|p| p.regex.is_match("Call me at 555-123-4567")));
    }

    #[test]
    fn test_invalid_category_rejected() {
        let toml = r#"
[patterns.badge]
category = "BADGE_NUMBER"
confidence = 0.9
patterns = ['B-\d{5}']
"#;
        let err = PatternRegistry::from_toml(toml).unwrap_err();
        assert!(matches!(err, PiiError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let toml = r#"
[patterns.broken]
category = "NUMBER"
confidence = 0.9
patterns = ['(\d+']
"#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_non_toml_library_rejected() {
        let err = PatternRegistry::from_file("/tmp/patterns.json").unwrap_err();
        assert!(err.to_string().contains("must be a TOML file"));
    }
}
