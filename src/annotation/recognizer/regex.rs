//! Regex-based entity recognizer

use super::{patterns::PatternRegistry, RecognizedEntity, Recognizer};
use crate::annotation::config::RecognizerConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Recognizer backed by a [`PatternRegistry`]
pub struct RegexRecognizer {
    pattern_registry: Arc<PatternRegistry>,
    confidence_threshold: f32,
}

impl RegexRecognizer {
    /// Create a new regex recognizer with the built-in patterns
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new regex recognizer with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
            confidence_threshold: RecognizerConfig::default().confidence_threshold,
        }
    }

    /// Build from configuration, loading a custom library when one is set
    pub fn from_config(config: &RecognizerConfig) -> Result<Self> {
        let registry = match config.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path)?,
            None => PatternRegistry::default_patterns()?,
        };
        Ok(Self::with_registry(registry).with_confidence_threshold(config.confidence_threshold))
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Get the confidence threshold
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}

impl Recognizer for RegexRecognizer {
    fn name(&self) -> &str {
        "regex"
    }

    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>> {
        let offsets = CharOffsets::new(text);
        let mut entities = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            if pattern.confidence < self.confidence_threshold {
                continue;
            }

            for matched in pattern.regex.find_iter(text) {
                if matched.is_empty() {
                    continue;
                }
                entities.push(RecognizedEntity::new(
                    offsets.char_at(matched.start()),
                    offsets.char_at(matched.end()),
                    pattern.entity_type.label(),
                    pattern.confidence,
                ));
            }
        }

        entities.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        Ok(entities)
    }
}

/// Byte offset to character offset lookup
struct CharOffsets {
    byte_starts: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        Self {
            byte_starts: text.char_indices().map(|(idx, _)| idx).collect(),
        }
    }

    /// Character index of a byte offset that lies on a char boundary
    fn char_at(&self, byte: usize) -> usize {
        match self.byte_starts.binary_search(&byte) {
            Ok(idx) | Err(idx) => idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityType;

    fn labels(entities: &[RecognizedEntity]) -> Vec<EntityType> {
        entities
            .iter()
            .map(|e| EntityType::normalize(&e.label))
            .collect()
    }

    #[test]
    fn test_detect_email() {
        let recognizer = RegexRecognizer::new().unwrap();
        let text = "Contact: john.doe@example.com";
        let entities = recognizer.recognize(text).unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, "EMAIL");
        assert_eq!((entities[0].start, entities[0].end), (9, 29));
    }

    #[test]
    fn test_detect_phone_and_card() {
        let recognizer = RegexRecognizer::new().unwrap();
        let entities = recognizer
            .recognize("Call (555) 123-4567, card 4111-1111-1111-1111")
            .unwrap();

        let found = labels(&entities);
        assert!(found.contains(&EntityType::PhoneNumber));
        assert!(found.contains(&EntityType::CreditCard));
    }

    #[test]
    fn test_detect_dates() {
        let recognizer = RegexRecognizer::new().unwrap();
        let entities = recognizer
            .recognize("Admitted 2024-03-15, discharged March 18, 2024")
            .unwrap();

        assert_eq!(
            labels(&entities),
            vec![EntityType::Date, EntityType::Date]
        );
    }

    #[test]
    fn test_offsets_are_characters() {
        let recognizer = RegexRecognizer::new().unwrap();
        // Each accented letter is two bytes in UTF-8
        let text = "José Müller: jm@example.org";
        let entities = recognizer.recognize(text).unwrap();

        assert_eq!(entities.len(), 1);
        let span: String = text
            .chars()
            .skip(entities[0].start)
            .take(entities[0].end - entities[0].start)
            .collect();
        assert_eq!(span, "jm@example.org");
    }

    #[test]
    fn test_confidence_threshold_filters_numbers() {
        let text = "Room 42";
        let default = RegexRecognizer::new().unwrap();
        assert!(default.recognize(text).unwrap().is_empty());

        let permissive = RegexRecognizer::new()
            .unwrap()
            .with_confidence_threshold(0.1);
        let entities = permissive.recognize(text).unwrap();
        assert_eq!(labels(&entities), vec![EntityType::Number]);
    }

    #[test]
    fn test_results_are_ordered() {
        let recognizer = RegexRecognizer::new().unwrap();
        let entities = recognizer
            .recognize("b@example.com then 555-123-4567 then a@example.com")
            .unwrap();

        let starts: Vec<usize> = entities.iter().map(|e| e.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }
}
