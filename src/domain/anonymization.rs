//! Anonymization result models

use super::entity::EntityType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single substitution performed during anonymization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacedEntity {
    /// Original substring
    pub original: String,
    /// Text written in its place
    pub replacement: String,
    /// Entity type of the span
    pub entity_type: EntityType,
}

/// Output of one anonymization pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Full transformed text
    pub anonymized_text: String,
    /// Substitutions in processing (reverse offset) order
    #[serde(default)]
    pub replaced_entities: Vec<ReplacedEntity>,
}

impl AnonymizationResult {
    /// Create a new anonymization result
    pub fn new(anonymized_text: String, replaced_entities: Vec<ReplacedEntity>) -> Self {
        Self {
            anonymized_text,
            replaced_entities,
        }
    }

    /// Number of substitutions performed
    pub fn total_replacements(&self) -> usize {
        self.replaced_entities.len()
    }

    /// Whether any substitution was performed
    pub fn has_replacements(&self) -> bool {
        !self.replaced_entities.is_empty()
    }

    /// Substitution counts per entity type
    pub fn stats_by_type(&self) -> HashMap<EntityType, usize> {
        let mut stats = HashMap::new();
        for entity in &self.replaced_entities {
            *stats.entry(entity.entity_type).or_insert(0) += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_by_type() {
        let result = AnonymizationResult::new(
            "[REDACTED] met [REDACTED] at [REDACTED]".to_string(),
            vec![
                ReplacedEntity {
                    original: "Acme".to_string(),
                    replacement: "[REDACTED]".to_string(),
                    entity_type: EntityType::Organization,
                },
                ReplacedEntity {
                    original: "Bob".to_string(),
                    replacement: "[REDACTED]".to_string(),
                    entity_type: EntityType::Person,
                },
                ReplacedEntity {
                    original: "Alice".to_string(),
                    replacement: "[REDACTED]".to_string(),
                    entity_type: EntityType::Person,
                },
            ],
        );

        let stats = result.stats_by_type();
        assert_eq!(stats.get(&EntityType::Person), Some(&2));
        assert_eq!(stats.get(&EntityType::Organization), Some(&1));
        assert_eq!(result.total_replacements(), 3);
        assert!(result.has_replacements());
    }
}
