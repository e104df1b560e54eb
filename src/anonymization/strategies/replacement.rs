//! Placeholder replacement strategy

use super::Strategy;
use crate::domain::EntityType;

/// Replacement strategy - `[LABEL_n]` placeholders
///
/// `n` counts the replacements already made in the current call, across all
/// entity types, starting at zero. The engine feeds spans right to left, so
/// the right-most span receives `0`.
#[derive(Debug, Default)]
pub struct PlaceholderStrategy {
    issued: usize,
}

impl PlaceholderStrategy {
    /// Create a new replacement strategy
    pub fn new() -> Self {
        Self { issued: 0 }
    }
}

impl Strategy for PlaceholderStrategy {
    fn name(&self) -> &'static str {
        "replace"
    }

    fn replace(&mut self, _original: &str, entity_type: EntityType) -> String {
        let placeholder = format!("[{}_{}]", entity_type.label(), self.issued);
        self.issued += 1;
        placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_is_shared_across_types() {
        let mut strategy = PlaceholderStrategy::new();
        assert_eq!(strategy.replace("Bob", EntityType::Person), "[PERSON_0]");
        assert_eq!(strategy.replace("Paris", EntityType::Location), "[LOCATION_1]");
        assert_eq!(strategy.replace("Alice", EntityType::Person), "[PERSON_2]");
    }

    #[test]
    fn test_fresh_instance_restarts_numbering() {
        let mut first = PlaceholderStrategy::new();
        first.replace("Bob", EntityType::Person);

        let mut second = PlaceholderStrategy::new();
        assert_eq!(second.replace("Bob", EntityType::Person), "[PERSON_0]");
    }
}
