//! Redaction strategy

use super::Strategy;
use crate::domain::EntityType;

/// Fixed replacement text for redacted spans
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Redaction strategy - replaces every span with [`REDACTED_PLACEHOLDER`]
#[derive(Debug, Default)]
pub struct RedactionStrategy;

impl RedactionStrategy {
    /// Create a new redaction strategy
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RedactionStrategy {
    fn name(&self) -> &'static str {
        "redact"
    }

    fn replace(&mut self, _original: &str, _entity_type: EntityType) -> String {
        REDACTED_PLACEHOLDER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction_ignores_type_and_content() {
        let mut strategy = RedactionStrategy::new();
        assert_eq!(strategy.replace("Alice", EntityType::Person), "[REDACTED]");
        assert_eq!(
            strategy.replace("a@example.com", EntityType::Email),
            "[REDACTED]"
        );
    }
}
