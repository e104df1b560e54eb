//! Replacement strategies
//!
//! Each strategy produces the replacement text for one span. The engine owns
//! span ordering and substitution; a strategy only sees the original text of
//! the span and its entity type.

pub mod hashing;
pub mod redaction;
pub mod replacement;

pub use hashing::HashStrategy;
pub use redaction::RedactionStrategy;
pub use replacement::PlaceholderStrategy;

use super::config::{AnonymizerType, HashType};
use crate::domain::EntityType;

/// Trait for replacement strategy implementations
///
/// Strategies may carry state across the spans of one call (see
/// [`PlaceholderStrategy`]), so a fresh instance is built per call.
pub trait Strategy: Send {
    /// Strategy name
    fn name(&self) -> &'static str;

    /// Produce the replacement for one span
    fn replace(&mut self, original: &str, entity_type: EntityType) -> String;
}

/// Build a fresh strategy instance
pub fn build_strategy(anonymizer_type: AnonymizerType, hash_type: HashType) -> Box<dyn Strategy> {
    match anonymizer_type {
        AnonymizerType::Redact => Box::new(RedactionStrategy::new()),
        AnonymizerType::Replace => Box::new(PlaceholderStrategy::new()),
        AnonymizerType::Hash => Box::new(HashStrategy::new(hash_type)),
    }
}
