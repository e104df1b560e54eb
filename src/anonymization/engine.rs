//! Main anonymization engine
//!
//! This module provides the [`Anonymizer`], which applies one replacement
//! strategy to the annotated spans of a text.
//!
//! # Processing
//!
//! - **Filter**: spans whose type is outside a non-empty allow-list are skipped
//! - **Validate**: out-of-range spans are rejected or skipped per [`OffsetPolicy`]
//! - **Sweep**: spans are visited by descending start offset; placeholder
//!   numbering and the order of the replacement records follow this sweep
//! - **Splice**: the output is built in one left-to-right pass over the
//!   accepted, non-overlapping spans
//!
//! # Examples
//!
//! ```
//! use piiscrub::anonymization::{Anonymizer, AnonymizerType};
//! use piiscrub::domain::AnnotationResult;
//!
//! # fn example() -> piiscrub::domain::Result<()> {
//! let spans = vec![
//!     AnnotationResult::new(0, 5, 0.9, "PERSON"),
//!     AnnotationResult::new(10, 13, 0.9, "PERSON"),
//! ];
//!
//! let anonymizer = Anonymizer::new(AnonymizerType::Replace);
//! let result = anonymizer.anonymize("Alice met Bob", &spans)?;
//! assert_eq!(result.anonymized_text, "[PERSON_1] met [PERSON_0]");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use super::config::{AnonymizerConfig, AnonymizerType, HashType, OffsetPolicy};
use super::strategies::{build_strategy, Strategy};
use crate::domain::{AnnotationResult, AnonymizationResult, EntityType, ReplacedEntity, Result};

/// Strategy-driven text anonymizer
///
/// The anonymizer holds no per-call state and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Anonymizer {
    anonymizer_type: AnonymizerType,
    entities: Vec<EntityType>,
    hash_type: HashType,
    offset_policy: OffsetPolicy,
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self::new(AnonymizerType::default())
    }
}

impl Anonymizer {
    /// Create an anonymizer for `anonymizer_type` with no allow-list
    pub fn new(anonymizer_type: AnonymizerType) -> Self {
        Self {
            anonymizer_type,
            entities: Vec::new(),
            hash_type: HashType::default(),
            offset_policy: OffsetPolicy::default(),
        }
    }

    /// Restrict anonymization to `entities`; empty means every type
    pub fn with_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.entities = entities;
        self
    }

    /// Select the hash algorithm used by the hash strategy
    pub fn with_hash_type(mut self, hash_type: HashType) -> Self {
        self.hash_type = hash_type;
        self
    }

    /// Select the out-of-range span policy
    pub fn with_offset_policy(mut self, offset_policy: OffsetPolicy) -> Self {
        self.offset_policy = offset_policy;
        self
    }

    /// Build an anonymizer from configuration
    ///
    /// # Errors
    ///
    /// Fails with [`PiiError::UnsupportedStrategy`](crate::domain::PiiError::UnsupportedStrategy),
    /// [`PiiError::UnsupportedHashAlgorithm`](crate::domain::PiiError::UnsupportedHashAlgorithm)
    /// or [`PiiError::InvalidConfiguration`](crate::domain::PiiError::InvalidConfiguration)
    /// before any text is seen.
    pub fn from_config(config: &AnonymizerConfig) -> Result<Self> {
        Ok(Self::new(config.anonymizer_type()?)
            .with_hash_type(config.hash_algorithm()?)
            .with_entities(config.entity_types()?)
            .with_offset_policy(config.offset_policy))
    }

    /// Build an anonymizer from strategy and hash algorithm names
    pub fn from_names(strategy: &str, hash_type: &str) -> Result<Self> {
        Ok(Self::new(strategy.parse()?).with_hash_type(hash_type.parse()?))
    }

    /// Configured strategy
    pub fn anonymizer_type(&self) -> AnonymizerType {
        self.anonymizer_type
    }

    /// Configured hash algorithm
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Configured allow-list
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    /// Anonymize `text` with the configured strategy
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::OffsetOutOfRange`](crate::domain::PiiError::OffsetOutOfRange)
    /// under [`OffsetPolicy::Reject`] when a span does not lie within `text`.
    /// No substitution is made in that case.
    pub fn anonymize(
        &self,
        text: &str,
        annotations: &[AnnotationResult],
    ) -> Result<AnonymizationResult> {
        self.run(self.anonymizer_type, text, annotations)
    }

    /// Anonymize with the redact strategy
    pub fn redact_pii(
        &self,
        text: &str,
        annotations: &[AnnotationResult],
    ) -> Result<AnonymizationResult> {
        self.run(AnonymizerType::Redact, text, annotations)
    }

    /// Anonymize with the replace strategy
    pub fn replace_pii(
        &self,
        text: &str,
        annotations: &[AnnotationResult],
    ) -> Result<AnonymizationResult> {
        self.run(AnonymizerType::Replace, text, annotations)
    }

    /// Anonymize with the hash strategy
    pub fn hash_pii(
        &self,
        text: &str,
        annotations: &[AnnotationResult],
    ) -> Result<AnonymizationResult> {
        self.run(AnonymizerType::Hash, text, annotations)
    }

    fn run(
        &self,
        anonymizer_type: AnonymizerType,
        text: &str,
        annotations: &[AnnotationResult],
    ) -> Result<AnonymizationResult> {
        let index = CharIndex::new(text);
        let spans = self.admissible_spans(annotations, index.char_len())?;

        let mut strategy = build_strategy(anonymizer_type, self.hash_type);
        let (accepted, replaced_entities) = sweep(spans, &index, strategy.as_mut());
        let anonymized_text = splice(text, &index, &accepted);

        tracing::debug!(
            strategy = strategy.name(),
            spans = annotations.len(),
            replacements = replaced_entities.len(),
            "Anonymization completed"
        );

        Ok(AnonymizationResult::new(anonymized_text, replaced_entities))
    }

    /// Apply the allow-list and offset policy, then order spans for the sweep
    fn admissible_spans<'a>(
        &self,
        annotations: &'a [AnnotationResult],
        text_len: usize,
    ) -> Result<Vec<&'a AnnotationResult>> {
        let mut spans = Vec::with_capacity(annotations.len());

        for annotation in annotations {
            if !self.entities.is_empty() && !self.entities.contains(&annotation.entity_type) {
                continue;
            }

            if let Err(e) = annotation.validate_bounds(text_len) {
                match self.offset_policy {
                    OffsetPolicy::Reject => return Err(e),
                    OffsetPolicy::Skip => {
                        tracing::warn!(
                            start = annotation.start,
                            end = annotation.end,
                            text_len,
                            entity_type = %annotation.entity_type,
                            "Skipping span outside text"
                        );
                        continue;
                    }
                }
            }

            spans.push(annotation);
        }

        // Stable: ties keep their input order
        spans.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(spans)
    }
}

/// Accepted span with its replacement
struct Substitution {
    start: usize,
    end: usize,
    replacement: String,
}

/// Visit spans right to left, skipping any that overlap an accepted span
fn sweep(
    spans: Vec<&AnnotationResult>,
    index: &CharIndex,
    strategy: &mut dyn Strategy,
) -> (Vec<Substitution>, Vec<ReplacedEntity>) {
    let mut accepted: Vec<Substitution> = Vec::with_capacity(spans.len());
    let mut records = Vec::with_capacity(spans.len());

    for span in spans {
        if let Some(previous) = accepted.last() {
            if span.end > previous.start {
                tracing::warn!(
                    start = span.start,
                    end = span.end,
                    entity_type = %span.entity_type,
                    overlaps_start = previous.start,
                    overlaps_end = previous.end,
                    "Skipping span overlapping an accepted span"
                );
                continue;
            }
        }

        let original = index.slice(span.start, span.end);
        let replacement = strategy.replace(original, span.entity_type);

        records.push(ReplacedEntity {
            original: original.to_string(),
            replacement: replacement.clone(),
            entity_type: span.entity_type,
        });
        accepted.push(Substitution {
            start: span.start,
            end: span.end,
            replacement,
        });
    }

    (accepted, records)
}

/// Build the output from `accepted`, which is in descending offset order
fn splice(text: &str, index: &CharIndex, accepted: &[Substitution]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for substitution in accepted.iter().rev() {
        output.push_str(&text[cursor..index.byte(substitution.start)]);
        output.push_str(&substitution.replacement);
        cursor = index.byte(substitution.end);
    }
    output.push_str(&text[cursor..]);

    output
}

/// Character to byte offset table for one text
struct CharIndex<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    fn byte(&self, char_offset: usize) -> usize {
        self.boundaries[char_offset]
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.byte(start)..self.byte(end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PiiError;
    use std::collections::HashSet;

    fn span(start: usize, end: usize, label: &str) -> AnnotationResult {
        AnnotationResult::new(start, end, 0.9, label)
    }

    fn alice_met_bob() -> Vec<AnnotationResult> {
        vec![span(0, 5, "PERSON"), span(10, 13, "PERSON")]
    }

    #[test]
    fn test_redact_offset_sweep() {
        let result = Anonymizer::new(AnonymizerType::Redact)
            .anonymize("Alice met Bob", &alice_met_bob())
            .unwrap();

        assert_eq!(result.anonymized_text, "[REDACTED] met [REDACTED]");
        let originals: Vec<&str> = result
            .replaced_entities
            .iter()
            .map(|r| r.original.as_str())
            .collect();
        assert_eq!(originals, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_replace_numbers_in_reverse_offset_order() {
        let spans = vec![
            span(0, 5, "PERSON"),
            span(10, 13, "PERSON"),
            span(17, 22, "LOCATION"),
        ];
        let result = Anonymizer::new(AnonymizerType::Replace)
            .anonymize("Alice met Bob in Paris", &spans)
            .unwrap();

        assert_eq!(
            result.anonymized_text,
            "[PERSON_2] met [PERSON_1] in [LOCATION_0]"
        );
    }

    #[test]
    fn test_replace_uniqueness() {
        let text = "Ann, Ann, Ann";
        let spans = vec![span(0, 3, "PERSON"), span(5, 8, "PERSON"), span(10, 13, "PERSON")];
        let result = Anonymizer::new(AnonymizerType::Replace)
            .anonymize(text, &spans)
            .unwrap();

        let placeholders: HashSet<&str> = result
            .replaced_entities
            .iter()
            .map(|r| r.replacement.as_str())
            .collect();
        assert_eq!(placeholders.len(), 3);
    }

    #[test]
    fn test_hash_length_and_determinism() {
        let anonymizer = Anonymizer::new(AnonymizerType::Hash).with_hash_type(HashType::Md5);
        let first = anonymizer.anonymize("Alice met Bob", &alice_met_bob()).unwrap();
        let second = anonymizer.anonymize("Alice met Bob", &alice_met_bob()).unwrap();

        assert_eq!(first.anonymized_text, second.anonymized_text);
        assert_eq!(first.anonymized_text.chars().count(), "Alice met Bob".len());
        for record in &first.replaced_entities {
            assert_eq!(record.replacement.chars().count(), record.original.chars().count());
        }
        assert!(first.anonymized_text.starts_with("64489 met "));
    }

    #[test]
    fn test_filter_exclusivity() {
        let text = "Alice works at Acme";
        let spans = vec![span(0, 5, "PERSON"), span(15, 19, "ORG")];
        let result = Anonymizer::new(AnonymizerType::Replace)
            .with_entities(vec![EntityType::Person])
            .anonymize(text, &spans)
            .unwrap();

        assert_eq!(result.anonymized_text, "[PERSON_0] works at Acme");
        assert!(result
            .replaced_entities
            .iter()
            .all(|r| r.entity_type != EntityType::Organization));
    }

    #[test]
    fn test_filtered_span_is_not_validated() {
        let spans = vec![span(0, 5, "PERSON"), span(100, 120, "EMAIL")];
        let result = Anonymizer::new(AnonymizerType::Redact)
            .with_entities(vec![EntityType::Person])
            .anonymize("Alice", &spans)
            .unwrap();
        assert_eq!(result.anonymized_text, "[REDACTED]");
    }

    #[test]
    fn test_out_of_range_rejected_without_mutation() {
        let spans = vec![span(0, 5, "PERSON"), span(10, 40, "PERSON")];
        let err = Anonymizer::new(AnonymizerType::Redact)
            .anonymize("Alice met Bob", &spans)
            .unwrap_err();

        assert!(matches!(
            err,
            PiiError::OffsetOutOfRange { start: 10, end: 40, len: 13 }
        ));
    }

    #[test]
    fn test_out_of_range_skipped_under_skip_policy() {
        let spans = vec![span(0, 5, "PERSON"), span(10, 40, "PERSON")];
        let result = Anonymizer::new(AnonymizerType::Redact)
            .with_offset_policy(OffsetPolicy::Skip)
            .anonymize("Alice met Bob", &spans)
            .unwrap();

        assert_eq!(result.anonymized_text, "[REDACTED] met Bob");
        assert_eq!(result.total_replacements(), 1);
    }

    #[test]
    fn test_overlap_keeps_right_most_span() {
        let text = "John Smith Jr";
        // "John Smith" overlaps "Smith Jr"
        let spans = vec![span(0, 10, "PERSON"), span(5, 13, "PERSON")];
        let result = Anonymizer::new(AnonymizerType::Replace)
            .anonymize(text, &spans)
            .unwrap();

        assert_eq!(result.anonymized_text, "John [PERSON_0]");
        assert_eq!(result.total_replacements(), 1);
    }

    #[test]
    fn test_adjacent_spans_both_replaced() {
        let spans = vec![span(0, 3, "PERSON"), span(3, 6, "PERSON")];
        let result = Anonymizer::new(AnonymizerType::Redact)
            .anonymize("AnnBob", &spans)
            .unwrap();
        assert_eq!(result.anonymized_text, "[REDACTED][REDACTED]");
    }

    #[test]
    fn test_unsorted_input_is_handled() {
        let spans = vec![span(10, 13, "PERSON"), span(0, 5, "PERSON")];
        let result = Anonymizer::new(AnonymizerType::Redact)
            .anonymize("Alice met Bob", &spans)
            .unwrap();
        assert_eq!(result.anonymized_text, "[REDACTED] met [REDACTED]");
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = "Zoë lives in Zürich";
        let spans = vec![span(0, 3, "PERSON"), span(13, 19, "LOCATION")];
        let result = Anonymizer::new(AnonymizerType::Replace)
            .anonymize(text, &spans)
            .unwrap();

        assert_eq!(result.anonymized_text, "[PERSON_1] lives in [LOCATION_0]");
        assert_eq!(result.replaced_entities[0].original, "Zürich");
        assert_eq!(result.replaced_entities[1].original, "Zoë");
    }

    #[test]
    fn test_no_spans_returns_text() {
        let result = Anonymizer::default().anonymize("nothing here", &[]).unwrap();
        assert_eq!(result.anonymized_text, "nothing here");
        assert!(!result.has_replacements());
    }

    #[test]
    fn test_convenience_methods_ignore_configured_strategy() {
        let anonymizer = Anonymizer::new(AnonymizerType::Hash);
        let text = "Alice met Bob";

        assert_eq!(
            anonymizer.redact_pii(text, &alice_met_bob()).unwrap().anonymized_text,
            "[REDACTED] met [REDACTED]"
        );
        assert_eq!(
            anonymizer.replace_pii(text, &alice_met_bob()).unwrap().anonymized_text,
            "[PERSON_1] met [PERSON_0]"
        );
        assert_eq!(
            anonymizer.hash_pii(text, &alice_met_bob()).unwrap().anonymized_text,
            anonymizer.anonymize(text, &alice_met_bob()).unwrap().anonymized_text
        );
    }

    #[test]
    fn test_from_names_fails_fast() {
        assert!(matches!(
            Anonymizer::from_names("shred", "sha256"),
            Err(PiiError::UnsupportedStrategy(_))
        ));
        assert!(matches!(
            Anonymizer::from_names("hash", "crc32"),
            Err(PiiError::UnsupportedHashAlgorithm(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = AnonymizerConfig {
            strategy: "hash".to_string(),
            hash_type: "sha3_256".to_string(),
            entities: vec!["EMAIL".to_string()],
            offset_policy: OffsetPolicy::Skip,
        };
        let anonymizer = Anonymizer::from_config(&config).unwrap();

        assert_eq!(anonymizer.anonymizer_type(), AnonymizerType::Hash);
        assert_eq!(anonymizer.hash_type(), HashType::Sha3_256);
        assert_eq!(anonymizer.entities(), &[EntityType::Email]);
    }
}
