//! Hash strategy

use super::Strategy;
use crate::anonymization::config::HashType;
use crate::domain::EntityType;
use md5::Md5;
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// Hash strategy - replaces a span with its lowercase hex digest
///
/// The digest is fitted to the character length of the span: truncated when
/// the span is shorter, repeated when it is longer. The same input and
/// algorithm always produce the same replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashStrategy {
    hash_type: HashType,
}

impl HashStrategy {
    /// Create a new hash strategy
    pub fn new(hash_type: HashType) -> Self {
        Self { hash_type }
    }

    /// Full hex digest of `value`
    pub fn hex_digest(&self, value: &str) -> String {
        match self.hash_type {
            HashType::Md5 => hex_digest::<Md5>(value),
            HashType::Sha256 => hex_digest::<Sha256>(value),
            HashType::Sha3_256 => hex_digest::<Sha3_256>(value),
        }
    }
}

impl Strategy for HashStrategy {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn replace(&mut self, original: &str, _entity_type: EntityType) -> String {
        let digest = self.hex_digest(original);
        fit_to_length(&digest, original.chars().count())
    }
}

fn hex_digest<D: Digest>(value: &str) -> String {
    let mut hasher = D::new();
    hasher.update(value.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn fit_to_length(digest: &str, len: usize) -> String {
    digest.chars().cycle().take(len).collect()
}
