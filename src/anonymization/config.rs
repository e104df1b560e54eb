//! Anonymization configuration

use crate::domain::{EntityType, PiiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anonymization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizerType {
    /// Replace each span with `[REDACTED]`
    #[default]
    Redact,
    /// Replace each span with `[LABEL_n]`
    Replace,
    /// Replace each span with a length-matched hex digest
    Hash,
}

impl AnonymizerType {
    /// Configuration name of the strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Redact => "redact",
            Self::Replace => "replace",
            Self::Hash => "hash",
        }
    }
}

impl fmt::Display for AnonymizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnonymizerType {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "redact" => Ok(Self::Redact),
            "replace" => Ok(Self::Replace),
            "hash" => Ok(Self::Hash),
            _ => Err(PiiError::UnsupportedStrategy(s.to_string())),
        }
    }
}

/// Digest used by the hash strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashType {
    /// MD5
    Md5,
    /// SHA-256
    #[default]
    Sha256,
    /// SHA3-256
    Sha3_256,
}

impl HashType {
    /// Configuration name of the algorithm
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Sha3_256 => "sha3_256",
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashType {
    type Err = PiiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" => Ok(Self::Sha256),
            "sha3_256" => Ok(Self::Sha3_256),
            _ => Err(PiiError::UnsupportedHashAlgorithm(s.to_string())),
        }
    }
}

/// What to do with a span whose offsets fall outside the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetPolicy {
    /// Fail the whole call before any substitution
    #[default]
    Reject,
    /// Log and drop the offending span
    Skip,
}

/// Anonymizer configuration
///
/// Strategy and hash names stay strings so an unknown name surfaces as a
/// typed error at build time rather than as a TOML parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Strategy name: `redact`, `replace` or `hash`
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Hash algorithm name: `md5`, `sha256` or `sha3_256`
    #[serde(default = "default_hash_type")]
    pub hash_type: String,

    /// Entity types to anonymize, all when empty
    #[serde(default)]
    pub entities: Vec<String>,

    /// Out-of-range span handling
    #[serde(default)]
    pub offset_policy: OffsetPolicy,
}

fn default_strategy() -> String {
    AnonymizerType::default().as_str().to_string()
}

fn default_hash_type() -> String {
    HashType::default().as_str().to_string()
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            hash_type: default_hash_type(),
            entities: Vec::new(),
            offset_policy: OffsetPolicy::default(),
        }
    }
}

impl AnonymizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.anonymizer_type()?;
        self.hash_algorithm()?;
        self.entity_types()?;
        Ok(())
    }

    /// Parsed strategy
    pub fn anonymizer_type(&self) -> Result<AnonymizerType> {
        self.strategy.parse()
    }

    /// Parsed hash algorithm
    pub fn hash_algorithm(&self) -> Result<HashType> {
        self.hash_type.parse()
    }

    /// Parsed entity allow-list
    ///
    /// Names that do not map to a known type are rejected unless they spell
    /// `UNKNOWN` explicitly.
    pub fn entity_types(&self) -> Result<Vec<EntityType>> {
        self.entities
            .iter()
            .map(|name| {
                let entity_type = EntityType::normalize(name);
                if entity_type == EntityType::Unknown
                    && !name.trim().eq_ignore_ascii_case(EntityType::Unknown.label())
                {
                    return Err(PiiError::InvalidConfiguration(format!(
                        "anonymizer.entities contains unknown entity type: {name}"
                    )));
                }
                Ok(entity_type)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("redact", AnonymizerType::Redact)]
    #[test_case("REPLACE", AnonymizerType::Replace)]
    #[test_case(" hash ", AnonymizerType::Hash)]
    fn test_parse_strategy(name: &str, expected: AnonymizerType) {
        assert_eq!(name.parse::<AnonymizerType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_strategy() {
        assert!(matches!(
            "tokenize".parse::<AnonymizerType>(),
            Err(PiiError::UnsupportedStrategy(name)) if name == "tokenize"
        ));
    }

    #[test_case("md5", HashType::Md5)]
    #[test_case("sha256", HashType::Sha256)]
    #[test_case("SHA3_256", HashType::Sha3_256)]
    fn test_parse_hash_type(name: &str, expected: HashType) {
        assert_eq!(name.parse::<HashType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_hash_type() {
        assert!(matches!(
            "sha1".parse::<HashType>(),
            Err(PiiError::UnsupportedHashAlgorithm(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let config = AnonymizerConfig::default();
        assert_eq!(config.anonymizer_type().unwrap(), AnonymizerType::Redact);
        assert_eq!(config.hash_algorithm().unwrap(), HashType::Sha256);
        assert!(config.entity_types().unwrap().is_empty());
        assert_eq!(config.offset_policy, OffsetPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_entity_names_normalized() {
        let config = AnonymizerConfig {
            entities: vec!["person".to_string(), "GPE".to_string(), "UNKNOWN".to_string()],
            ..AnonymizerConfig::default()
        };
        assert_eq!(
            config.entity_types().unwrap(),
            vec![EntityType::Person, EntityType::Location, EntityType::Unknown]
        );
    }

    #[test]
    fn test_unknown_entity_name_rejected() {
        let config = AnonymizerConfig {
            entities: vec!["PASSPORT".to_string()],
            ..AnonymizerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PiiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AnonymizerConfig =
            toml::from_str("strategy = \"hash\"\noffset_policy = \"skip\"").unwrap();
        assert_eq!(config.anonymizer_type().unwrap(), AnonymizerType::Hash);
        assert_eq!(config.hash_type, "sha256");
        assert_eq!(config.offset_policy, OffsetPolicy::Skip);
    }
}
