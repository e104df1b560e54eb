//! Entity type taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of entity types a span can be classified as
///
/// Recognizer output outside this set is coerced to [`EntityType::Unknown`]
/// by [`EntityType::normalize`]; it is never rejected. Serialization uses the
/// canonical label and deserialization runs every label through the same
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// People, including fictional
    Person,
    /// Companies, agencies, institutions
    Organization,
    /// Countries, cities, states, physical locations
    Location,
    /// Email addresses
    Email,
    /// Telephone numbers
    PhoneNumber,
    /// Absolute or relative dates
    Date,
    /// Generic numerals
    Number,
    /// Payment card numbers
    CreditCard,
    /// Any label outside the closed set
    Unknown,
}

impl EntityType {
    /// Every recognized type, `Unknown` last
    pub const ALL: [EntityType; 9] = [
        Self::Person,
        Self::Organization,
        Self::Location,
        Self::Email,
        Self::PhoneNumber,
        Self::Date,
        Self::Number,
        Self::CreditCard,
        Self::Unknown,
    ];

    /// Canonical label used in placeholders and serialized output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::Email => "EMAIL",
            Self::PhoneNumber => "PHONE_NUMBER",
            Self::Date => "DATE",
            Self::Number => "NUMBER",
            Self::CreditCard => "CREDIT_CARD",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Map an arbitrary recognizer label onto the closed set
    ///
    /// Matching is case-insensitive and accepts the NER aliases `ORG`,
    /// `LOC`, `GPE`, `PHONE` and `CARDINAL`.
    pub fn normalize(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PERSON" => Self::Person,
            "ORGANIZATION" | "ORG" => Self::Organization,
            "LOCATION" | "LOC" | "GPE" => Self::Location,
            "EMAIL" => Self::Email,
            "PHONE_NUMBER" | "PHONE" => Self::PhoneNumber,
            "DATE" => Self::Date,
            "NUMBER" | "CARDINAL" => Self::Number,
            "CREDIT_CARD" => Self::CreditCard,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for EntityType {
    fn from(label: String) -> Self {
        Self::normalize(&label)
    }
}

impl From<&str> for EntityType {
    fn from(label: &str) -> Self {
        Self::normalize(label)
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.label().to_string()
    }
}
