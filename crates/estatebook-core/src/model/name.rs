use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::errors::{EstateError, Result};

/// Natural key for clients and display identifier for listings.
///
/// Case-preserving for display; equality, ordering and hashing ignore case,
/// so "alice pauline" and "Alice Pauline" are the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Create a name, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` if the name is empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EstateError::InvalidField {
                field: "name",
                reason: "Name cannot be empty or whitespace-only".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased comparison key
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive comparison against raw user input
    pub fn matches(&self, raw: &str) -> bool {
        self.0.to_lowercase() == raw.trim().to_lowercase()
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = EstateError;

    fn try_from(value: String) -> Result<Self> {
        Name::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_name_equality_ignores_case() {
        let a = Name::new("Tan Wen Xuan").unwrap();
        let b = Name::new("tan wen xuan").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Tan Wen Xuan");
    }

    #[test]
    fn test_name_trims_and_rejects_blank() {
        assert_eq!(Name::new("  Alice ").unwrap().as_str(), "Alice");
        assert!(matches!(
            Name::new("   "),
            Err(EstateError::InvalidField { field: "name", .. })
        ));
    }

    #[test]
    fn test_name_set_dedups_case_insensitively() {
        let set: BTreeSet<Name> = ["Daniel", "DANIEL", "George"]
            .iter()
            .map(|n| Name::new(*n).unwrap())
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_name_deserialize_validates() {
        let bad: std::result::Result<Name, _> = serde_json::from_str("\"  \"");
        assert!(bad.is_err());
        let good: Name = serde_json::from_str("\"Benson\"").unwrap();
        assert!(good.matches("benson"));
    }
}
