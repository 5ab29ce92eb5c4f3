use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EstateError;

/// The role a client plays. Fixed when the client is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Buyer,
    Seller,
}

/// What happens to listings that reference a client being deleted.
///
/// - `DetachFromListings`: drop the client from every buyer set; listings stay
/// - `DeleteListings`: delete every listing the client sells, since a listing
///   cannot exist without its seller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadePolicy {
    DetachFromListings,
    DeleteListings,
}

const CASCADE_POLICIES: [(Role, CascadePolicy); 2] = [
    (Role::Buyer, CascadePolicy::DetachFromListings),
    (Role::Seller, CascadePolicy::DeleteListings),
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
        }
    }

    /// Cascade applied to listings when a client of this role is deleted
    pub fn cascade_policy(&self) -> CascadePolicy {
        CASCADE_POLICIES
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, policy)| *policy)
            .unwrap_or(CascadePolicy::DetachFromListings)
    }
}

impl FromStr for Role {
    type Err = EstateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            other => Err(EstateError::InvalidField {
                field: "role",
                reason: format!("Unknown role: {}", other),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
