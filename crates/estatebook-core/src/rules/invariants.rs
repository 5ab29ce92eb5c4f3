use std::fmt;

use crate::errors::{EstateError, Result};
use crate::model::{Name, Role};
use crate::ops::Store;

/// A listing reference that does not resolve to a client of the right role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityViolation {
    pub listing: Name,
    pub client: Name,
    pub expected: Role,
    /// Role of the referenced client, `None` if it does not exist
    pub actual: Option<Role>,
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actual {
            Some(actual) => write!(
                f,
                "listing {} references {} as {} but the client is a {}",
                self.listing, self.client, self.expected, actual
            ),
            None => write!(
                f,
                "listing {} references missing {} {}",
                self.listing, self.expected, self.client
            ),
        }
    }
}

/// Find every dangling seller or buyer reference, in listing order
pub fn check_referential_integrity(store: &Store) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    for listing in store.listings() {
        let references = std::iter::once((listing.seller(), Role::Seller))
            .chain(listing.buyers().iter().map(|b| (b, Role::Buyer)));

        for (client, expected) in references {
            let actual = store.find_client(client).map(|c| c.role());
            if actual != Some(expected) {
                violations.push(IntegrityViolation {
                    listing: listing.name().clone(),
                    client: client.clone(),
                    expected,
                    actual,
                });
            }
        }
    }

    violations
}

/// # Errors
///
/// `InvariantViolation` describing the first violation found.
pub fn validate_store(store: &Store) -> Result<()> {
    match check_referential_integrity(store).into_iter().next() {
        Some(violation) => Err(EstateError::InvariantViolation {
            message: violation.to_string(),
        }),
        None => Ok(()),
    }
}
