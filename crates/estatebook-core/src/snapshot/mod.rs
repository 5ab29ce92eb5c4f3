//! Read-only snapshots of the store
//!
//! A `StoreSnapshot` is the serializable form of both collections, handed
//! to the persistence layer. Loading goes back through the store's
//! insert operations, so a snapshot with duplicates or dangling references
//! is rejected rather than loaded.

pub mod digest;

use serde::{Deserialize, Serialize};

use crate::errors::{EstateError, Result};
use crate::model::{Client, Listing};
use crate::ops::Store;

pub use digest::compute_snapshot_digest;

/// Current snapshot layout version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub schema_version: u32,
    pub clients: Vec<Client>,
    pub listings: Vec<Listing>,
}

impl StoreSnapshot {
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// `Serialization` on malformed JSON, invalid field values, or an
    /// unsupported schema version.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(EstateError::Serialization {
                message: format!(
                    "Unsupported snapshot schema version {} (expected {})",
                    snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION
                ),
            });
        }
        Ok(snapshot)
    }
}

impl Store {
    /// Copy of both collections in store order
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            clients: self.clients.clone(),
            listings: self.listings.clone(),
        }
    }

    /// Rebuild a store, re-checking uniqueness and references
    ///
    /// Clients are loaded before listings so listing references can resolve.
    ///
    /// # Errors
    ///
    /// `DuplicateClient`, `DuplicateListing` or `DanglingReference` for the
    /// first offending record.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut store = Store::new();
        for client in snapshot.clients {
            store.add_client(client)?;
        }
        for listing in snapshot.listings {
            store.add_listing(listing)?;
        }
        Ok(store)
    }

    /// SHA-256 hex digest of the current contents
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn snapshot_digest(&self) -> Result<String> {
        compute_snapshot_digest(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Area, Email, Name, Phone, Price, Region, Role};
    use std::collections::BTreeSet;

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    fn sample() -> Store {
        let mut store = Store::new();
        store
            .add_client(Client::new(
                Role::Seller,
                name("Sam"),
                Phone::new("123456").unwrap(),
                Email::new("sam@example.com").unwrap(),
                BTreeSet::new(),
            ))
            .unwrap();
        store
            .add_listing(Listing::new(
                name("Condo"),
                Price::new(1_000_000).unwrap(),
                Area::new(90).unwrap(),
                Address::new("9 Marina Way").unwrap(),
                Region::South,
                name("Sam"),
                BTreeSet::new(),
            ))
            .unwrap();
        store
    }

    #[test]
    fn test_snapshot_reloads_into_equal_store() {
        let store = sample();
        let json = store.snapshot().to_json().unwrap();

        let reloaded = Store::from_snapshot(StoreSnapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(reloaded.snapshot(), store.snapshot());
        assert_eq!(reloaded.snapshot_digest().unwrap(), store.snapshot_digest().unwrap());
    }

    #[test]
    fn test_from_snapshot_rejects_dangling_seller() {
        let mut snapshot = sample().snapshot();
        snapshot.clients.clear();

        let result = Store::from_snapshot(snapshot);
        assert!(matches!(result, Err(EstateError::DanglingReference { .. })));
    }

    #[test]
    fn test_from_json_rejects_unknown_version() {
        let mut snapshot = sample().snapshot();
        snapshot.schema_version = 99;
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(matches!(
            StoreSnapshot::from_json(&json),
            Err(EstateError::Serialization { .. })
        ));
    }
}
