//! Deterministic digests of store contents
//!
//! Same contents in the same order give the same digest. Used to show a
//! cancelled command left the store byte-for-byte unchanged.

use sha2::{Digest, Sha256};

use super::StoreSnapshot;
use crate::errors::Result;

/// Hex-encoded SHA-256 of the snapshot's canonical JSON (64 characters)
///
/// # Errors
///
/// `Serialization` if encoding fails.
pub fn compute_snapshot_digest(snapshot: &StoreSnapshot) -> Result<String> {
    let canonical = serde_json::to_string(snapshot)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
