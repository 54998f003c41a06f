//! Document store abstraction.
//!
//! The importer only needs three things from its storage collaborator:
//! - generate a unique document key
//! - stage a "set" of a full document into a batch
//! - commit a staged batch atomically
//!
//! Staging happens on [`WriteBatch`], a plain in-memory list. Implementations
//! of [`DocumentStore`] provide key generation and the commit itself.

mod batch;
mod firestore;
mod memory;
mod value;

use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::config::AUTO_ID_LENGTH;
use crate::error_handling::StoreError;

pub use batch::{SetOperation, WriteBatch};
pub use firestore::{Authorization, FirestoreStore};
pub use memory::MemoryStore;
pub use value::{to_firestore_fields, to_firestore_value};

/// A JSON object as read from an input file.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Capability interface over a remote document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns a fresh key, unique for practical purposes.
    fn generate_key(&self) -> String;

    /// Returns an empty batch to stage writes into.
    fn batch(&self) -> WriteBatch {
        WriteBatch::new()
    }

    /// Commits every staged write, or none of them.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

/// Generates a 20-character alphanumeric key, the same shape as Firestore auto-IDs.
pub fn generate_auto_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_auto_id_shape() {
        let id = generate_auto_id();
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_auto_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_auto_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
