//! In-memory [`DocumentStore`] for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{generate_auto_id, DocumentStore, Record, WriteBatch};
use crate::config::MAX_BATCH_WRITES;
use crate::error_handling::StoreError;

#[derive(Debug, Default)]
struct MemoryState {
    commit_attempts: usize,
    committed_batch_sizes: Vec<usize>,
    documents: BTreeMap<String, BTreeMap<String, Record>>,
}

/// Keeps committed documents in memory and records every commit.
///
/// Commits are all-or-nothing like the real store: a rejected batch leaves no
/// documents behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    fail_on_commit: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `n`th commit attempt (1-based) is rejected.
    pub fn failing_on_commit(n: usize) -> Self {
        MemoryStore {
            fail_on_commit: Some(n),
            ..Self::default()
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sizes of successfully committed batches, in commit order.
    pub fn committed_batch_sizes(&self) -> Vec<usize> {
        self.state().committed_batch_sizes.clone()
    }

    pub fn commit_attempts(&self) -> usize {
        self.state().commit_attempts
    }

    pub fn document(&self, collection: &str, key: &str) -> Option<Record> {
        self.state()
            .documents
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned()
    }

    /// Keys stored in a collection, sorted.
    pub fn keys(&self, collection: &str) -> Vec<String> {
        self.state()
            .documents
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn collection_len(&self, collection: &str) -> usize {
        self.state()
            .documents
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn generate_key(&self) -> String {
        generate_auto_id()
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut state = self.state();
        state.commit_attempts += 1;

        if batch.len() > MAX_BATCH_WRITES {
            return Err(StoreError::BatchTooLarge {
                len: batch.len(),
                max: MAX_BATCH_WRITES,
            });
        }
        if self.fail_on_commit == Some(state.commit_attempts) {
            return Err(StoreError::CommitRejected {
                status: 503,
                message: "injected commit failure".to_string(),
            });
        }

        state.committed_batch_sizes.push(batch.len());
        for op in batch.into_writes() {
            state
                .documents
                .entry(op.collection)
                .or_default()
                .insert(op.key, op.fields);
        }
        Ok(())
    }
}
