//! Batched upload of records into one collection.

use log::debug;

use super::identity::resolve_document_key;
use crate::config::MAX_BATCH_SIZE;
use crate::error_handling::{ImportStats, InfoType, StoreError};
use crate::store::{DocumentStore, Record, WriteBatch};

/// What an upload wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub documents: usize,
    pub batches: usize,
}

/// Writes `records` into `collection`, committing every `batch_size` writes.
///
/// Records are staged in input order. Batches are committed one at a time;
/// the first failed commit is returned and no later batch is attempted.
/// A trailing partial batch is committed, an empty one is not.
pub async fn upload_records<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    records: Vec<Record>,
    batch_size: usize,
    stats: &ImportStats,
) -> Result<UploadSummary, StoreError> {
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut summary = UploadSummary::default();
    let mut batch = store.batch();

    for record in records {
        let key = resolve_document_key(&record);
        stats.increment_info(key.info_type());
        batch.set(collection, key.into_key(store), record);
        summary.documents += 1;

        if batch.len() == batch_size {
            let full = std::mem::replace(&mut batch, store.batch());
            commit_batch(store, collection, full, &mut summary, stats).await?;
        }
    }

    if !batch.is_empty() {
        commit_batch(store, collection, batch, &mut summary, stats).await?;
    }

    Ok(summary)
}

async fn commit_batch<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    batch: WriteBatch,
    summary: &mut UploadSummary,
    stats: &ImportStats,
) -> Result<(), StoreError> {
    let len = batch.len();
    store.commit(batch).await?;
    summary.batches += 1;
    stats.increment_info(InfoType::BatchCommitted);
    debug!(
        "Committed batch {} ({} writes) to '{}'",
        summary.batches, len, collection
    );
    Ok(())
}
