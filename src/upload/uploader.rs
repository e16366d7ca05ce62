//! Chunked batch uploader.
//!
//! Splits validated entries into fixed-size chunks and commits each chunk
//! as one atomic batch. A failed chunk is counted and logged but never
//! stops the run; the remaining chunks still get their chance.

use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::model::{ScheduleEntry, UploadSummary};
use crate::store::{DocumentStore, DocumentWrite};

/// Maximum number of writes per commit, matching Firestore's batch limit.
pub const MAX_BATCH_SIZE: usize = 500;

/// Uploads schedule entries to a document store in chunked batches.
pub struct BatchUploader {
    store: Arc<dyn DocumentStore>,
    collection: String,
    batch_size: usize,
}

impl BatchUploader {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Override the chunk size, mainly for tests. Clamped to at least 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Upload every entry, committing one batch per chunk.
    ///
    /// Entries carrying an `id` keep it as their document identifier; the
    /// rest get a fresh UUID v4. Identifiers are assigned and counted before
    /// the commit, so the stable/generated split in the summary covers
    /// failed chunks too. An empty slice returns a zeroed summary without
    /// contacting the store.
    pub async fn upload(&self, entries: &[ScheduleEntry]) -> UploadSummary {
        let mut summary = UploadSummary::default();
        if entries.is_empty() {
            return summary;
        }

        for chunk in entries.chunks(self.batch_size) {
            let mut writes = Vec::with_capacity(chunk.len());
            for entry in chunk {
                let uid = match entry.id {
                    Some(id) => {
                        summary.stable_ids += 1;
                        id.to_string()
                    }
                    None => {
                        summary.generated_ids += 1;
                        Uuid::new_v4().to_string()
                    }
                };
                let record = entry.upload_record(uid.clone());
                writes.push(DocumentWrite::new(uid, record.to_document()));
            }

            summary.batches_attempted += 1;
            match self.store.commit_batch(&self.collection, &writes).await {
                Ok(()) => {
                    summary.uploaded += writes.len();
                    info!(
                        "batch {} committed: {} entries",
                        summary.batches_attempted,
                        writes.len()
                    );
                }
                Err(err) => {
                    summary.failed += writes.len();
                    warn!(
                        "batch {} failed: {} entries lost: {}",
                        summary.batches_attempted,
                        writes.len(),
                        err
                    );
                }
            }
        }
        summary
    }
}
