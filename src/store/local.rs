//! In-memory document store implementation.
//!
//! Stores documents in nested HashMaps behind an `Arc<RwLock>`, giving unit
//! and integration tests a fast, deterministic, isolated backend. Commit
//! failures can be injected per commit index to exercise the uploader's
//! chunk-isolation behaviour.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::document_store::{DocumentStore, DocumentWrite, StoreError, StoreResult};

/// In-memory document store.
#[derive(Clone, Default)]
pub struct LocalStore {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    collections: HashMap<String, HashMap<String, Value>>,
    commit_count: usize,
    commit_sizes: Vec<usize>,
    failing_commits: HashSet<usize>,
    is_healthy: bool,
}

impl LocalStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        let store = Self::default();
        store.data.write().unwrap().is_healthy = true;
        store
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    /// Make specific commits fail, by 1-based commit index.
    ///
    /// A failing commit applies none of its writes, mimicking an atomic
    /// batch rejection.
    pub fn fail_commits(&self, indices: &[usize]) {
        let mut data = self.data.write().unwrap();
        data.failing_commits.extend(indices.iter().copied());
    }

    /// Number of commit attempts seen so far (failed ones included).
    pub fn commit_count(&self) -> usize {
        self.data.read().unwrap().commit_count
    }

    /// Sizes of every commit attempt, in order.
    pub fn commit_sizes(&self) -> Vec<usize> {
        self.data.read().unwrap().commit_sizes.clone()
    }

    /// Number of documents currently stored in a collection.
    pub fn document_count(&self, collection: &str) -> usize {
        self.data
            .read()
            .unwrap()
            .collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    /// Fetch a stored document by collection and identifier.
    pub fn document(&self, collection: &str, document_id: &str) -> Option<Value> {
        self.data
            .read()
            .unwrap()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(document_id))
            .cloned()
    }

    /// Clone the full contents of a collection.
    pub fn documents(&self, collection: &str) -> HashMap<String, Value> {
        self.data
            .read()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop all documents and bookkeeping, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }

    async fn commit_batch(&self, collection: &str, writes: &[DocumentWrite]) -> StoreResult<()> {
        let mut data = self.data.write().unwrap();

        if !data.is_healthy {
            return Err(StoreError::Connection(
                "document store is not healthy".to_string(),
            ));
        }

        data.commit_count += 1;
        data.commit_sizes.push(writes.len());
        let seq = data.commit_count;
        if data.failing_commits.contains(&seq) {
            return Err(StoreError::Commit(format!(
                "injected failure for commit {}",
                seq
            )));
        }

        let docs = data.collections.entry(collection.to_string()).or_default();
        for write in writes {
            docs.insert(write.document_id.clone(), write.fields.clone());
        }
        Ok(())
    }
}
