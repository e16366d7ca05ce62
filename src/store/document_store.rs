use async_trait::async_trait;
use serde_json::Value;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("batch commit failed: {0}")]
    Commit(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// One pending set-document operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    /// Identifier of the document slot within the target collection.
    pub document_id: String,
    /// Document payload; must be a JSON object.
    pub fields: Value,
}

impl DocumentWrite {
    pub fn new(document_id: impl Into<String>, fields: Value) -> Self {
        Self {
            document_id: document_id.into(),
            fields,
        }
    }
}

/// Backend-agnostic document store interface.
///
/// Implementations must be `Send + Sync` so a single handle can be shared
/// behind an `Arc` across async tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether the store is reachable.
    async fn health_check(&self) -> StoreResult<bool>;

    /// Apply every write in the batch as one atomic operation.
    ///
    /// Writes are upserts keyed by document identifier: committing the same
    /// identifier again overwrites the previous document silently. On error
    /// the only guarantee is "this batch failed, retry or report"; partial
    /// application must not be assumed either way.
    async fn commit_batch(&self, collection: &str, writes: &[DocumentWrite]) -> StoreResult<()>;
}
