//! Document store abstraction.
//!
//! The uploader talks to storage through the [`DocumentStore`] trait, which
//! models the two things it needs: addressing a document by collection name
//! plus string identifier, and committing a bounded batch of set-document
//! writes atomically. Implementations are constructed by the caller and
//! passed in explicitly; there is no process-global connection state.
//!
//! Two implementations live here:
//! - [`LocalStore`]: in-memory, for unit tests, integration tests, and dry
//!   runs. Supports injected commit failures.
//! - [`FirestoreStore`] (feature `firestore-store`): thin client over the
//!   Firestore REST `documents:commit` endpoint.

pub mod document_store;
pub mod local;

#[cfg(feature = "firestore-store")]
pub mod firestore;

pub use document_store::{DocumentStore, DocumentWrite, StoreError, StoreResult};
pub use local::LocalStore;

#[cfg(feature = "firestore-store")]
pub use firestore::{FirestoreConfig, FirestoreStore};
