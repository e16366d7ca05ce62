//! Schedule upload pipeline for the camp companion app.
//!
//! Reads schedule entries from JSON files, validates each one against the
//! document contract, and uploads the survivors to a document store in
//! atomic batches of up to 500 writes.
//!
//! The crate is organised as a pipeline:
//! - [`ingest`]: find and parse `*.json` schedule files.
//! - [`validation`]: per-entry checks producing typed [`model::ScheduleEntry`]
//!   values; invalid entries are dropped, never repaired.
//! - [`upload`]: chunking, identifier assignment, and batch commits.
//! - [`store`]: the [`store::DocumentStore`] trait with in-memory and
//!   Firestore implementations.

pub mod config;
pub mod ingest;
pub mod model;
pub mod store;
pub mod upload;
pub mod validation;

pub use config::UploaderConfig;
pub use ingest::{load_schedule_dir, LoadReport};
pub use model::{ScheduleEntry, SectionType, UploadRecord, UploadSummary};
pub use store::{DocumentStore, DocumentWrite, LocalStore, StoreError, StoreResult};
pub use upload::{BatchUploader, MAX_BATCH_SIZE};
pub use validation::{validate_entry, validate_time_format, validate_uuid_v4, EntryRejection};

#[cfg(feature = "firestore-store")]
pub use store::{FirestoreConfig, FirestoreStore};
