//! Batch upload of validated schedule entries.

pub mod uploader;

pub use uploader::{BatchUploader, MAX_BATCH_SIZE};
