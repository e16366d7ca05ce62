//! Command line entry point for uploading schedule data.
//!
//! Usage: `upload_schedule [data_dir] [--dry-run]`
//!
//! Reads every `*.json` file in the data directory, validates the entries,
//! and uploads the valid ones to the configured collection in batches.
//! `--dry-run` swaps the backend for an in-memory store so the full
//! pipeline can be exercised without credentials.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use xcamp_uploader::store::DocumentStore;
use xcamp_uploader::{BatchUploader, LocalStore, UploaderConfig};

fn build_store(config: &UploaderConfig, dry_run: bool) -> Result<Arc<dyn DocumentStore>> {
    if dry_run {
        return Ok(Arc::new(LocalStore::new()));
    }

    #[cfg(feature = "firestore-store")]
    {
        use xcamp_uploader::{FirestoreConfig, FirestoreStore};

        let access_token = std::env::var(&config.firestore.token_env).with_context(|| {
            format!(
                "environment variable {} must hold the Firestore access token",
                config.firestore.token_env
            )
        })?;
        let store = FirestoreStore::new(FirestoreConfig {
            project_id: config.firestore.project_id.clone(),
            database_id: config.firestore.database_id.clone(),
            access_token,
        })?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "firestore-store"))]
    {
        let _ = config;
        anyhow::bail!("built without the firestore-store feature; use --dry-run")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|arg| arg == "--dry-run");
    let data_dir_arg = args.iter().skip(1).find(|arg| !arg.starts_with("--"));

    let mut config = UploaderConfig::from_default_location()?;
    config.apply_env_overrides();
    config.validate()?;

    let data_dir = data_dir_arg
        .cloned()
        .unwrap_or_else(|| config.upload.data_dir.clone());

    println!("=== Schedule Upload Tool ===");
    println!("Data directory: {}", data_dir);
    println!("Collection: {}", config.upload.collection);
    println!("Event start date: {}", config.upload.start_date);
    if dry_run {
        println!("Mode: dry run (in-memory store)");
    }
    println!();

    let report = xcamp_uploader::load_schedule_dir(Path::new(&data_dir))?;
    println!(
        "Validated {} of {} entries from {} file(s) ({} skipped)",
        report.accepted.len(),
        report.total_seen(),
        report.files_read,
        report.files_skipped
    );

    if report.accepted.is_empty() {
        println!("No valid entries found; nothing to upload.");
        return Ok(());
    }

    let store = build_store(&config, dry_run)?;
    let uploader = BatchUploader::new(store, config.upload.collection.clone());
    let summary = uploader.upload(&report.accepted).await;

    println!();
    println!("=== Document ID Summary ===");
    println!("Stable IDs (reused): {}", summary.stable_ids);
    println!("Auto-generated IDs: {}", summary.generated_ids);
    println!();
    println!(
        "Uploaded {} entries in {} batch(es)",
        summary.uploaded, summary.batches_attempted
    );
    if summary.is_degraded() {
        println!("WARNING: {} entries failed to upload", summary.failed);
    } else {
        println!("✓ Upload completed successfully!");
    }
    Ok(())
}
