//! End-to-end tests for the ingest, validate, upload pipeline.
//!
//! Everything runs against the in-memory store, which mirrors the commit
//! semantics of the real backend closely enough to cover identifier
//! assignment, chunking, and failure isolation without credentials.

use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

use xcamp_uploader::{load_schedule_dir, BatchUploader, LocalStore};

fn write_json(dir: &TempDir, name: &str, payload: &serde_json::Value) {
    fs::write(dir.path().join(name), payload.to_string()).unwrap();
}

fn uploader(store: &LocalStore) -> BatchUploader {
    BatchUploader::new(Arc::new(store.clone()), "schedule")
}

#[tokio::test]
async fn test_full_pipeline_from_files_to_store() {
    let stable_id = Uuid::new_v4();
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "schedule.json",
        &json!([
            {
                "name": "Opening meeting",
                "days": [1],
                "startTime": "09:00",
                "endTime": "10:30",
                "type": "main",
                "place": "Big tent",
                "speakers": ["Anna", "Bart"],
                "id": stable_id.to_string()
            },
            {
                "name": "Lunch",
                "days": [1, 2, 3],
                "startTime": "12:00",
                "endTime": "13:00",
                "type": "food"
            },
            {
                "name": "Bad entry, missing type",
                "days": [1],
                "startTime": "09:00",
                "endTime": "10:00"
            }
        ]),
    );

    let report = load_schedule_dir(dir.path()).unwrap();
    assert_eq!(report.accepted.len(), 2);
    assert_eq!(report.rejected, 1);

    let store = LocalStore::new();
    let summary = uploader(&store).upload(&report.accepted).await;

    assert_eq!(summary.uploaded, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.stable_ids, 1);
    assert_eq!(summary.generated_ids, 1);
    assert_eq!(summary.batches_attempted, 1);
    assert_eq!(store.document_count("schedule"), 2);

    // The stable id is both the document slot and the uid field.
    let doc = store
        .document("schedule", &stable_id.to_string())
        .expect("stable-id document present");
    assert_eq!(doc["uid"], json!(stable_id.to_string()));
    assert_eq!(doc["name"], json!("Opening meeting"));
    assert_eq!(doc["startTime"], json!("09:00"));
    assert_eq!(doc["type"], json!("main"));
    assert_eq!(doc["place"], json!("Big tent"));
    assert_eq!(doc["speakers"], json!(["Anna", "Bart"]));
    // Source "id" is promoted to uid, never copied through.
    assert!(doc.get("id").is_none());

    // The generated document omits optional fields that were absent.
    let generated = store
        .documents("schedule")
        .into_iter()
        .find(|(uid, _)| uid != &stable_id.to_string())
        .expect("generated document present");
    let (uid, doc) = generated;
    assert_eq!(Uuid::parse_str(&uid).unwrap().get_version_num(), 4);
    assert_eq!(doc["name"], json!("Lunch"));
    assert_eq!(doc["days"], json!([1, 2, 3]));
    assert!(doc.get("place").is_none());
    assert!(doc.get("speakers").is_none());
    assert!(doc.get("leader").is_none());
    assert!(doc.get("description").is_none());
}

#[tokio::test]
async fn test_reupload_with_stable_ids_overwrites_in_place() {
    let id = Uuid::new_v4();
    let entry = |name: &str| {
        json!([{
            "name": name,
            "days": [2],
            "startTime": "19:30",
            "endTime": "21:00",
            "type": "gospel",
            "id": id.to_string()
        }])
    };

    let store = LocalStore::new();
    for name in ["Evening meeting", "Evening meeting (rescheduled)"] {
        let dir = TempDir::new().unwrap();
        write_json(&dir, "schedule.json", &entry(name));
        let report = load_schedule_dir(dir.path()).unwrap();
        uploader(&store).upload(&report.accepted).await;
    }

    assert_eq!(store.document_count("schedule"), 1);
    let doc = store.document("schedule", &id.to_string()).unwrap();
    assert_eq!(doc["name"], json!("Evening meeting (rescheduled)"));
}

#[tokio::test]
async fn test_failed_batch_leaves_other_batches_intact() {
    let dir = TempDir::new().unwrap();
    let entries: Vec<serde_json::Value> = (0..9)
        .map(|i| {
            json!({
                "name": format!("Session {}", i),
                "days": [1],
                "startTime": "09:00",
                "endTime": "10:00",
                "type": "internal"
            })
        })
        .collect();
    write_json(&dir, "schedule.json", &json!(entries));

    let report = load_schedule_dir(dir.path()).unwrap();
    assert_eq!(report.accepted.len(), 9);

    let store = LocalStore::new();
    store.fail_commits(&[2]);
    let summary = uploader(&store)
        .with_batch_size(3)
        .upload(&report.accepted)
        .await;

    assert_eq!(store.commit_sizes(), vec![3, 3, 3]);
    assert_eq!(summary.uploaded, 6);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.generated_ids, 9);
    assert!(summary.is_degraded());
    assert_eq!(store.document_count("schedule"), 6);

    let names: Vec<String> = store
        .documents("schedule")
        .values()
        .map(|doc| doc["name"].as_str().unwrap().to_string())
        .collect();
    for lost in ["Session 3", "Session 4", "Session 5"] {
        assert!(!names.iter().any(|n| n == lost));
    }
}

#[tokio::test]
async fn test_unhealthy_store_fails_every_batch_but_run_completes() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "schedule.json",
        &json!([{
            "name": "Opening",
            "days": [1],
            "startTime": "09:00",
            "endTime": "10:00",
            "type": "main"
        }]),
    );

    let report = load_schedule_dir(dir.path()).unwrap();
    let store = LocalStore::new();
    store.set_healthy(false);

    let summary = uploader(&store).upload(&report.accepted).await;
    assert_eq!(summary.uploaded, 0);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 1);
    assert_eq!(store.document_count("schedule"), 0);
}
