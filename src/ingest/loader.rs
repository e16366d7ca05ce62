use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ScheduleEntry;
use crate::validation::validate_entry;

/// Outcome of loading one or more schedule data files.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Entries that passed validation, in file-name then in-file order.
    pub accepted: Vec<ScheduleEntry>,
    /// Individual records dropped by the validator.
    pub rejected: usize,
    /// Files successfully read and processed as JSON arrays.
    pub files_read: usize,
    /// Files skipped entirely (unreadable, bad JSON, or not an array).
    pub files_skipped: usize,
}

impl LoadReport {
    /// Total records considered, accepted or not.
    pub fn total_seen(&self) -> usize {
        self.accepted.len() + self.rejected
    }
}

/// Validate every record of a parsed payload into the report.
///
/// Returns `false` (and touches nothing but the log) when the payload is
/// not a JSON array. Each record is judged independently; a rejection never
/// affects sibling records.
pub fn collect_entries_from_value(payload: &Value, source: &str, report: &mut LoadReport) -> bool {
    let items = match payload.as_array() {
        Some(items) => items,
        None => {
            warn!("{} does not contain a JSON array; skipping", source);
            return false;
        }
    };

    for (idx, raw) in items.iter().enumerate() {
        match validate_entry(raw) {
            Ok(entry) => report.accepted.push(entry),
            Err(reason) => {
                warn!(
                    "{}: entry {} validation failed: {}; skipping",
                    source,
                    idx + 1,
                    reason
                );
                report.rejected += 1;
            }
        }
    }
    true
}

/// Load one schedule file into the report.
///
/// Read and parse failures are logged and counted as a skipped file; they
/// never abort the run.
pub fn load_schedule_file(path: &Path, report: &mut LoadReport) {
    let source = path.display().to_string();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("failed to read {}: {}; skipping", source, err);
            report.files_skipped += 1;
            return;
        }
    };

    let payload: Value = match serde_json::from_str(&text) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("failed to parse {}: {}; skipping", source, err);
            report.files_skipped += 1;
            return;
        }
    };

    if collect_entries_from_value(&payload, &source, report) {
        report.files_read += 1;
    } else {
        report.files_skipped += 1;
    }
}

/// Load every `*.json` file in a directory, in sorted name order.
///
/// A missing directory or a directory without any JSON file is an error;
/// problems inside individual files are not.
pub fn load_schedule_dir(dir: &Path) -> Result<LoadReport> {
    anyhow::ensure!(
        dir.is_dir(),
        "schedule data directory '{}' not found",
        dir.display()
    );

    let mut json_files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to list '{}'", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .collect();
    json_files.sort();

    anyhow::ensure!(
        !json_files.is_empty(),
        "no JSON files found in '{}'",
        dir.display()
    );

    let mut report = LoadReport::default();
    for path in &json_files {
        info!("loading {}", path.display());
        let before = report.accepted.len();
        load_schedule_file(path, &mut report);
        info!(
            "  {} entries accepted from {}",
            report.accepted.len() - before,
            path.display()
        );
    }
    Ok(report)
}
