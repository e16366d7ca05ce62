//! Uploader configuration.
//!
//! Settings come from an optional `uploader.toml`, with every field carrying
//! a sensible default so the binary also runs with no file at all.
//! Environment variables override the file, which keeps deployments
//! configurable without editing checked-in settings.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration for the upload binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploaderConfig {
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub firestore: FirestoreSettings,
}

/// Settings covering what to upload and where to find it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Target collection name.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Directory scanned for `*.json` schedule files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// First day of the event, `YYYY-MM-DD`. Day numbers in entries are
    /// offsets from this date.
    #[serde(default = "default_start_date")]
    pub start_date: String,
}

/// Connection settings for the Firestore backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreSettings {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_database_id")]
    pub database_id: String,
    /// Name of the environment variable holding the OAuth bearer token.
    /// The token itself never lives in the file.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_collection() -> String {
    "schedule".to_string()
}

fn default_data_dir() -> String {
    "schedule_data".to_string()
}

fn default_start_date() -> String {
    "2026-07-18".to_string()
}

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_token_env() -> String {
    "FIRESTORE_ACCESS_TOKEN".to_string()
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            data_dir: default_data_dir(),
            start_date: default_start_date(),
        }
    }
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database_id: default_database_id(),
            token_env: default_token_env(),
        }
    }
}

impl UploaderConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: UploaderConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Load from the first `uploader.toml` found near the working directory,
    /// falling back to defaults when none exists.
    pub fn from_default_location() -> Result<Self> {
        for candidate in ["uploader.toml", "../uploader.toml"] {
            if Path::new(candidate).exists() {
                return Self::from_file(candidate);
            }
        }
        Ok(Self::default())
    }

    /// Apply environment variable overrides on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(collection) = std::env::var("XCAMP_COLLECTION") {
            self.upload.collection = collection;
        }
        if let Ok(data_dir) = std::env::var("XCAMP_DATA_DIR") {
            self.upload.data_dir = data_dir;
        }
        if let Ok(project_id) = std::env::var("FIRESTORE_PROJECT_ID") {
            self.firestore.project_id = project_id;
        }
        if let Ok(database_id) = std::env::var("FIRESTORE_DATABASE_ID") {
            self.firestore.database_id = database_id;
        }
    }

    /// Check invariants that would otherwise fail deep inside the run.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.upload.collection.is_empty(),
            "upload.collection must not be empty"
        );
        self.start_date()?;
        Ok(())
    }

    /// Parse the configured event start date.
    pub fn start_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.upload.start_date, "%Y-%m-%d").with_context(|| {
            format!(
                "upload.start_date '{}' is not a YYYY-MM-DD date",
                self.upload.start_date
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = UploaderConfig::default();
        assert_eq!(config.upload.collection, "schedule");
        assert_eq!(config.upload.data_dir, "schedule_data");
        assert_eq!(config.firestore.database_id, "(default)");
        assert_eq!(config.firestore.token_env, "FIRESTORE_ACCESS_TOKEN");
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [upload]
            collection = "schedule_test"

            [firestore]
            project_id = "demo-project"
            "#
        )
        .unwrap();

        let config = UploaderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.upload.collection, "schedule_test");
        assert_eq!(config.upload.data_dir, "schedule_data");
        assert_eq!(config.firestore.project_id, "demo-project");
        assert_eq!(config.firestore.database_id, "(default)");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();
        assert!(UploaderConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_start_date_parses() {
        let config = UploaderConfig::default();
        let date = config.start_date().unwrap();
        assert_eq!(date.to_string(), "2026-07-18");

        let mut bad = UploaderConfig::default();
        bad.upload.start_date = "18/07/2026".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let mut config = UploaderConfig::default();
        config.upload.collection = String::new();
        assert!(config.validate().is_err());
    }
}
