//! Firestore REST backend.
//!
//! Implements [`DocumentStore`] against the Firestore v1 REST API. A batch
//! maps to one `documents:commit` request carrying an `update` write per
//! document, which Firestore applies atomically. Only the pieces the
//! uploader needs are covered: typed-value encoding of a JSON tree and the
//! commit call itself. Obtaining the bearer token is the caller's problem;
//! it arrives here as opaque configuration.

use async_trait::async_trait;
use log::debug;
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::document_store::{DocumentStore, DocumentWrite, StoreError, StoreResult};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`FirestoreStore`].
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database_id: String,
    pub access_token: String,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: "(default)".to_string(),
            access_token: access_token.into(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// Uses `FIRESTORE_PROJECT_ID`, `FIRESTORE_ACCESS_TOKEN` and the
    /// optional `FIRESTORE_DATABASE_ID`.
    pub fn from_env() -> StoreResult<Self> {
        let project_id = std::env::var("FIRESTORE_PROJECT_ID").map_err(|_| {
            StoreError::Configuration("FIRESTORE_PROJECT_ID must be set".to_string())
        })?;
        let access_token = std::env::var("FIRESTORE_ACCESS_TOKEN").map_err(|_| {
            StoreError::Configuration("FIRESTORE_ACCESS_TOKEN must be set".to_string())
        })?;
        let database_id =
            std::env::var("FIRESTORE_DATABASE_ID").unwrap_or_else(|_| "(default)".to_string());

        Ok(Self {
            project_id,
            database_id,
            access_token,
        })
    }
}

/// Document store backed by the Firestore REST API.
pub struct FirestoreStore {
    config: FirestoreConfig,
    client: reqwest::Client,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> StoreResult<Self> {
        if config.project_id.is_empty() {
            return Err(StoreError::Configuration(
                "firestore project_id is required".to_string(),
            ));
        }
        if config.database_id.is_empty() {
            return Err(StoreError::Configuration(
                "firestore database_id is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Resource path of the database's documents root.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.config.project_id, self.config.database_id
        )
    }
}

/// Encode a JSON value as Firestore's typed value representation.
pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        // Firestore carries 64-bit integers as strings.
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({ "integerValue": n.to_string() }),
        Value::Number(n) => json!({ "doubleValue": n.as_f64() }),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": {
                "values": items.iter().map(to_firestore_value).collect::<Vec<_>>()
            }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": to_firestore_fields(fields) } }),
    }
}

/// Encode an object's fields as a Firestore `fields` map.
pub fn to_firestore_fields(fields: &Map<String, Value>) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), to_firestore_value(value)))
        .collect();
    Value::Object(encoded)
}

/// Build the `documents:commit` request body for a batch of writes.
fn build_commit_body(
    documents_root: &str,
    collection: &str,
    writes: &[DocumentWrite],
) -> StoreResult<Value> {
    let mut encoded = Vec::with_capacity(writes.len());
    for write in writes {
        let fields = match &write.fields {
            Value::Object(map) => to_firestore_fields(map),
            _ => {
                return Err(StoreError::Internal(format!(
                    "document '{}' fields must be a JSON object",
                    write.document_id
                )))
            }
        };
        encoded.push(json!({
            "update": {
                "name": format!("{}/{}/{}", documents_root, collection, write.document_id),
                "fields": fields,
            }
        }));
    }
    Ok(json!({ "writes": encoded }))
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn health_check(&self) -> StoreResult<bool> {
        let url = format!("{}/{}", FIRESTORE_BASE_URL, self.documents_root());
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(response.status().is_success())
    }

    async fn commit_batch(&self, collection: &str, writes: &[DocumentWrite]) -> StoreResult<()> {
        let body = build_commit_body(&self.documents_root(), collection, writes)?;
        let url = format!("{}/{}:commit", FIRESTORE_BASE_URL, self.documents_root());
        debug!(
            "committing {} writes to collection '{}'",
            writes.len(),
            collection
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Commit(format!("HTTP {}: {}", status, detail)));
        }
        Ok(())
    }
}
