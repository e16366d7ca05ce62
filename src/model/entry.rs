use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Section category of a schedule entry.
///
/// The wire representation is the lowercase name; parsing is case-sensitive
/// because the document consumers match on the exact literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Main,
    Internal,
    Gospel,
    Food,
}

impl SectionType {
    /// All accepted values, in documentation order.
    pub const ALL: [SectionType; 4] = [
        SectionType::Main,
        SectionType::Internal,
        SectionType::Gospel,
        SectionType::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Main => "main",
            SectionType::Internal => "internal",
            SectionType::Gospel => "gospel",
            SectionType::Food => "food",
        }
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(SectionType::Main),
            "internal" => Ok(SectionType::Internal),
            "gospel" => Ok(SectionType::Gospel),
            "food" => Ok(SectionType::Food),
            other => Err(format!("unknown section type: {}", other)),
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule entry that has passed validation.
///
/// Only the validator constructs these; every field is known to be
/// well-typed, `days` is non-empty, the time fields are `HH:MM`, and `id`
/// (when present) is a genuine UUID v4 asserted by the data author as the
/// stable document key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub name: String,
    pub days: Vec<i64>,
    pub start_time: String,
    pub end_time: String,
    pub section_type: SectionType,
    pub place: Option<String>,
    pub leader: Option<String>,
    pub description: Option<String>,
    pub speakers: Option<Vec<String>>,
    pub id: Option<Uuid>,
}

impl ScheduleEntry {
    /// Build the document payload for this entry under the given identifier.
    ///
    /// Required fields are copied verbatim; optional fields only when
    /// present. The source `id` is never emitted as a field; its value is
    /// promoted into `uid` and the document slot by the uploader.
    pub fn upload_record(&self, uid: String) -> UploadRecord {
        UploadRecord {
            uid,
            name: self.name.clone(),
            days: self.days.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            section_type: self.section_type,
            place: self.place.clone(),
            speakers: self.speakers.clone(),
            leader: self.leader.clone(),
            description: self.description.clone(),
        }
    }
}

/// Wire shape of one uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub uid: String,
    pub name: String,
    pub days: Vec<i64>,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speakers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UploadRecord {
    /// Render the record as the JSON object written to the store.
    ///
    /// Equivalent to serializing with serde but infallible, which keeps the
    /// uploader's per-chunk bookkeeping free of phantom error paths.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("uid".to_string(), Value::String(self.uid.clone()));
        doc.insert("name".to_string(), Value::String(self.name.clone()));
        doc.insert(
            "days".to_string(),
            Value::Array(self.days.iter().map(|d| Value::from(*d)).collect()),
        );
        doc.insert(
            "startTime".to_string(),
            Value::String(self.start_time.clone()),
        );
        doc.insert("endTime".to_string(), Value::String(self.end_time.clone()));
        doc.insert(
            "type".to_string(),
            Value::String(self.section_type.as_str().to_string()),
        );

        if let Some(place) = &self.place {
            doc.insert("place".to_string(), Value::String(place.clone()));
        }
        if let Some(speakers) = &self.speakers {
            doc.insert(
                "speakers".to_string(),
                Value::Array(
                    speakers
                        .iter()
                        .map(|s| Value::String(s.clone()))
                        .collect(),
                ),
            );
        }
        if let Some(leader) = &self.leader {
            doc.insert("leader".to_string(), Value::String(leader.clone()));
        }
        if let Some(description) = &self.description {
            doc.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }

        Value::Object(doc)
    }
}

/// Aggregate outcome of one upload run.
///
/// Identifier counters are incremented for every entry that reaches a commit
/// attempt, regardless of whether that attempt succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Entries written by batches that committed successfully.
    pub uploaded: usize,
    /// Entries belonging to batches whose commit failed.
    pub failed: usize,
    /// Entries that reused a caller-supplied stable identifier.
    pub stable_ids: usize,
    /// Entries that received a freshly generated UUID v4.
    pub generated_ids: usize,
    /// Number of batch commits attempted.
    pub batches_attempted: usize,
}

impl UploadSummary {
    /// Total entries processed (uploaded + failed).
    pub fn total(&self) -> usize {
        self.uploaded + self.failed
    }

    /// True when at least one batch failed; the run completed but degraded.
    pub fn is_degraded(&self) -> bool {
        self.failed > 0
    }
}
