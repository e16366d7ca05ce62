use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{ScheduleEntry, SectionType};

/// Fields every entry must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "days", "startTime", "endTime", "type"];

/// Why an entry was rejected.
///
/// The `Display` output is the reason surfaced to the operator; messages
/// follow the wording the schedule authors already know from earlier runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryRejection {
    #[error("entry must be a JSON object")]
    NotAnObject,

    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("invalid type '{value}'; must be one of: main, internal, gospel, food")]
    InvalidType { value: String },

    #[error("invalid {field} format '{value}'; expected HH:MM")]
    InvalidTime { field: &'static str, value: String },

    #[error("days must be a non-empty array of integers")]
    InvalidDays,

    #[error("{field} must be a string")]
    NotAString { field: &'static str },

    #[error("speakers must be an array of speaker IDs")]
    SpeakersNotAnArray,

    #[error("all speaker IDs must be strings")]
    SpeakerNotAString,

    #[error("invalid UUID v4 format for 'id': '{value}'; expected xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx")]
    InvalidId { value: String },
}

/// Check an `HH:MM` 24-hour time string.
///
/// The text must split on `:` into exactly two integer-parseable parts with
/// hour 0-23 and minute 0-59. Zero padding is not required, so `"9:3"` is
/// accepted; `"24:00"` and `"12"` are not.
pub fn validate_time_format(value: &str) -> bool {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 2 {
        return false;
    }
    let (hour, minute) = match (parts[0].trim().parse::<i64>(), parts[1].trim().parse::<i64>()) {
        (Ok(hour), Ok(minute)) => (hour, minute),
        _ => return false,
    };
    (0..=23).contains(&hour) && (0..=59).contains(&minute)
}

/// Check that a string parses as a UUID whose version field is 4.
pub fn validate_uuid_v4(value: &str) -> bool {
    Uuid::parse_str(value)
        .map(|uuid| uuid.get_version_num() == 4)
        .unwrap_or(false)
}

/// Validate one raw record, producing a typed entry or a rejection reason.
///
/// Checks are applied in a fixed order and the first failure wins. A
/// structurally unexpected record (not an object, wrong field types) is a
/// rejection like any other, never a panic or a propagated parse error.
pub fn validate_entry(raw: &Value) -> Result<ScheduleEntry, EntryRejection> {
    let obj = raw.as_object().ok_or(EntryRejection::NotAnObject)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !obj.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EntryRejection::MissingFields { fields: missing });
    }

    let section_type = match obj["type"].as_str() {
        Some(text) => text
            .parse::<SectionType>()
            .map_err(|_| EntryRejection::InvalidType {
                value: text.to_string(),
            })?,
        None => {
            return Err(EntryRejection::InvalidType {
                value: display_value(&obj["type"]),
            })
        }
    };

    let start_time = require_time(obj, "startTime")?;
    let end_time = require_time(obj, "endTime")?;
    let days = require_days(obj)?;

    let name = match obj["name"].as_str() {
        Some(text) => text.to_string(),
        None => return Err(EntryRejection::NotAString { field: "name" }),
    };

    let place = optional_text(obj, "place")?;

    let speakers = match obj.get("speakers") {
        None => None,
        Some(Value::Array(items)) => {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(id) => ids.push(id.to_string()),
                    None => return Err(EntryRejection::SpeakerNotAString),
                }
            }
            Some(ids)
        }
        Some(_) => return Err(EntryRejection::SpeakersNotAnArray),
    };

    let leader = optional_text(obj, "leader")?;
    let description = optional_text(obj, "description")?;

    let id = match obj.get("id") {
        None => None,
        Some(Value::String(text)) => match Uuid::parse_str(text) {
            Ok(uuid) if uuid.get_version_num() == 4 => Some(uuid),
            _ => {
                return Err(EntryRejection::InvalidId {
                    value: text.clone(),
                })
            }
        },
        Some(_) => return Err(EntryRejection::NotAString { field: "id" }),
    };

    Ok(ScheduleEntry {
        name,
        days,
        start_time,
        end_time,
        section_type,
        place,
        leader,
        description,
        speakers,
        id,
    })
}

fn require_time(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String, EntryRejection> {
    let value = &obj[field];
    if let Some(text) = value.as_str() {
        if validate_time_format(text) {
            return Ok(text.to_string());
        }
    }
    Err(EntryRejection::InvalidTime {
        field,
        value: display_value(value),
    })
}

fn require_days(obj: &Map<String, Value>) -> Result<Vec<i64>, EntryRejection> {
    let items = match obj["days"].as_array() {
        Some(items) if !items.is_empty() => items,
        _ => return Err(EntryRejection::InvalidDays),
    };

    let mut days = Vec::with_capacity(items.len());
    for item in items {
        // as_i64 is None for floats and numeric strings alike.
        match item.as_i64() {
            Some(day) => days.push(day),
            None => return Err(EntryRejection::InvalidDays),
        }
    }
    Ok(days)
}

fn optional_text(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, EntryRejection> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(EntryRejection::NotAString { field }),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
