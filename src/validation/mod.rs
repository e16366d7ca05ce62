//! Schedule entry validation.
//!
//! Decides, per raw JSON record, whether the record is a well-formed
//! schedule entry. Validation is a pure function with no storage
//! dependency; a rejected record produces a human-readable reason and never
//! affects its siblings.

pub mod validator;


pub use validator::{
    validate_entry, validate_time_format, validate_uuid_v4, EntryRejection, REQUIRED_FIELDS,
};
