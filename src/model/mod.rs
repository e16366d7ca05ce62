//! Typed domain records for schedule uploads.
//!
//! Raw JSON records stay untyped until the validator accepts them; from that
//! point on the rest of the pipeline only ever sees the structures defined
//! here, so no downstream code has to re-check field types.

pub mod entry;

pub use entry::{ScheduleEntry, SectionType, UploadRecord, UploadSummary};
