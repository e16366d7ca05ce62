//! Discovery and ingestion of schedule data files.
//!
//! Scans a directory of JSON array files, validates every record
//! independently, and accumulates the accepted entries together with
//! bookkeeping about what was skipped. File-level problems (unreadable,
//! unparseable, not an array) skip that file and nothing else.

pub mod loader;

pub use loader::{collect_entries_from_value, load_schedule_dir, load_schedule_file, LoadReport};
