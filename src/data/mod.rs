//! Race data: the in-memory catalog and clock-time parsing

pub mod catalog;
pub mod time;

// Re-export commonly used types
pub use catalog::{RaceCatalog, ROUGHIE_MIN_ODDS};
pub use time::{extract_time, parse_time_to_minutes, race_minutes, TimeParser};
