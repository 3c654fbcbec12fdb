//! Clock-time parsing for race display names
//!
//! Race names carry their jump time, e.g. "Royal Randwick - 2:15 PM".
//! Times are compared as minutes since midnight on a 12-hour clock.
//!
//! # Example
//!
//! ```
//! use racing::data::time::{extract_time, parse_time_to_minutes};
//!
//! let time = extract_time("Royal Randwick - 2:15 PM").unwrap();
//! assert_eq!(time, "2:15 PM");
//! assert_eq!(parse_time_to_minutes(&time), 14 * 60 + 15);
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Value returned for time strings outside the `H:MM AM|PM` grammar.
///
/// A malformed time therefore sorts as midnight.
pub const MALFORMED_TIME_MINUTES: u32 = 0;

/// Regex-backed clock time parser
pub struct TimeParser {
    embedded_pattern: Regex,
    strict_pattern: Regex,
}

impl TimeParser {
    pub fn new() -> Self {
        Self {
            embedded_pattern: Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*([AP]M)\b").unwrap(),
            strict_pattern: Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*([AP]M)\s*$").unwrap(),
        }
    }

    /// Find the first clock time in `text`, normalised to "H:MM AM|PM"
    pub fn extract(&self, text: &str) -> Option<String> {
        let caps = self.embedded_pattern.captures(text)?;
        let hour: u32 = caps[1].parse().ok()?;
        Some(format!("{}:{} {}", hour, &caps[2], caps[3].to_uppercase()))
    }

    /// Convert "H:MM AM|PM" to minutes since midnight
    ///
    /// Returns [`MALFORMED_TIME_MINUTES`] when the string does not match
    /// or the hour/minute is out of range.
    pub fn to_minutes(&self, time: &str) -> u32 {
        self.try_to_minutes(time).unwrap_or(MALFORMED_TIME_MINUTES)
    }

    fn try_to_minutes(&self, time: &str) -> Option<u32> {
        let caps = self.strict_pattern.captures(time)?;
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;

        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }

        let is_pm = caps[3].eq_ignore_ascii_case("PM");
        let hour24 = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };

        Some(hour24 * 60 + minute)
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parser() -> &'static TimeParser {
    static PARSER: OnceLock<TimeParser> = OnceLock::new();
    PARSER.get_or_init(TimeParser::new)
}

/// Extract the clock time embedded in a race display name
pub fn extract_time(race_name: &str) -> Option<String> {
    parser().extract(race_name)
}

/// Convert a clock time string to minutes since midnight (malformed → 0)
pub fn parse_time_to_minutes(time: &str) -> u32 {
    parser().to_minutes(time)
}

/// Minutes since midnight for a race display name, if it carries a time
pub fn race_minutes(race_name: &str) -> Option<u32> {
    extract_time(race_name).map(|t| parse_time_to_minutes(&t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_time_from_race_name() {
        assert_eq!(
            extract_time("Royal Randwick - 2:15 PM"),
            Some("2:15 PM".to_string())
        );
        assert_eq!(
            extract_time("Flemington - 11:05 am"),
            Some("11:05 AM".to_string())
        );
        assert_eq!(extract_time("Caulfield-5:15PM"), Some("5:15 PM".to_string()));
    }

    #[test]
    fn test_extract_time_missing() {
        assert_eq!(extract_time("Moonee Valley Night Races"), None);
        assert_eq!(extract_time(""), None);
        assert_eq!(extract_time("Race 7 - 1400m"), None);
    }

    #[test]
    fn test_extract_time_takes_first_match() {
        assert_eq!(
            extract_time("Rosehill 1:30 PM (was 1:00 PM)"),
            Some("1:30 PM".to_string())
        );
    }

    #[test]
    fn test_extracted_time_always_parses() {
        for name in [
            "Royal Randwick - 2:15 PM",
            "Eagle Farm - 12:40 pm",
            "Morphettville 10:05AM",
        ] {
            let time = extract_time(name).unwrap();
            assert!(parser().try_to_minutes(&time).is_some(), "{}", time);
        }
    }

    #[test]
    fn test_parse_time_to_minutes() {
        assert_eq!(parse_time_to_minutes("2:15 PM"), 14 * 60 + 15);
        assert_eq!(parse_time_to_minutes("9:30 AM"), 9 * 60 + 30);
        assert_eq!(parse_time_to_minutes("11:59 pm"), 23 * 60 + 59);
    }

    #[test]
    fn test_parse_time_noon_and_midnight() {
        assert_eq!(parse_time_to_minutes("12:00 AM"), 0);
        assert_eq!(parse_time_to_minutes("12:30 AM"), 30);
        assert_eq!(parse_time_to_minutes("12:00 PM"), 12 * 60);
        assert_eq!(parse_time_to_minutes("12:45 PM"), 12 * 60 + 45);
    }

    #[test]
    fn test_parse_time_malformed_is_zero() {
        assert_eq!(parse_time_to_minutes("14:00"), MALFORMED_TIME_MINUTES);
        assert_eq!(parse_time_to_minutes("13:00 PM"), MALFORMED_TIME_MINUTES);
        assert_eq!(parse_time_to_minutes("0:15 AM"), MALFORMED_TIME_MINUTES);
        assert_eq!(parse_time_to_minutes("2:60 PM"), MALFORMED_TIME_MINUTES);
        assert_eq!(parse_time_to_minutes("soon"), MALFORMED_TIME_MINUTES);
        assert_eq!(parse_time_to_minutes(""), MALFORMED_TIME_MINUTES);
    }

    #[test]
    fn test_parse_time_monotonic_within_day() {
        let times = [
            "12:00 AM", "12:59 AM", "1:00 AM", "9:45 AM", "11:59 AM", "12:00 PM", "12:30 PM",
            "1:00 PM", "2:15 PM", "11:59 PM",
        ];

        for pair in times.windows(2) {
            assert!(
                parse_time_to_minutes(pair[0]) < parse_time_to_minutes(pair[1]),
                "{} should be before {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_race_minutes() {
        assert_eq!(race_minutes("Flemington - 4:30 PM"), Some(16 * 60 + 30));
        assert_eq!(race_minutes("No time here"), None);
    }
}
