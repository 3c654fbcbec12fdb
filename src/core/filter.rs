//! Race filtering by track, featured flag and jump time
//!
//! Filters compose by sequential intersection: track, then featured, then
//! time range. Each step only narrows the candidate set, so the result is
//! independent of ordering.
//!
//! # Example
//!
//! ```
//! use racing::core::filter::RaceFilter;
//! use racing::data::RaceCatalog;
//!
//! let catalog = RaceCatalog::sample();
//! let filter = RaceFilter {
//!     time_from: Some("2:00 PM".to_string()),
//!     time_to: Some("3:00 PM".to_string()),
//!     ..Default::default()
//! };
//! let result = filter.apply(catalog.races());
//! assert!(result.races.iter().any(|r| r.id == "hr1"));
//! ```

use serde::{Deserialize, Serialize};

use crate::data::time::{parse_time_to_minutes, race_minutes};
use crate::models::Race;

/// Track value meaning "no track filter"
const ALL_TRACKS: &str = "all";

/// Optional filter criteria, each independently applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Filtered race listing with an echo of the applied filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResult {
    pub races: Vec<Race>,
    pub count: usize,
    pub filters: RaceFilter,
}

impl RaceFilter {
    /// Track to match, or None when absent, blank or "all"
    fn track_filter(&self) -> Option<&str> {
        self.track
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(ALL_TRACKS))
    }

    /// Inclusive (from, to) bounds in minutes since midnight
    fn time_bounds(&self) -> (Option<u32>, Option<u32>) {
        (
            self.time_from.as_deref().map(parse_time_to_minutes),
            self.time_to.as_deref().map(parse_time_to_minutes),
        )
    }

    fn matches_track(&self, race: &Race) -> bool {
        match self.track_filter() {
            Some(track) => race.track.eq_ignore_ascii_case(track),
            None => true,
        }
    }

    fn matches_featured(&self, race: &Race) -> bool {
        !self.featured.unwrap_or(false) || race.featured
    }

    fn matches_time(race: &Race, from: Option<u32>, to: Option<u32>) -> bool {
        // Races without a readable time are kept
        let Some(minutes) = race_minutes(&race.name) else {
            return true;
        };

        from.map_or(true, |f| minutes >= f) && to.map_or(true, |t| minutes <= t)
    }

    /// Apply the filter to a catalog snapshot
    pub fn apply(&self, races: &[Race]) -> FilterResult {
        let mut candidates: Vec<&Race> = races.iter().collect();

        if self.track_filter().is_some() {
            candidates.retain(|r| self.matches_track(r));
        }

        if self.featured.unwrap_or(false) {
            candidates.retain(|r| self.matches_featured(r));
        }

        let (from, to) = self.time_bounds();
        if from.is_some() || to.is_some() {
            candidates.retain(|r| Self::matches_time(r, from, to));
        }

        let races: Vec<Race> = candidates.into_iter().cloned().collect();

        FilterResult {
            count: races.len(),
            races,
            filters: self.clone(),
        }
    }

    /// True when no criterion would remove anything
    pub fn is_empty(&self) -> bool {
        let (from, to) = self.time_bounds();
        self.track_filter().is_none()
            && !self.featured.unwrap_or(false)
            && from.is_none()
            && to.is_none()
    }
}
