//! In-memory race catalog
//!
//! Holds the sample race cards, market movers and expert tips served by the
//! API. Built once at startup and never mutated.

use crate::models::{ExpertTip, Horse, MarketMover, Race, Roughie, Trend};

/// Minimum win odds for a runner to count as a roughie
pub const ROUGHIE_MIN_ODDS: f64 = 8.0;

/// Read-only collection of races and related tables
#[derive(Debug, Clone, Default)]
pub struct RaceCatalog {
    races: Vec<Race>,
    market_movers: Vec<MarketMover>,
    expert_tips: Vec<ExpertTip>,
}

impl RaceCatalog {
    pub fn new(
        races: Vec<Race>,
        market_movers: Vec<MarketMover>,
        expert_tips: Vec<ExpertTip>,
    ) -> Self {
        Self {
            races,
            market_movers,
            expert_tips,
        }
    }

    /// Catalog populated with the bundled sample meeting
    pub fn sample() -> Self {
        Self::new(sample_races(), sample_market_movers(), sample_expert_tips())
    }

    pub fn races(&self) -> &[Race] {
        &self.races
    }

    /// Look up a race by identifier
    pub fn get(&self, id: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.id == id)
    }

    pub fn market_movers(&self) -> &[MarketMover] {
        &self.market_movers
    }

    pub fn expert_tips(&self) -> &[ExpertTip] {
        &self.expert_tips
    }

    /// Distinct track names in catalog order
    pub fn tracks(&self) -> Vec<String> {
        let mut tracks: Vec<String> = Vec::new();
        for race in &self.races {
            if !tracks.iter().any(|t| t.eq_ignore_ascii_case(&race.track)) {
                tracks.push(race.track.clone());
            }
        }
        tracks
    }

    /// Longshots at or above [`ROUGHIE_MIN_ODDS`]
    ///
    /// Ordered by trend value descending (firming runners first), then odds.
    pub fn roughies(&self) -> Vec<Roughie> {
        let mut roughies: Vec<Roughie> = self
            .races
            .iter()
            .flat_map(|race| {
                race.horses
                    .iter()
                    .filter(|h| h.odds >= ROUGHIE_MIN_ODDS)
                    .map(move |h| Roughie {
                        horse: h.name.clone(),
                        race_id: race.id.clone(),
                        race: race.name.clone(),
                        track: race.track.clone(),
                        odds: h.odds,
                        trend: h.trend,
                        trend_value: h.trend_value,
                        reason: roughie_reason(h, race),
                    })
            })
            .collect();

        roughies.sort_by(|a, b| {
            b.trend_value
                .total_cmp(&a.trend_value)
                .then(a.odds.total_cmp(&b.odds))
        });

        roughies
    }
}

fn roughie_reason(horse: &Horse, race: &Race) -> String {
    let movement = match horse.trend {
        Trend::Up => "Money coming in",
        Trend::Down => "Drifting in the market",
        Trend::Stable => "Steady in the market",
    };
    format!(
        "{} at ${:.2}. Form {} for {}, suits the {} going over {}m.",
        movement, horse.odds, horse.form, horse.trainer, race.going, race.distance
    )
}

#[allow(clippy::too_many_arguments)]
fn horse(
    name: &str,
    number: u8,
    odds: f64,
    place_odds: f64,
    jockey: &str,
    trainer: &str,
    weight: f64,
    form: &str,
    trend: Trend,
    trend_value: f64,
) -> Horse {
    Horse {
        name: name.to_string(),
        number,
        odds,
        place_odds,
        jockey: jockey.to_string(),
        trainer: trainer.to_string(),
        weight,
        form: form.to_string(),
        trend,
        trend_value,
    }
}

#[allow(clippy::too_many_arguments)]
fn race(
    id: &str,
    name: &str,
    track: &str,
    state: &str,
    distance: u32,
    class: &str,
    prize: &str,
    going: &str,
    featured: bool,
    horses: Vec<Horse>,
) -> Race {
    Race {
        id: id.to_string(),
        name: name.to_string(),
        track: track.to_string(),
        state: state.to_string(),
        distance,
        class: class.to_string(),
        prize: prize.to_string(),
        going: going.to_string(),
        featured,
        horses,
    }
}

#[rustfmt::skip]
fn sample_races() -> Vec<Race> {
    vec![
        race(
            "hr1",
            "Royal Randwick - 2:15 PM",
            "Randwick",
            "NSW",
            1400,
            "Group 3",
            "$160,000",
            "Good 4",
            true,
            vec![
                horse("Thunder Strike", 1, 3.20, 1.45, "J. McDonald", "C. Waller", 58.5, "2-1-3", Trend::Up, 0.40),
                horse("Dancing Flame", 2, 2.80, 1.35, "N. Rawiller", "G. Waterhouse & A. Bott", 57.0, "1-1-2", Trend::Down, -0.20),
                horse("Ocean Breeze", 3, 4.50, 1.80, "T. Berry", "J. Cummings", 56.5, "3-2-1", Trend::Stable, 0.00),
                horse("Desert Wind", 4, 5.50, 2.10, "K. McEvoy", "P. Snowden", 55.0, "4-3-2", Trend::Up, 0.15),
                horse("Harbour Lights", 5, 12.00, 3.60, "R. King", "B. Pearce", 54.0, "6-5-4", Trend::Up, 0.80),
            ],
        ),
        race(
            "hr2",
            "Moonee Valley - 3:45 PM",
            "Moonee Valley",
            "VIC",
            1200,
            "Benchmark 78",
            "$80,000",
            "Soft 5",
            false,
            vec![
                horse("Silver Bullet", 1, 2.50, 1.30, "D. Oliver", "C. Maher", 58.0, "1-2-1", Trend::Down, -0.15),
                horse("Golden Phoenix", 2, 3.50, 1.55, "M. Zahra", "A. Freedman", 57.5, "2-3-1", Trend::Down, -0.30),
                horse("Night Watch", 3, 6.00, 2.20, "J. Kah", "M. Price & M. Kent Jnr", 56.0, "3-4-2", Trend::Stable, 0.00),
                horse("Copper Coast", 4, 9.50, 3.10, "B. Melham", "T. Busuttin & N. Young", 54.5, "5-2-6", Trend::Up, 0.50),
            ],
        ),
        race(
            "hr3",
            "Flemington - 4:30 PM",
            "Flemington",
            "VIC",
            1600,
            "Group 2",
            "$300,000",
            "Good 3",
            true,
            vec![
                horse("Midnight Runner", 1, 4.50, 1.75, "J. Allen", "C. Waller", 57.0, "3-1-2", Trend::Up, 0.25),
                horse("Starlight Express", 2, 1.95, 1.15, "J. McNeil", "A. Freedman", 58.5, "1-1-1", Trend::Stable, 0.00),
                horse("Crimson Tide", 3, 7.00, 2.40, "C. Williams", "K. Lees", 56.0, "2-4-3", Trend::Down, -0.40),
                horse("Southern Cross", 4, 15.00, 4.20, "E. Brown", "L. Freedman", 54.0, "7-6-3", Trend::Up, 0.35),
            ],
        ),
        race(
            "hr4",
            "Caulfield - 5:15 PM",
            "Caulfield",
            "VIC",
            2000,
            "Listed",
            "$200,000",
            "Good 4",
            false,
            vec![
                horse("Royal Ascot", 1, 2.15, 1.20, "B. Shinn", "C. Maher", 58.0, "1-2-2", Trend::Stable, 0.00),
                horse("Lightning Storm", 2, 4.20, 1.70, "D. Lane", "P. Moody & K. Coleman", 57.0, "2-1-4", Trend::Up, 0.15),
                horse("Wild Card", 3, 8.00, 2.80, "L. Currie", "M. Moroney", 55.5, "4-3-5", Trend::Stable, 0.00),
                horse("Sea Legs", 4, 21.00, 5.50, "J. Mott", "D. Weir", 54.0, "9-7-8", Trend::Down, -1.50),
            ],
        ),
        race(
            "hr5",
            "Eagle Farm - 1:20 PM",
            "Eagle Farm",
            "QLD",
            1300,
            "Class 6",
            "$45,000",
            "Heavy 8",
            false,
            vec![
                horse("Sunshine Coast", 1, 3.80, 1.60, "J. Orman", "T. Gollan", 57.5, "1-4-2", Trend::Up, 0.30),
                horse("River Rocket", 2, 3.80, 1.60, "M. McGillivray", "C. Waller", 57.0, "2-2-3", Trend::Stable, 0.00),
                horse("Brisbane Belle", 3, 5.00, 1.90, "R. Bayliss", "B. Cummings", 55.0, "3-1-6", Trend::Down, -0.25),
            ],
        ),
        race(
            "hr6",
            "Morphettville - 12:40 PM",
            "Morphettville",
            "SA",
            1100,
            "Maiden",
            "$35,000",
            "Good 4",
            true,
            vec![
                horse("Adelaide Star", 1, 2.60, 1.30, "J. Toeroek", "T. Hayes", 58.0, "2-2", Trend::Up, 0.20),
                horse("Glenelg Gem", 2, 4.00, 1.65, "B. Price", "M. Hickmott", 57.0, "3-4", Trend::Stable, 0.00),
                horse("Barossa Boy", 3, 10.00, 3.20, "K. Crowther", "T. Hayes", 56.0, "8-5", Trend::Up, 0.90),
            ],
        ),
    ]
}

fn sample_market_movers() -> Vec<MarketMover> {
    vec![
        MarketMover {
            position: 1,
            horse: "Thunder Strike".to_string(),
            track: "Randwick".to_string(),
            change: "+0.40".to_string(),
            direction: Trend::Up,
            current_odds: 3.20,
        },
        MarketMover {
            position: 2,
            horse: "Midnight Runner".to_string(),
            track: "Flemington".to_string(),
            change: "+0.25".to_string(),
            direction: Trend::Up,
            current_odds: 4.50,
        },
        MarketMover {
            position: 3,
            horse: "Golden Phoenix".to_string(),
            track: "Moonee Valley".to_string(),
            change: "-0.30".to_string(),
            direction: Trend::Down,
            current_odds: 3.50,
        },
        MarketMover {
            position: 4,
            horse: "Lightning Storm".to_string(),
            track: "Caulfield".to_string(),
            change: "+0.15".to_string(),
            direction: Trend::Up,
            current_odds: 4.20,
        },
    ]
}

fn sample_expert_tips() -> Vec<ExpertTip> {
    vec![
        ExpertTip {
            id: "pred1".to_string(),
            race: "Royal Randwick - 2:15 PM".to_string(),
            track: "Randwick".to_string(),
            tip: "Thunder Strike".to_string(),
            confidence: 78,
            reason: "Strong recent form, excellent track record at Randwick".to_string(),
        },
        ExpertTip {
            id: "pred2".to_string(),
            race: "Moonee Valley - 3:45 PM".to_string(),
            track: "Moonee Valley".to_string(),
            tip: "Silver Bullet".to_string(),
            confidence: 65,
            reason: "Consistent performer, favorable track conditions".to_string(),
        },
        ExpertTip {
            id: "pred3".to_string(),
            race: "Flemington - 4:30 PM".to_string(),
            track: "Flemington".to_string(),
            tip: "Starlight Express".to_string(),
            confidence: 82,
            reason: "Outstanding recent wins, perfect jockey-horse combination".to_string(),
        },
        ExpertTip {
            id: "pred4".to_string(),
            race: "Caulfield - 5:15 PM".to_string(),
            track: "Caulfield".to_string(),
            tip: "Royal Ascot".to_string(),
            confidence: 71,
            reason: "Strong field position, excellent barrier draw".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_has_races() {
        let catalog = RaceCatalog::sample();
        assert_eq!(catalog.races().len(), 6);
        assert_eq!(catalog.market_movers().len(), 4);
        assert_eq!(catalog.expert_tips().len(), 4);

        for race in catalog.races() {
            assert!(!race.horses.is_empty(), "{} has no runners", race.id);
            for horse in &race.horses {
                assert!(horse.odds > 0.0);
            }
        }
    }

    #[test]
    fn test_get_race() {
        let catalog = RaceCatalog::sample();
        let race = catalog.get("hr1").unwrap();
        assert_eq!(race.track, "Randwick");
        assert_eq!(race.name, "Royal Randwick - 2:15 PM");
        assert!(catalog.get("hr99").is_none());
    }

    #[test]
    fn test_tracks_are_distinct() {
        let catalog = RaceCatalog::sample();
        let tracks = catalog.tracks();
        assert_eq!(tracks.len(), 6);
        assert_eq!(tracks[0], "Randwick");
    }

    #[test]
    fn test_roughies_threshold_and_order() {
        let catalog = RaceCatalog::sample();
        let roughies = catalog.roughies();

        assert!(!roughies.is_empty());
        for r in &roughies {
            assert!(r.odds >= ROUGHIE_MIN_ODDS);
        }
        for pair in roughies.windows(2) {
            assert!(pair[0].trend_value >= pair[1].trend_value);
        }
        assert_eq!(roughies[0].horse, "Barossa Boy");
        assert_eq!(roughies.last().unwrap().horse, "Sea Legs");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = RaceCatalog::default();
        assert!(catalog.races().is_empty());
        assert!(catalog.roughies().is_empty());
        assert!(catalog.tracks().is_empty());
    }
}
