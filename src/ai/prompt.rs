//! Prompt construction for race predictions and insights

use crate::data::RaceCatalog;
use crate::models::Race;

/// Runners included in a prediction prompt
pub const MAX_PROMPT_HORSES: usize = 4;

/// System instruction for every completion call
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert Australian horse racing analyst. \
You give concise, data-driven betting analysis using decimal odds.";

/// One line per runner for the first [`MAX_PROMPT_HORSES`] horses
pub fn summarize_horses(race: &Race) -> String {
    race.horses
        .iter()
        .take(MAX_PROMPT_HORSES)
        .map(|h| {
            format!(
                "- {} (#{}): odds ${:.2}, jockey {}, trainer {}, form {}, trend {} ({:+.2})",
                h.name, h.number, h.odds, h.jockey, h.trainer, h.form, h.trend, h.trend_value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prediction prompt asking for a JSON object
pub fn build_prediction_prompt(race: &Race) -> String {
    format!(
        r#"Analyse this race and pick a winner.

Race: {name}
Track: {track} ({state}), {distance}m, {class}, prize {prize}
Track condition: {going}

Runners:
{runners}

Respond with a JSON object only, using exactly these fields:
{{
  "top_pick": "horse name",
  "second_pick": "horse name",
  "confidence": 0-100,
  "analysis": "one to two sentences explaining the pick",
  "bet_type": "WIN" | "PLACE" | "EACH WAY"
}}"#,
        name = race.name,
        track = race.track,
        state = race.state,
        distance = race.distance,
        class = race.class,
        prize = race.prize,
        going = race.going,
        runners = summarize_horses(race),
    )
}

/// Free-form insight prompt with a compact card summary
pub fn build_insight_prompt(query: &str, catalog: &RaceCatalog) -> String {
    let card = catalog
        .races()
        .iter()
        .map(|race| {
            let favourite = race
                .horses
                .iter()
                .min_by(|a, b| a.odds.total_cmp(&b.odds))
                .map(|h| format!("{} ${:.2}", h.name, h.odds))
                .unwrap_or_else(|| "no runners".to_string());
            format!(
                "- {} ({}, {}m, {}): favourite {}",
                race.name, race.state, race.distance, race.going, favourite
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Today's card:\n{}\n\nQuestion: {}\n\nAnswer in at most three sentences.",
        card,
        query.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_limited_to_four_horses() {
        let catalog = RaceCatalog::sample();
        let race = catalog.get("hr1").unwrap();
        assert_eq!(race.horses.len(), 5);

        let summary = summarize_horses(race);
        assert_eq!(summary.lines().count(), MAX_PROMPT_HORSES);
        assert!(summary.contains("Thunder Strike (#1): odds $3.20"));
        assert!(summary.contains("jockey J. McDonald"));
        assert!(summary.contains("trend up (+0.40)"));
        assert!(!summary.contains("Harbour Lights"));
    }

    #[test]
    fn test_prediction_prompt_fields() {
        let catalog = RaceCatalog::sample();
        let prompt = build_prediction_prompt(catalog.get("hr3").unwrap());

        assert!(prompt.contains("Race: Flemington - 4:30 PM"));
        assert!(prompt.contains("Track condition: Good 3"));
        for field in ["top_pick", "second_pick", "confidence", "analysis", "bet_type"] {
            assert!(prompt.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_insight_prompt_lists_favourites() {
        let catalog = RaceCatalog::sample();
        let prompt = build_insight_prompt("  Who is the best bet today? ", &catalog);

        assert!(prompt.contains("favourite Starlight Express $1.95"));
        assert!(prompt.ends_with("Answer in at most three sentences."));
        assert!(prompt.contains("Question: Who is the best bet today?\n"));
    }
}
