use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of recent odds movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Runner in a race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    pub name: String,
    pub number: u8, // post position
    pub odds: f64,  // decimal win odds
    pub place_odds: f64,
    pub jockey: String,
    pub trainer: String,
    pub weight: f64, // kg
    pub form: String,
    pub trend: Trend,
    pub trend_value: f64,
}

/// Race card entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: String,
    /// Display name, e.g. "Royal Randwick - 2:15 PM"
    pub name: String,
    pub track: String,
    pub state: String,
    pub distance: u32, // metres
    pub class: String,
    pub prize: String,
    pub going: String,
    pub featured: bool,
    pub horses: Vec<Horse>,
}

/// Recommended bet type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetType {
    #[serde(rename = "WIN")]
    Win,
    #[serde(rename = "PLACE")]
    Place,
    #[serde(rename = "EACH WAY")]
    EachWay,
}

impl BetType {
    /// Lenient parse of free-form bet type text ("each-way", "Each Way", "E/W")
    pub fn parse(text: &str) -> Option<Self> {
        let normalized: String = text
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();

        match normalized.as_str() {
            "WIN" => Some(BetType::Win),
            "PLACE" => Some(BetType::Place),
            "EACHWAY" | "EW" => Some(BetType::EachWay),
            _ => None,
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetType::Win => write!(f, "WIN"),
            BetType::Place => write!(f, "PLACE"),
            BetType::EachWay => write!(f, "EACH WAY"),
        }
    }
}

/// Where a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// External completion service
    Ai,
    /// Local odds-based heuristic over sample data
    Sample,
}

/// Race prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub race_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_pick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_pick: Option<String>,
    pub confidence: u8, // 0-100
    pub analysis: String,
    pub bet_type: BetType,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub generated_at: String,
}

/// Horse with a significant odds change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketMover {
    pub position: u8,
    pub horse: String,
    pub track: String,
    pub change: String,
    pub direction: Trend,
    pub current_odds: f64,
}

/// Expert tip for an upcoming race
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertTip {
    pub id: String,
    pub race: String,
    pub track: String,
    pub tip: String,
    pub confidence: u8,
    pub reason: String,
}

/// Longshot tip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roughie {
    pub horse: String,
    pub race_id: String,
    pub race: String,
    pub track: String,
    pub odds: f64,
    pub trend: Trend,
    pub trend_value: f64,
    pub reason: String,
}

/// Odds board response
#[derive(Debug, Serialize, Deserialize)]
pub struct OddsResponse {
    pub events: Vec<Race>,
    pub timestamp: String,
    pub status: String,
}

/// Market movers response
#[derive(Debug, Serialize, Deserialize)]
pub struct MoversResponse {
    pub movers: Vec<MarketMover>,
    pub total: usize,
    pub timestamp: String,
}

/// Expert tips response
#[derive(Debug, Serialize, Deserialize)]
pub struct TipsResponse {
    pub predictions: Vec<ExpertTip>,
    pub total: usize,
    pub timestamp: String,
}

/// Roughies response
#[derive(Debug, Serialize, Deserialize)]
pub struct RoughiesResponse {
    pub roughies: Vec<Roughie>,
    pub total: usize,
    pub timestamp: String,
}

/// Insight request
#[derive(Debug, Serialize, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub query: String,
}

/// Insight response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResponse {
    pub query: String,
    pub insight: String,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ai_enabled: bool,
    pub timestamp: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
