//! Best-effort decoding of completion replies
//!
//! Models wrap JSON in prose or markdown fences, so the decoder scans every
//! `{` in order and takes the first well-formed object that decodes as an
//! [`AiPick`]. Braces in the surrounding prose are skipped. Anything else
//! degrades to free text.

use serde::Deserialize;
use serde_json::Value;

use crate::models::BetType;

/// Confidence used when the reply carries none
pub const DEFAULT_AI_CONFIDENCE: u8 = 75;

/// Structured pick as requested in the prediction prompt
#[derive(Debug, Clone, Deserialize)]
pub struct AiPick {
    #[serde(alias = "topPick")]
    pub top_pick: String,
    #[serde(default, alias = "secondPick")]
    pub second_pick: Option<String>,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(default)]
    pub analysis: String,
    #[serde(default, alias = "betType")]
    bet_type: Option<String>,
}

impl AiPick {
    /// Confidence clamped to 0-100; accepts 78, 78.4, "78", "78%" or 0.78
    pub fn confidence(&self) -> u8 {
        let raw = match &self.confidence {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            _ => None,
        };

        match raw {
            Some(v) if v.is_finite() && v > 0.0 && v <= 1.0 => (v * 100.0).round() as u8,
            Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u8,
            _ => DEFAULT_AI_CONFIDENCE,
        }
    }

    /// Bet type, WIN when missing or unrecognised
    pub fn bet_type(&self) -> BetType {
        self.bet_type
            .as_deref()
            .and_then(BetType::parse)
            .unwrap_or(BetType::Win)
    }
}

/// Outcome of decoding a prediction reply
#[derive(Debug, Clone)]
pub enum DecodedReply {
    Structured(AiPick),
    /// No decodable object; the trimmed reply text
    FreeText(String),
}

/// Well-formed JSON objects embedded in `text`, in order of their opening brace
pub fn json_blocks(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.match_indices('{').filter_map(move |(start, _)| {
        let rest = &text[start..];
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(_))) => Some(&rest[..stream.byte_offset()]),
            _ => None,
        }
    })
}

/// Decode a prediction reply, falling back to free text
pub fn decode_prediction(text: &str) -> DecodedReply {
    for block in json_blocks(text) {
        match serde_json::from_str::<AiPick>(block) {
            Ok(pick) => return DecodedReply::Structured(pick),
            Err(e) => tracing::debug!("Reply object did not decode: {}", e),
        }
    }

    DecodedReply::FreeText(text.trim().to_string())
}
