use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::ai::{
    build_insight_prompt, build_prediction_prompt, decode_prediction, AiError, CompletionRequest,
    CompletionService, DecodedReply,
};
use crate::ai::decoder::DEFAULT_AI_CONFIDENCE;
use crate::ai::prompt::ANALYST_SYSTEM_PROMPT;
use crate::config::AiConfig;
use crate::data::RaceCatalog;
use crate::models::{BetType, Horse, InsightResponse, Prediction, PredictionSource, Race};

/// Base of the heuristic confidence range
const HEURISTIC_CONFIDENCE_BASE: u8 = 65;
/// Width of the heuristic confidence range, giving [65, 84]
const HEURISTIC_CONFIDENCE_SPAN: u64 = 20;

/// Analysis text when the completion service fails
pub const AI_UNAVAILABLE_MESSAGE: &str =
    "AI prediction temporarily unavailable. Please try again later.";

/// Insight text when the completion service fails
pub const INSIGHT_UNAVAILABLE_MESSAGE: &str =
    "AI insights temporarily unavailable. Please try again later.";

/// Caller-side prediction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("Race {0} has no runners")]
    NoRunners(String),

    #[error("Query text is required")]
    EmptyQuery,
}

/// 64-bit FNV-1a hash
///
/// Fixed offset basis and prime, so values are identical on every
/// platform and across restarts.
pub fn stable_hash(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    text.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Odds-based predictor used when the completion service is not configured
#[derive(Debug, Clone, Default)]
pub struct FallbackPredictor;

impl FallbackPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Runners ordered by win odds ascending; ties keep card order
    pub fn rank_by_odds<'a>(&self, horses: &'a [Horse]) -> Vec<&'a Horse> {
        let mut ranked: Vec<&Horse> = horses.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| a.odds.total_cmp(&b.odds));
        ranked
    }

    /// Deterministic confidence in [65, 84] keyed by race id
    pub fn confidence(&self, race_id: &str) -> u8 {
        HEURISTIC_CONFIDENCE_BASE + (stable_hash(race_id) % HEURISTIC_CONFIDENCE_SPAN) as u8
    }

    pub fn predict(&self, race: &Race) -> Result<Prediction, PredictionError> {
        let ranked = self.rank_by_odds(&race.horses);
        let top = *ranked
            .first()
            .ok_or_else(|| PredictionError::NoRunners(race.id.clone()))?;
        let second = ranked.get(1).copied().unwrap_or(top);

        let analysis = format!(
            "{} is the pick at ${:.2}. Ridden by {} for trainer {}, this runner has the market's \
             support and the form to handle conditions at {}.",
            top.name, top.odds, top.jockey, top.trainer, race.track
        );

        Ok(Prediction {
            race_id: race.id.clone(),
            top_pick: Some(top.name.clone()),
            second_pick: Some(second.name.clone()),
            confidence: self.confidence(&race.id),
            analysis,
            bet_type: BetType::Win,
            source: PredictionSource::Sample,
            model: None,
            error: None,
            generated_at: timestamp(),
        })
    }

    /// Templated insight from the card, ignoring the query content
    pub fn insight(&self, query: &str, catalog: &RaceCatalog) -> InsightResponse {
        let favourite = catalog
            .races()
            .iter()
            .filter_map(|race| {
                self.rank_by_odds(&race.horses)
                    .first()
                    .map(|h| (race, *h))
            })
            .min_by(|a, b| a.1.odds.total_cmp(&b.1.odds));

        let featured = catalog.races().iter().filter(|r| r.featured).count();

        let insight = match favourite {
            Some((race, horse)) => format!(
                "{} in the {} is the shortest-priced runner on the card at ${:.2}. \
                 There are {} featured races across {} meetings today.",
                horse.name,
                race.name,
                horse.odds,
                featured,
                catalog.tracks().len()
            ),
            None => "No races are available on today's card.".to_string(),
        };

        InsightResponse {
            query: query.trim().to_string(),
            insight,
            source: PredictionSource::Sample,
            model: None,
            error: None,
            timestamp: timestamp(),
        }
    }
}

/// Completion-service backed predictor
#[derive(Clone)]
pub struct AiPredictor {
    service: Arc<dyn CompletionService>,
    temperature: f32,
    max_tokens: u32,
}

impl AiPredictor {
    pub fn new(service: Arc<dyn CompletionService>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            service,
            temperature,
            max_tokens,
        }
    }

    /// Build from config with the HTTP completion client
    pub fn from_config(cfg: AiConfig) -> Result<Self, AiError> {
        let (temperature, max_tokens) = (cfg.temperature, cfg.max_tokens);
        let client = crate::ai::CompletionClient::new(cfg)?;
        Ok(Self::new(Arc::new(client), temperature, max_tokens))
    }

    pub fn model(&self) -> &str {
        self.service.model()
    }

    fn request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            system: ANALYST_SYSTEM_PROMPT.to_string(),
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Predict a race; service failures become a degraded prediction
    pub async fn predict(&self, race: &Race) -> Prediction {
        let model = self.model().to_string();
        let request = self.request(build_prediction_prompt(race));

        let reply = match self.service.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("AI prediction failed for race {}: {}", race.id, e);
                return Prediction {
                    race_id: race.id.clone(),
                    top_pick: None,
                    second_pick: None,
                    confidence: 0,
                    analysis: AI_UNAVAILABLE_MESSAGE.to_string(),
                    bet_type: BetType::Win,
                    source: PredictionSource::Ai,
                    model: Some(model),
                    error: Some(e.to_string()),
                    generated_at: timestamp(),
                };
            }
        };

        match decode_prediction(&reply) {
            DecodedReply::Structured(pick) => Prediction {
                race_id: race.id.clone(),
                confidence: pick.confidence(),
                bet_type: pick.bet_type(),
                top_pick: Some(pick.top_pick),
                second_pick: pick.second_pick,
                analysis: pick.analysis,
                source: PredictionSource::Ai,
                model: Some(model),
                error: None,
                generated_at: timestamp(),
            },
            DecodedReply::FreeText(text) => {
                info!("AI reply for race {} was not structured, returning text", race.id);
                Prediction {
                    race_id: race.id.clone(),
                    top_pick: None,
                    second_pick: None,
                    confidence: DEFAULT_AI_CONFIDENCE,
                    analysis: text,
                    bet_type: BetType::Win,
                    source: PredictionSource::Ai,
                    model: Some(model),
                    error: None,
                    generated_at: timestamp(),
                }
            }
        }
    }

    /// Answer a free-form question about the card
    pub async fn insight(&self, query: &str, catalog: &RaceCatalog) -> InsightResponse {
        let model = self.model().to_string();
        let request = self.request(build_insight_prompt(query, catalog));

        let (insight, error) = match self.service.complete(&request).await {
            Ok(reply) => (reply.trim().to_string(), None),
            Err(e) => {
                warn!("AI insight failed: {}", e);
                (INSIGHT_UNAVAILABLE_MESSAGE.to_string(), Some(e.to_string()))
            }
        };

        InsightResponse {
            query: query.trim().to_string(),
            insight,
            source: PredictionSource::Ai,
            model: Some(model),
            error,
            timestamp: timestamp(),
        }
    }
}

/// Chooses AI or heuristic mode once, at construction
#[derive(Clone, Default)]
pub struct PredictionGenerator {
    ai: Option<AiPredictor>,
    fallback: FallbackPredictor,
}

impl PredictionGenerator {
    pub fn new(ai: Option<AiPredictor>) -> Self {
        Self {
            ai,
            fallback: FallbackPredictor::new(),
        }
    }

    /// Heuristic-only generator
    pub fn heuristic() -> Self {
        Self::new(None)
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.ai.as_ref().map(|ai| ai.model())
    }

    /// Predict a race. Only a race without runners is an error.
    pub async fn predict(&self, race: &Race) -> Result<Prediction, PredictionError> {
        if race.horses.is_empty() {
            return Err(PredictionError::NoRunners(race.id.clone()));
        }

        match &self.ai {
            Some(ai) => Ok(ai.predict(race).await),
            None => self.fallback.predict(race),
        }
    }

    /// Insight for a non-blank query
    pub async fn insight(
        &self,
        query: &str,
        catalog: &RaceCatalog,
    ) -> Result<InsightResponse, PredictionError> {
        if query.trim().is_empty() {
            return Err(PredictionError::EmptyQuery);
        }

        Ok(match &self.ai {
            Some(ai) => ai.insight(query, catalog).await,
            None => self.fallback.insight(query, catalog),
        })
    }
}
