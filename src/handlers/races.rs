use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use super::AppState;
use crate::core::filter::RaceFilter;
use crate::error::AppError;
use crate::models::{OddsResponse, Race};

fn find_race<'a>(state: &'a AppState, id: &str) -> Result<&'a Race, AppError> {
    state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Race {} not found", id)))
}

/// Full odds board
pub async fn get_odds(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(OddsResponse {
        events: state.catalog.races().to_vec(),
        timestamp: Utc::now().to_rfc3339(),
        status: "live".to_string(),
    })
}

/// Races matching the query filters
pub async fn list_races(
    state: web::Data<Arc<AppState>>,
    filter: web::Query<RaceFilter>,
) -> HttpResponse {
    let filter = filter.into_inner();
    let result = filter.apply(state.catalog.races());
    debug!("Filter {:?} matched {} races", filter, result.count);

    HttpResponse::Ok().json(result)
}

/// Single race card
pub async fn get_race(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let race = find_race(&state, &path)?;
    Ok(HttpResponse::Ok().json(race))
}

/// Prediction for a race (AI or heuristic)
pub async fn predict_race(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let race = find_race(&state, &path)?;
    let prediction = state.predictions.predict(race).await?;

    info!(
        "Prediction for {}: {:?} ({:?}, {}%)",
        race.id, prediction.top_pick, prediction.source, prediction.confidence
    );

    Ok(HttpResponse::Ok().json(prediction))
}
