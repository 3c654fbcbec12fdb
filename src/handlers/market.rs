use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::models::{MoversResponse, RoughiesResponse, TipsResponse};

/// Horses with significant odds changes
pub async fn market_movers(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let movers = state.catalog.market_movers().to_vec();
    HttpResponse::Ok().json(MoversResponse {
        total: movers.len(),
        movers,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Expert tips with confidence and reasoning
pub async fn expert_predictions(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let predictions = state.catalog.expert_tips().to_vec();
    HttpResponse::Ok().json(TipsResponse {
        total: predictions.len(),
        predictions,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Longshot tips
pub async fn roughies(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let roughies = state.catalog.roughies();
    HttpResponse::Ok().json(RoughiesResponse {
        total: roughies.len(),
        roughies,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Distinct track names
pub async fn tracks(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.tracks())
}
