//! HTTP handlers and route table

pub mod health;
pub mod insights;
pub mod market;
pub mod races;

use actix_web::web;

use crate::data::RaceCatalog;
use crate::error::AppError;
use crate::predictor::PredictionGenerator;

/// Application state shared across handlers
pub struct AppState {
    pub catalog: RaceCatalog,
    pub predictions: PredictionGenerator,
}

impl AppState {
    pub fn new(catalog: RaceCatalog, predictions: PredictionGenerator) -> Self {
        Self {
            catalog,
            predictions,
        }
    }
}

/// Register all routes and extractor error handlers
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .route("/odds", web::get().to(races::get_odds))
            .route("/races", web::get().to(races::list_races))
            .route("/races/{id}", web::get().to(races::get_race))
            .route("/races/{id}/prediction", web::get().to(races::predict_race))
            .route("/market-movers", web::get().to(market::market_movers))
            .route("/predictions", web::get().to(market::expert_predictions))
            .route("/roughies", web::get().to(market::roughies))
            .route("/tracks", web::get().to(market::tracks))
            .route("/insights", web::post().to(insights::generate_insight)),
    );
}
