use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use std::sync::Arc;

use super::AppState;
use crate::models::HealthResponse;

/// Health check endpoint
pub async fn health_check(state: web::Data<Arc<AppState>>) -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ai_enabled: state.predictions.ai_enabled(),
        timestamp: Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
