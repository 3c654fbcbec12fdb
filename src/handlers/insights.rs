use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::error::AppError;
use crate::models::InsightRequest;

/// Free-form question about today's card
pub async fn generate_insight(
    state: web::Data<Arc<AppState>>,
    req: web::Json<InsightRequest>,
) -> Result<HttpResponse, AppError> {
    let insight = state.predictions.insight(&req.query, &state.catalog).await?;
    info!("Insight answered for {:?} ({:?})", insight.query, insight.source);

    Ok(HttpResponse::Ok().json(insight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, CompletionRequest, CompletionService};
    use crate::data::RaceCatalog;
    use crate::handlers::configure;
    use crate::predictor::{AiPredictor, PredictionGenerator};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct Unreachable;

    #[async_trait]
    impl CompletionService for Unreachable {
        fn model(&self) -> &str {
            "gpt-test"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, AiError> {
            Err(AiError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            })
        }
    }

    fn state(predictions: PredictionGenerator) -> web::Data<Arc<AppState>> {
        web::Data::new(Arc::new(AppState::new(RaceCatalog::sample(), predictions)))
    }

    #[actix_web::test]
    async fn test_insight_heuristic() {
        let app = test::init_service(
            App::new()
                .app_data(state(PredictionGenerator::heuristic()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/insights")
            .set_json(json!({ "query": "Best value today?" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["query"], "Best value today?");
        assert_eq!(body["source"], "sample");
        assert!(body["insight"].as_str().unwrap().contains("Starlight Express"));
    }

    #[actix_web::test]
    async fn test_insight_blank_query_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(state(PredictionGenerator::heuristic()))
                .configure(configure),
        )
        .await;

        for payload in [json!({ "query": "  " }), json!({})] {
            let req = test::TestRequest::post()
                .uri("/api/insights")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "validation_error");
        }
    }

    #[actix_web::test]
    async fn test_insight_ai_failure_is_degraded_response() {
        let generator = PredictionGenerator::new(Some(AiPredictor::new(
            Arc::new(Unreachable),
            0.7,
            500,
        )));
        let app = test::init_service(
            App::new()
                .app_data(state(generator))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/insights")
            .set_json(json!({ "query": "Who wins the Cox Plate?" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["source"], "ai");
        assert_eq!(body["model"], "gpt-test");
        assert!(body["error"].as_str().unwrap().contains("503"));
    }
}
