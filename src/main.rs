use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use racing::handlers::{configure, AppState};
use racing::{AiPredictor, AppConfig, PredictionGenerator, RaceCatalog};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let ai = match config.ai.clone() {
        Some(ai_cfg) => {
            let model = ai_cfg.model.clone();
            match AiPredictor::from_config(ai_cfg) {
                Ok(p) => {
                    info!("AI predictions enabled with model {}", model);
                    Some(p)
                }
                Err(e) => {
                    warn!("Failed to create AI client: {}. Using sample predictions.", e);
                    None
                }
            }
        }
        None => {
            warn!("AI_API_KEY not set. Using sample predictions.");
            None
        }
    };

    let catalog = RaceCatalog::sample();
    info!(
        "Loaded {} races across {} tracks",
        catalog.races().len(),
        catalog.tracks().len()
    );

    let app_state = Arc::new(AppState::new(catalog, PredictionGenerator::new(ai)));

    let addr = config.addr();
    info!("Starting Racing Dashboard API at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(&addr)?
    .run()
    .await
}
