//! Racing Dashboard - Australian horse racing odds, tips and predictions
//!
//! This library provides:
//! - An in-memory race catalog with sample meetings, market movers and tips
//! - Race filtering by track, featured flag and jump time
//! - Race predictions from an external completion service, with a
//!   deterministic odds-based fallback
//! - actix-web handlers for the dashboard API
//!
//! # Example
//!
//! ```
//! use racing::core::filter::RaceFilter;
//! use racing::data::RaceCatalog;
//! use racing::predictor::FallbackPredictor;
//!
//! let catalog = RaceCatalog::sample();
//! let featured = RaceFilter {
//!     featured: Some(true),
//!     ..Default::default()
//! }
//! .apply(catalog.races());
//!
//! let predictor = FallbackPredictor::new();
//! for race in &featured.races {
//!     let prediction = predictor.predict(race).unwrap();
//!     println!("{}: {:?}", race.name, prediction.top_pick);
//! }
//! ```

pub mod ai;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod handlers;
pub mod models;
pub mod predictor;

// Re-export commonly used types
pub use config::{AiConfig, AppConfig};
pub use data::RaceCatalog;
pub use models::{BetType, Horse, Prediction, PredictionSource, Race, Trend};
pub use predictor::{AiPredictor, FallbackPredictor, PredictionGenerator};
