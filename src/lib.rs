//! News Category Classifier API
//!
//! Thin HTTP wrapper around a pre-trained news category classifier.
//!
//! # Request path
//!
//! ```text
//!  POST /predict ──► Json<PredictRequest> ──► spawn_blocking
//!                                                  │
//!                      ┌───────────────────────────┘
//!                      ▼
//!            ClassifierHandle (OnceCell) ──► predict_proba
//!                      │
//!                      ▼
//!             ranking::build_response ──► PredictionLog (JSONL)
//!                      │
//!                      ▼
//!              Json<PredictResponse>
//! ```

pub mod config;
pub mod classifier;
pub mod models;
pub mod handlers;
pub mod prediction_log;
pub mod ranking;
pub mod service;
mod error;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
pub use service::PredictionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/predict_label", post(handlers::predict::predict_label))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
