//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    environment: String,
    model_loaded: bool,
    records_written: u64,
    write_failures: u64,
}

/// Sanity check, independent of classifier state
pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = &state.service;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        environment: state.config.environment.clone(),
        model_loaded: service.classifier().is_loaded(),
        records_written: service.log().records_written(),
        write_failures: service.log().write_failures(),
    })
}
