//! Prediction handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::models::{PredictQuery, PredictRequest, PredictResponse, ResponseMode};
use crate::{AppError, AppResult, AppState};

/// `POST /predict`: full ranked distribution, or label only with `?label_only=true`
pub async fn predict(
    State(state): State<AppState>,
    query: Result<Query<PredictQuery>, QueryRejection>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    run(state, payload, query.mode()).await
}

/// `POST /predict_label`: top label with an empty `scores` object
pub async fn predict_label(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    run(state, payload, ResponseMode::LabelOnly).await
}

async fn run(
    state: AppState,
    payload: Result<Json<PredictRequest>, JsonRejection>,
    mode: ResponseMode,
) -> AppResult<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id, mode = mode.as_str());

    let service = state.service.clone();
    let blocking_span = span.clone();
    let response = tokio::task::spawn_blocking(move || {
        let _guard = blocking_span.enter();
        service.predict(request_id, request, mode)
    })
    .instrument(span)
    .await??;

    Ok(Json(response))
}
