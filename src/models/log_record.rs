//! Prediction log record

use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

use super::{PredictRequest, PredictResponse};

/// Timestamp layout used in the prediction log
pub const TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// One line of the prediction log
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub request_id: Uuid,
    pub request: PredictRequest,
    pub prediction: PredictResponse,
    /// Milliseconds
    pub latency: f64,
}

impl LogRecord {
    pub fn new(
        request_id: Uuid,
        request: PredictRequest,
        prediction: PredictResponse,
        latency: f64,
    ) -> Self {
        Self::at(Local::now(), request_id, request, prediction, latency)
    }

    pub fn at(
        now: DateTime<Local>,
        request_id: Uuid,
        request: PredictRequest,
        prediction: PredictResponse,
        latency: f64,
    ) -> Self {
        Self {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            request_id,
            request,
            prediction,
            latency: latency.max(0.0),
        }
    }

    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
