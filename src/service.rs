//! Prediction pipeline: classify, rank, log.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::classifier::ClassifierHandle;
use crate::models::{LogRecord, PredictRequest, PredictResponse, ResponseMode};
use crate::prediction_log::PredictionLog;
use crate::ranking;
use crate::AppResult;

pub struct PredictionService {
    classifier: ClassifierHandle,
    log: Arc<PredictionLog>,
}

impl PredictionService {
    pub fn new(classifier: ClassifierHandle, log: Arc<PredictionLog>) -> Self {
        Self { classifier, log }
    }

    pub fn classifier(&self) -> &ClassifierHandle {
        &self.classifier
    }

    pub fn log(&self) -> &PredictionLog {
        &self.log
    }

    /// Run one prediction and append its log record.
    ///
    /// Blocking: loads the model on first use and writes to the log file.
    pub fn predict(
        &self,
        request_id: Uuid,
        request: PredictRequest,
        mode: ResponseMode,
    ) -> AppResult<PredictResponse> {
        let start = Instant::now();

        let classifier = self.classifier.get()?;
        let scores = classifier.predict_proba(&request)?;
        let response = ranking::build_response(scores, mode)?;

        let latency = start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(label = %response.label, latency_ms = latency, "Prediction complete");

        self.log.append(&LogRecord::new(
            request_id,
            request,
            response.clone(),
            latency,
        ));

        Ok(response)
    }
}
