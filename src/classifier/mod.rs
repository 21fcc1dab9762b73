//! Classifier adapter
//!
//! The model itself is an external artifact. This module defines the seam
//! request handlers talk to, the artifact-backed implementation, and the
//! one-time initialized handle shared across requests.

pub mod handle;
pub mod linear;

use crate::models::PredictRequest;

pub use handle::ClassifierHandle;
pub use linear::NewsCategoryClassifier;

/// Label/score pairs in the classifier's own output order
pub type LabelScores = Vec<(String, f64)>;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("classifier returned no labels")]
    EmptyOutput,
}

/// A text classifier producing one score per category label.
///
/// Scores are non-negative and comparable for ranking; they need not sum
/// to exactly one.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, request: &PredictRequest) -> Result<LabelScores, ClassifierError>;
}
