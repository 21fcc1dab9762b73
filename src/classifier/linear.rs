//! Linear bag-of-words news classifier
//!
//! Loads the fitted parameters of a multinomial logistic regression
//! (vocabulary, per-class coefficients and intercepts) from a JSON artifact
//! and scores `title` + `description` with softmax probabilities.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Classifier, ClassifierError, LabelScores};
use crate::models::PredictRequest;

// ============================================================================
// ARTIFACT
// ============================================================================

/// Serialized model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Category labels, one per coefficient row
    pub classes: Vec<String>,
    /// Token -> feature column
    pub vocabulary: HashMap<String, usize>,
    /// `classes.len()` rows of `n_features` weights
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    /// L2-normalize the term-count vector before scoring
    #[serde(default = "default_true")]
    pub l2_normalize: bool,
}

fn default_true() -> bool {
    true
}

impl ModelArtifact {
    /// Number of feature columns implied by the vocabulary
    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.classes.is_empty() {
            return Err(ClassifierError::InvalidArtifact("no classes".to_string()));
        }
        if self.coef.len() != self.classes.len() {
            return Err(ClassifierError::InvalidArtifact(format!(
                "{} coefficient rows for {} classes",
                self.coef.len(),
                self.classes.len()
            )));
        }
        if self.intercept.len() != self.classes.len() {
            return Err(ClassifierError::InvalidArtifact(format!(
                "{} intercepts for {} classes",
                self.intercept.len(),
                self.classes.len()
            )));
        }

        let n_features = self.n_features();
        if self.coef.iter().any(|row| row.len() != n_features) {
            return Err(ClassifierError::InvalidArtifact(
                "coefficient rows have different lengths".to_string(),
            ));
        }
        if let Some((token, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= n_features) {
            return Err(ClassifierError::InvalidArtifact(format!(
                "token '{}' maps to column {} but only {} features exist",
                token, idx, n_features
            )));
        }

        Ok(())
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct NewsCategoryClassifier {
    artifact: ModelArtifact,
    checksum: String,
}

impl NewsCategoryClassifier {
    /// Load and validate a model artifact from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        tracing::info!("Loading classifier artifact from: {}", path.display());

        let bytes = std::fs::read(path)?;
        let checksum = hex::encode(Sha256::digest(&bytes));
        let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;

        let classifier = Self::with_checksum(artifact, checksum)?;
        tracing::info!(
            "Classifier loaded: {} classes, {} features (sha256 {})",
            classifier.artifact.classes.len(),
            classifier.artifact.n_features(),
            classifier.checksum
        );

        Ok(classifier)
    }

    /// Build a classifier from in-memory parameters
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ClassifierError> {
        let bytes = serde_json::to_vec(&artifact)?;
        let checksum = hex::encode(Sha256::digest(&bytes));
        Self::with_checksum(artifact, checksum)
    }

    fn with_checksum(artifact: ModelArtifact, checksum: String) -> Result<Self, ClassifierError> {
        artifact.validate()?;
        Ok(Self { artifact, checksum })
    }

    pub fn classes(&self) -> &[String] {
        &self.artifact.classes
    }

    /// SHA-256 of the artifact bytes
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Sparse term-count vector for the request's text fields
    fn featurize(&self, request: &PredictRequest) -> HashMap<usize, f64> {
        let mut features: HashMap<usize, f64> = HashMap::new();

        for token in tokenize(&request.title).chain(tokenize(&request.description)) {
            if let Some(&idx) = self.artifact.vocabulary.get(&token) {
                *features.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        if self.artifact.l2_normalize {
            let norm = features.values().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                features.values_mut().for_each(|v| *v /= norm);
            }
        }

        features
    }
}

impl Classifier for NewsCategoryClassifier {
    fn predict_proba(&self, request: &PredictRequest) -> Result<LabelScores, ClassifierError> {
        let features = self.featurize(request);

        let logits: Vec<f64> = self
            .artifact
            .coef
            .iter()
            .zip(&self.artifact.intercept)
            .map(|(row, bias)| bias + features.iter().map(|(idx, x)| row[*idx] * x).sum::<f64>())
            .collect();

        let probabilities = softmax(&logits);
        if probabilities.is_empty() {
            return Err(ClassifierError::EmptyOutput);
        }

        Ok(self
            .artifact
            .classes
            .iter()
            .cloned()
            .zip(probabilities)
            .collect())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Lowercased word tokens of two or more alphanumeric characters
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
