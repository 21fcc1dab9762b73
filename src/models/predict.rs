//! Prediction request/response models

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Article metadata submitted for classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub source: String,
    pub url: String,
    pub title: String,
    pub description: String,
}

/// Label scores serialized as a JSON object in ranked order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores(pub Vec<(String, f64)>);

impl Scores {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, score)| (label.as_str(), *score))
    }
}

impl Serialize for Scores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, score) in &self.0 {
            map.serialize_entry(label, score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictResponse {
    pub scores: Scores,
    pub label: String,
}

/// How much of the score distribution a response carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Full ranked distribution
    Full,
    /// Top label only, `scores` left empty
    LabelOnly,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Full => "full",
            ResponseMode::LabelOnly => "label_only",
        }
    }
}

/// Query parameters accepted by `POST /predict`
#[derive(Debug, Default, Deserialize)]
pub struct PredictQuery {
    #[serde(default)]
    pub label_only: bool,
}

impl PredictQuery {
    pub fn mode(&self) -> ResponseMode {
        if self.label_only {
            ResponseMode::LabelOnly
        } else {
            ResponseMode::Full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scores_serialize_in_order() {
        let response = PredictResponse {
            scores: Scores(vec![
                ("tech".into(), 0.5),
                ("arts".into(), 0.3),
                ("sports".into(), 0.2),
            ]),
            label: "tech".into(),
        };

        let text = serde_json::to_string(&response).unwrap();
        assert_eq!(
            text,
            r#"{"scores":{"tech":0.5,"arts":0.3,"sports":0.2},"label":"tech"}"#
        );
    }

    #[test]
    fn test_empty_scores() {
        let response = PredictResponse {
            scores: Scores::default(),
            label: "sports".into(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"scores": {}, "label": "sports"})
        );
    }

    #[test]
    fn test_request_requires_all_fields() {
        let missing = json!({"source": "a", "url": "b", "title": "c"});
        assert!(serde_json::from_value::<PredictRequest>(missing).is_err());

        let empty = json!({"source": "", "url": "", "title": "", "description": ""});
        assert!(serde_json::from_value::<PredictRequest>(empty).is_ok());
    }

    #[test]
    fn test_query_mode() {
        assert_eq!(PredictQuery::default().mode(), ResponseMode::Full);
        assert_eq!(PredictQuery { label_only: true }.mode(), ResponseMode::LabelOnly);
    }
}
