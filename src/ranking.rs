//! Score ranking

use std::collections::HashMap;

use crate::classifier::{ClassifierError, LabelScores};
use crate::models::{PredictResponse, ResponseMode, Scores};

/// NaN ranks below every real score
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Collapse repeated labels: a label keeps its first position and its last
/// score, so the output is a proper label -> score mapping.
fn dedupe(scores: LabelScores) -> LabelScores {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(scores.len());
    let mut unique: LabelScores = Vec::with_capacity(scores.len());

    for (label, score) in scores {
        match positions.get(&label) {
            Some(&idx) => unique[idx].1 = score,
            None => {
                positions.insert(label.clone(), unique.len());
                unique.push((label, score));
            }
        }
    }

    unique
}

/// Sort scores descending, one entry per label. The sort is stable: equal
/// scores keep the classifier's output order.
pub fn rank(scores: LabelScores) -> LabelScores {
    let mut scores = dedupe(scores);
    scores.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)));
    scores
}

/// Rank raw classifier output and shape it into a response
pub fn build_response(
    scores: LabelScores,
    mode: ResponseMode,
) -> Result<PredictResponse, ClassifierError> {
    let ranked = rank(scores);
    let label = ranked
        .first()
        .map(|(label, _)| label.clone())
        .ok_or(ClassifierError::EmptyOutput)?;

    let scores = match mode {
        ResponseMode::Full => Scores(ranked),
        ResponseMode::LabelOnly => Scores::default(),
    };

    Ok(PredictResponse { scores, label })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> LabelScores {
        pairs.iter().map(|(l, s)| (l.to_string(), *s)).collect()
    }

    fn labels(scores: &LabelScores) -> Vec<&str> {
        scores.iter().map(|(l, _)| l.as_str()).collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank(scores(&[("tech", 0.1), ("sports", 0.7), ("politics", 0.2)]));
        assert_eq!(labels(&ranked), vec!["sports", "politics", "tech"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranked = rank(scores(&[("b", 0.4), ("a", 0.4), ("c", 0.2), ("d", 0.4)]));
        assert_eq!(labels(&ranked), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_repeated_label_keeps_last_score() {
        let ranked = rank(scores(&[("a", 0.2), ("b", 0.5), ("a", 0.9)]));
        assert_eq!(ranked, scores(&[("a", 0.9), ("b", 0.5)]));
    }

    #[test]
    fn test_repeated_label_response_label_is_argmax() {
        let response = build_response(
            scores(&[("a", 0.9), ("b", 0.5), ("a", 0.2)]),
            ResponseMode::Full,
        )
        .unwrap();

        assert_eq!(response.label, "b");
        assert_eq!(response.scores.len(), 2);
        let labels: Vec<&str> = response.scores.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    fn test_nan_ranks_last() {
        let ranked = rank(scores(&[("x", f64::NAN), ("y", 0.0), ("z", 0.3)]));
        assert_eq!(labels(&ranked), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_full_response_label_is_argmax() {
        let response = build_response(
            scores(&[("sports", 0.7), ("politics", 0.2), ("tech", 0.1)]),
            ResponseMode::Full,
        )
        .unwrap();

        assert_eq!(response.label, "sports");
        let max = response
            .scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert_eq!(max.0, response.label);
        assert_eq!(response.scores.len(), 3);
    }

    #[test]
    fn test_label_only_response() {
        let response = build_response(
            scores(&[("tech", 0.1), ("politics", 0.2), ("sports", 0.7)]),
            ResponseMode::LabelOnly,
        )
        .unwrap();

        assert!(response.scores.is_empty());
        assert_eq!(response.label, "sports");
    }

    #[test]
    fn test_empty_output_is_error() {
        assert!(matches!(
            build_response(Vec::new(), ResponseMode::Full),
            Err(ClassifierError::EmptyOutput)
        ));
    }
}
