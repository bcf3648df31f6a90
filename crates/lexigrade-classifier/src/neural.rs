//! Neural CEFR estimation over a black-box sequence classifier.

use std::sync::Arc;

use lexigrade_core::stats::round_to;
use lexigrade_core::{CefrLevel, LevelTable, LexigradeError, Result};
use tracing::debug;

use crate::estimate::{CefrEstimate, CefrEstimator};

/// A model producing one logit per CEFR level, in level order A1..C2.
pub trait SequenceClassifier: Send + Sync {
    fn logits(&self, text: &str) -> Result<Vec<f64>>;
}

impl<S: SequenceClassifier + ?Sized> SequenceClassifier for Arc<S> {
    fn logits(&self, text: &str) -> Result<Vec<f64>> {
        (**self).logits(text)
    }
}

/// Numerically stable softmax.
///
/// ```
/// use lexigrade_classifier::softmax;
///
/// let p = softmax(&[1.0, 1.0]);
/// assert_eq!(p, vec![0.5, 0.5]);
/// assert!(softmax(&[]).is_empty());
/// ```
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Picks the most probable level from the classifier's distribution.
pub struct NeuralCefrClassifier {
    model: Arc<dyn SequenceClassifier>,
}

impl NeuralCefrClassifier {
    pub fn new(model: Arc<dyn SequenceClassifier>) -> Self {
        Self { model }
    }
}

impl CefrEstimator for NeuralCefrClassifier {
    fn estimate(&self, text: &str) -> Result<CefrEstimate> {
        if text.trim().is_empty() {
            return Ok(CefrEstimate::empty_text());
        }

        let logits = self.model.logits(text)?;
        if logits.len() != CefrLevel::ALL.len() {
            return Err(LexigradeError::Service(format!(
                "sequence classifier returned {} logits, expected {}",
                logits.len(),
                CefrLevel::ALL.len()
            )));
        }

        if let Some(bad) = logits.iter().find(|l| !l.is_finite()) {
            return Err(LexigradeError::Service(format!(
                "sequence classifier returned a non-finite logit ({bad})"
            )));
        }

        let probabilities = softmax(&logits);
        let (best, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .fold(None, |acc: Option<(usize, f64)>, (i, p)| match acc {
                Some((_, top)) if top >= p => acc,
                _ => Some((i, p)),
            })
            .ok_or_else(|| {
                LexigradeError::Service("sequence classifier distribution is not finite".into())
            })?;
        let estimated_level = CefrLevel::from_index(best).ok_or_else(|| {
            LexigradeError::Service(format!("no CEFR level at index {best}"))
        })?;

        let mut distribution = LevelTable::empty();
        for (level, p) in CefrLevel::ALL.into_iter().zip(&probabilities) {
            distribution.insert(level, round_to(*p, 4));
        }

        debug!(event = "neural_estimate", level = %estimated_level, confidence);

        Ok(CefrEstimate {
            probabilities: Some(distribution),
            ..CefrEstimate::new(estimated_level, round_to(confidence, 4))
        })
    }
}

impl std::fmt::Debug for NeuralCefrClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeuralCefrClassifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLogits(Vec<f64>);

    impl SequenceClassifier for FixedLogits {
        fn logits(&self, _text: &str) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    fn classifier(logits: Vec<f64>) -> NeuralCefrClassifier {
        NeuralCefrClassifier::new(Arc::new(FixedLogits(logits)))
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[0.5, 2.0, -1.0, 3.0]);
        let total: f64 = p.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(p[3] > p[1] && p[1] > p[0] && p[0] > p[2]);
    }

    #[test]
    fn test_softmax_is_shift_invariant() {
        let a = softmax(&[1.0, 2.0, 3.0]);
        let b = softmax(&[1001.0, 1002.0, 1003.0]);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_argmax_level_and_distribution() {
        let estimate = classifier(vec![0.0, 0.0, 0.0, 5.0, 0.0, 0.0])
            .estimate("Some text.")
            .unwrap();
        assert_eq!(estimate.estimated_level, CefrLevel::B2);
        assert!(estimate.confidence > 0.9);

        let distribution = estimate.probabilities.unwrap();
        assert_eq!(distribution.len(), 6);
        assert_eq!(distribution.get(CefrLevel::B2), Some(estimate.confidence));
        assert!(estimate.aggregation.is_none());
    }

    #[test]
    fn test_wrong_logit_count_is_a_service_error() {
        let err = classifier(vec![1.0, 2.0]).estimate("Some text.").unwrap_err();
        assert!(matches!(err, LexigradeError::Service(_)));
    }

    #[test]
    fn test_non_finite_logits_are_a_service_error() {
        for logits in [vec![f64::NAN; 6], vec![0.0, 1.0, f64::INFINITY, 0.0, 0.0, 0.0]] {
            let err = classifier(logits).estimate("Some text.").unwrap_err();
            assert!(matches!(err, LexigradeError::Service(_)));
        }
    }

    #[test]
    fn test_empty_text_skips_the_model() {
        let estimate = classifier(Vec::new()).estimate(" ").unwrap();
        assert_eq!(estimate, CefrEstimate::empty_text());
    }
}
