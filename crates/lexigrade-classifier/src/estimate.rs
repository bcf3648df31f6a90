//! Estimation results and the estimator contract.

use lexigrade_core::{CefrLevel, LevelTable, Result};
use serde::Serialize;

use crate::metrics::TextMetrics;

/// Estimated CEFR level of a text.
///
/// Fields beyond level and confidence depend on the strategy: the metric
/// classifier fills `complexity_score`, `aggregation` and (in debug mode)
/// `windows`; the neural classifier fills `probabilities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CefrEstimate {
    pub estimated_level: CefrLevel,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<LevelTable<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CefrEstimate {
    /// Creates an estimate carrying only a level and a confidence.
    pub fn new(estimated_level: CefrLevel, confidence: f64) -> Self {
        Self {
            estimated_level,
            confidence,
            complexity_score: None,
            aggregation: None,
            windows: None,
            probabilities: None,
            error: None,
        }
    }

    /// The defined estimate for empty or whitespace-only text.
    pub fn empty_text() -> Self {
        Self {
            error: Some("Empty text".to_string()),
            ..Self::new(CefrLevel::A1, 0.0)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// How the window scores were combined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub mean: f64,
    pub p75: f64,
    pub windows: usize,
    pub agreement: f64,
    pub stability: f64,
    pub length_factor: f64,
    pub lexical_control_ratio: f64,
}

/// Score of one window of consecutive sentences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    pub text: String,
    pub score: f64,
    pub level: CefrLevel,
    pub metrics: TextMetrics,
}

/// Estimates the CEFR level of a text.
pub trait CefrEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> Result<CefrEstimate>;
}

impl<E: CefrEstimator + ?Sized> CefrEstimator for &E {
    fn estimate(&self, text: &str) -> Result<CefrEstimate> {
        (**self).estimate(text)
    }
}

impl<E: CefrEstimator + ?Sized> CefrEstimator for std::sync::Arc<E> {
    fn estimate(&self, text: &str) -> Result<CefrEstimate> {
        (**self).estimate(text)
    }
}
