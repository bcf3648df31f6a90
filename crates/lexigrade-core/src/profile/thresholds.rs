//! Calibrated thresholds and metric ranges.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::{CefrLevel, LevelTable};

/// Summary of the per-text rarity scores observed for one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStatistics {
    pub samples: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p90: Option<f64>,
}

/// Maximum acceptable mean rarity per level.
///
/// Levels that had no calibration samples carry a `null` threshold and, like
/// levels missing from the table, impose no limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RarityThresholds {
    pub thresholds: LevelTable<Option<f64>>,
    #[serde(default)]
    pub statistics: BTreeMap<CefrLevel, LevelStatistics>,
}

impl RarityThresholds {
    pub fn new(thresholds: LevelTable<Option<f64>>) -> Self {
        Self {
            thresholds,
            statistics: BTreeMap::new(),
        }
    }

    /// Limit for `level`, if one was calibrated.
    pub fn threshold(&self, level: CefrLevel) -> Option<f64> {
        self.thresholds.get(level).flatten()
    }
}

/// 5th/95th percentile window of a metric over the calibration corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRange {
    pub p05: f64,
    pub p95: f64,
}

impl PercentileRange {
    pub const fn new(p05: f64, p95: f64) -> Self {
        Self { p05, p95 }
    }

    /// Clips `value` to the window and scales it linearly into `[0, 1]`.
    ///
    /// A degenerate window (`p95 <= p05`) maps everything to 0.
    ///
    /// ```
    /// use lexigrade_core::PercentileRange;
    ///
    /// let range = PercentileRange::new(4.0, 6.0);
    /// assert_eq!(range.normalize(5.0), 0.5);
    /// assert_eq!(range.normalize(9.0), 1.0);
    /// assert_eq!(range.normalize(1.0), 0.0);
    /// ```
    pub fn normalize(&self, value: f64) -> f64 {
        if self.p95 <= self.p05 {
            return 0.0;
        }
        let clipped = value.clamp(self.p05, self.p95);
        (clipped - self.p05) / (self.p95 - self.p05)
    }

    /// Like [`normalize`](Self::normalize) on a `ln(1 + x)` scale, which
    /// compresses long-tailed counts.
    pub fn log_normalize(&self, value: f64) -> f64 {
        PercentileRange::new(self.p05.ln_1p(), self.p95.ln_1p()).normalize(value.ln_1p())
    }
}

/// Percentile windows for the five classifier metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRanges {
    pub lexical_rarity: PercentileRange,
    pub difficult_word_ratio: PercentileRange,
    pub morphological_ratio: PercentileRange,
    pub clause_count: PercentileRange,
    pub avg_word_length: PercentileRange,
}
