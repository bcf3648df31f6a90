//! Percentile windows of the classifier metrics.

use lexigrade_classifier::TextMetrics;
use lexigrade_config::LexigradeConfig;
use lexigrade_core::stats::percentile;
use lexigrade_core::{
    Annotator, LanguageProfile, LexigradeError, MetricRanges, PercentileRange, Result,
};
use tracing::{info, warn};

use crate::corpus::TextsByLevel;

/// Metrics with fewer samples than this are reported as sparse.
pub const MIN_RANGE_SAMPLES: usize = 50;

const LOW: f64 = 5.0;
const HIGH: f64 = 95.0;

/// Observed values of each classifier metric.
#[derive(Debug, Clone, Default)]
pub struct MetricSamples {
    lexical_rarity: Vec<f64>,
    difficult_word_ratio: Vec<f64>,
    morphological_ratio: Vec<f64>,
    clause_count: Vec<f64>,
    avg_word_length: Vec<f64>,
}

impl MetricSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, metrics: &TextMetrics) {
        self.lexical_rarity.push(metrics.lexical_rarity);
        self.difficult_word_ratio.push(metrics.difficult_word_ratio);
        self.morphological_ratio.push(metrics.morphological_ratio);
        self.clause_count.push(metrics.clause_count);
        self.avg_word_length.push(metrics.avg_word_length);
    }

    pub fn len(&self) -> usize {
        self.lexical_rarity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexical_rarity.is_empty()
    }

    /// 5th and 95th percentiles of every metric.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error when no text was sampled.
    pub fn ranges(&self) -> Result<MetricRanges> {
        if self.len() < MIN_RANGE_SAMPLES {
            warn!(event = "sparse_metrics", samples = self.len());
        }
        Ok(MetricRanges {
            lexical_rarity: window("lexical_rarity", &self.lexical_rarity)?,
            difficult_word_ratio: window("difficult_word_ratio", &self.difficult_word_ratio)?,
            morphological_ratio: window("morphological_ratio", &self.morphological_ratio)?,
            clause_count: window("clause_count", &self.clause_count)?,
            avg_word_length: window("avg_word_length", &self.avg_word_length)?,
        })
    }
}

fn window(metric: &str, values: &[f64]) -> Result<PercentileRange> {
    match (percentile(values, LOW), percentile(values, HIGH)) {
        (Some(p05), Some(p95)) => Ok(PercentileRange::new(p05, p95)),
        _ => Err(LexigradeError::InvalidInput(format!(
            "no samples for metric '{metric}'"
        ))),
    }
}

/// Measures every non-blank text of `texts` against `profile`.
pub fn calibrate_metric_ranges(
    profile: &LanguageProfile,
    config: &LexigradeConfig,
    annotator: &dyn Annotator,
    texts: &TextsByLevel,
) -> Result<MetricRanges> {
    let mut samples = MetricSamples::new();
    for (level, level_texts) in texts.iter() {
        info!(event = "ranges_level", level = %level, texts = level_texts.len());
        for text in level_texts.iter().filter(|text| !text.trim().is_empty()) {
            let sentences = annotator.annotate(profile.language(), text)?;
            samples.push(&TextMetrics::extract(profile, config, &sentences));
        }
    }
    samples.ranges()
}

#[cfg(test)]
mod tests {
    use lexigrade_core::CefrLevel;
    use lexigrade_test::{english_profile, FixtureAnnotator};

    use super::*;

    #[test]
    fn test_ranges_use_interpolated_percentiles() {
        let mut samples = MetricSamples::new();
        for i in 0..=20 {
            let value = f64::from(i);
            samples.push(&TextMetrics {
                lexical_rarity: value,
                difficult_word_ratio: value / 20.0,
                morphological_ratio: 0.0,
                clause_count: 1.0,
                avg_word_length: 4.0,
            });
        }
        let ranges = samples.ranges().unwrap();
        assert_eq!(ranges.lexical_rarity, PercentileRange::new(1.0, 19.0));
        assert_eq!(ranges.clause_count, PercentileRange::new(1.0, 1.0));
        assert_eq!(samples.len(), 21);
    }

    #[test]
    fn test_no_samples_is_an_error() {
        let err = MetricSamples::new().ranges().unwrap_err();
        assert!(matches!(err, LexigradeError::InvalidInput(_)));
    }

    #[test]
    fn test_calibrate_skips_blank_texts() {
        let mut texts = TextsByLevel::new();
        texts.push(CefrLevel::A1, "The cat sleeps.");
        texts.push(CefrLevel::A1, "   ");
        texts.push(CefrLevel::C1, "The ubiquitous ambiguity is sustainable.");

        let ranges = calibrate_metric_ranges(
            &english_profile(),
            &LexigradeConfig::default(),
            &FixtureAnnotator::english(),
            &texts,
        )
        .unwrap();

        assert!(ranges.lexical_rarity.p05 < ranges.lexical_rarity.p95);
        assert!(ranges.difficult_word_ratio.p95 > 0.0);
        assert!(ranges.difficult_word_ratio.p05 < ranges.difficult_word_ratio.p95);
    }
}
