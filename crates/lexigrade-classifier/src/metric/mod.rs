//! Metric-based CEFR estimation.
//!
//! The text is cut into windows of consecutive sentences. Each window gets a
//! complexity score from its five linguistic metrics; the window scores are
//! combined into a final score that is dampened for texts with little
//! controlled vocabulary and for very short texts, then mapped onto the
//! level bands.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use lexigrade_config::{ClassifierConfig, LexigradeConfig, ScoreBand};
use lexigrade_core::annotation::{eligible_tokens, joined_text};
use lexigrade_core::profile::files;
use lexigrade_core::stats::{mean, percentile, population_std, round_to};
use lexigrade_core::{
    Annotator, CefrLevel, LanguageProfile, LexigradeError, MetricRanges, Result, Sentence,
};
use tracing::debug;

use crate::estimate::{Aggregation, CefrEstimate, CefrEstimator, WindowReport};
use crate::metrics::TextMetrics;

/// Cuts sentences into consecutive windows of `window_size`.
///
/// A text with at most `window_size` sentences is a single window; otherwise
/// windows step by the window size and the last one may be shorter.
///
/// ```
/// use lexigrade_classifier::split_into_windows;
/// use lexigrade_core::Sentence;
///
/// let sentences: Vec<Sentence> = (0..5).map(|i| Sentence::new(i.to_string(), vec![])).collect();
/// let windows = split_into_windows(&sentences, 2);
/// assert_eq!(windows.iter().map(|w| w.len()).collect::<Vec<_>>(), vec![2, 2, 1]);
/// ```
pub fn split_into_windows(sentences: &[Sentence], window_size: usize) -> Vec<&[Sentence]> {
    if sentences.len() <= window_size || window_size == 0 {
        return vec![sentences];
    }
    sentences.chunks(window_size).collect()
}

/// Level bands over the complexity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBands {
    bands: Vec<ScoreBand>,
    overflow_confidence: f64,
}

impl ScoreBands {
    pub fn new(bands: Vec<ScoreBand>, overflow_confidence: f64) -> Self {
        Self {
            bands,
            overflow_confidence,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.bands.clone(), config.overflow_confidence)
    }

    /// Level whose band contains `score`, with a confidence that is 1 at the
    /// band midpoint and falls to 0 at its edges.
    ///
    /// Scores above every band map to the top level with the overflow
    /// confidence.
    pub fn map_score(&self, score: f64) -> (CefrLevel, f64) {
        let mut low = 0.0;
        for band in &self.bands {
            let high = band.upper;
            if low <= score && score < high {
                let midpoint = (low + high) / 2.0;
                let half_width = (high - low) / 2.0;
                let confidence = 1.0 - (score - midpoint).abs() / half_width;
                return (band.level, round_to(confidence.max(0.0), 3));
            }
            low = high;
        }
        (CefrLevel::C2, self.overflow_confidence)
    }
}

/// Windowed metric classifier for one language.
pub struct NlpCefrClassifier {
    profile: Arc<LanguageProfile>,
    annotator: Arc<dyn Annotator>,
    config: Arc<LexigradeConfig>,
    ranges: MetricRanges,
    bands: ScoreBands,
    debug_windows: bool,
}

impl NlpCefrClassifier {
    /// Creates a classifier over `profile`.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the profile carries no metric ranges.
    pub fn new(
        profile: Arc<LanguageProfile>,
        annotator: Arc<dyn Annotator>,
        config: Arc<LexigradeConfig>,
    ) -> Result<Self> {
        let ranges = *profile.metric_ranges().ok_or_else(|| {
            LexigradeError::resource(
                files::METRIC_RANGES,
                format!(
                    "metric ranges for {} are required by the metric classifier",
                    profile.language()
                ),
            )
        })?;
        let bands = ScoreBands::from_config(&config.classifier);
        Ok(Self {
            profile,
            annotator,
            config,
            ranges,
            bands,
            debug_windows: false,
        })
    }

    /// Includes per-window reports in every estimate.
    pub fn with_debug_windows(mut self, enabled: bool) -> Self {
        self.debug_windows = enabled;
        self
    }

    pub fn bands(&self) -> &ScoreBands {
        &self.bands
    }

    /// Share of eligible tokens whose lexicon level is controlled
    /// vocabulary; 1.0 when there are none.
    pub fn lexical_control_ratio(&self, sentences: &[Sentence]) -> f64 {
        let max_level = self.config.classifier.lexical_control_max_level;
        let lexicon = self.profile.lexicon();
        let mut total = 0usize;
        let mut controlled = 0usize;
        for token in eligible_tokens(sentences, self.profile.entity_filter()) {
            total += 1;
            if lexicon
                .level(&token.lemma)
                .is_some_and(|level| level <= max_level)
            {
                controlled += 1;
            }
        }
        if total == 0 {
            1.0
        } else {
            controlled as f64 / total as f64
        }
    }

    /// `min(1, ln(n + 1) / ln(reference))`, and 0 for an empty text.
    pub fn length_dampening(&self, token_count: usize) -> f64 {
        if token_count == 0 {
            return 0.0;
        }
        let reference = self.config.classifier.length_reference_tokens.max(2) as f64;
        ((token_count as f64 + 1.0).ln() / reference.ln()).min(1.0)
    }

    /// Estimates the level of already-annotated sentences.
    pub fn estimate_sentences(&self, sentences: &[Sentence]) -> CefrEstimate {
        let classifier = &self.config.classifier;
        let weights = classifier.weights.for_language(self.profile.language());

        let windows: Vec<WindowReport> = split_into_windows(sentences, classifier.window_size)
            .into_iter()
            .map(|window| {
                let metrics = TextMetrics::extract(&self.profile, &self.config, window);
                let score = metrics.complexity_score(&self.ranges, weights);
                let (level, _) = self.bands.map_score(score);
                WindowReport {
                    text: joined_text(window),
                    score,
                    level,
                    metrics,
                }
            })
            .collect();

        let scores: Vec<f64> = windows.iter().map(|w| w.score).collect();
        let mean_score = mean(&scores);
        let p75_score = percentile(&scores, 75.0).unwrap_or(0.0);

        let quantile_weight = classifier.upper_quantile_weight;
        let mut final_score = quantile_weight * p75_score + (1.0 - quantile_weight) * mean_score;

        let control_ratio = self.lexical_control_ratio(sentences);
        final_score *= 1.0 - classifier.lexical_control_penalty * (1.0 - control_ratio);

        let token_count = sentences
            .iter()
            .flat_map(|sentence| sentence.tokens.iter())
            .filter(|token| token.is_alpha)
            .count();
        let length_factor = self.length_dampening(token_count);
        final_score *= length_factor;

        let (estimated_level, _) = self.bands.map_score(final_score);

        let agreement = if windows.is_empty() {
            0.0
        } else {
            windows.iter().filter(|w| w.level == estimated_level).count() as f64
                / windows.len() as f64
        };
        let stability = (1.0 - population_std(&scores)).max(0.0);
        let agreement_weight = classifier.agreement_weight;
        let confidence = (agreement_weight * agreement + (1.0 - agreement_weight) * stability)
            * length_factor;
        let confidence = round_to(confidence.clamp(0.0, 1.0), 3);

        debug!(
            event = "estimate",
            language = %self.profile.language(),
            level = %estimated_level,
            score = final_score,
            windows = windows.len(),
            confidence,
        );

        CefrEstimate {
            complexity_score: Some(round_to(final_score, 4)),
            aggregation: Some(Aggregation {
                mean: round_to(mean_score, 4),
                p75: round_to(p75_score, 4),
                windows: windows.len(),
                agreement: round_to(agreement, 3),
                stability: round_to(stability, 3),
                length_factor: round_to(length_factor, 3),
                lexical_control_ratio: round_to(control_ratio, 3),
            }),
            windows: self.debug_windows.then_some(windows),
            ..CefrEstimate::new(estimated_level, confidence)
        }
    }
}

impl CefrEstimator for NlpCefrClassifier {
    fn estimate(&self, text: &str) -> Result<CefrEstimate> {
        if text.trim().is_empty() {
            return Ok(CefrEstimate::empty_text());
        }
        let sentences = self.annotator.annotate(self.profile.language(), text)?;
        Ok(self.estimate_sentences(&sentences))
    }
}

impl std::fmt::Debug for NlpCefrClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NlpCefrClassifier")
            .field("language", &self.profile.language())
            .field("bands", &self.bands)
            .field("debug_windows", &self.debug_windows)
            .finish()
    }
}
