//! The five raw metrics behind a complexity score.

use lexigrade_config::{LexigradeConfig, MetricWeights};
use lexigrade_core::stats::round_to;
use lexigrade_core::{CefrLevel, LanguageProfile, MetricRanges, Sentence};
use lexigrade_scoring::ConstraintSuite;
use serde::{Deserialize, Serialize};

/// Raw linguistic metrics of a span of text, all oriented so that higher
/// means more complex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub lexical_rarity: f64,
    pub difficult_word_ratio: f64,
    pub morphological_ratio: f64,
    /// Mean clauses per sentence.
    pub clause_count: f64,
    pub avg_word_length: f64,
}

impl TextMetrics {
    /// Measures `sentences` with evaluators built at A1, so every lexicon
    /// level above A1 counts as difficult.
    pub fn extract(
        profile: &LanguageProfile,
        config: &LexigradeConfig,
        sentences: &[Sentence],
    ) -> Self {
        let suite = ConstraintSuite::new(profile, config, CefrLevel::A1);
        let lexical = suite.lexical();
        let syntactic = suite.syntactic();

        let rarity = suite.rarity().calculate(sentences);
        let dwr = lexical.check_difficult_word_ratio(sentences);
        let morph = lexical.check_morphological_complexity(sentences);
        let clauses = syntactic.check_clause_count(sentences);
        let length = syntactic.check_average_word_length(sentences);

        Self {
            lexical_rarity: rarity.details.as_rarity().map_or(0.0, |d| d.rarity_score),
            difficult_word_ratio: dwr.details.as_difficult_word_ratio().map_or(0.0, |d| d.ratio),
            morphological_ratio: morph.details.as_morphological().map_or(0.0, |d| d.ratio),
            clause_count: clauses
                .details
                .as_clause_count()
                .map_or(0.0, |d| d.mean_clauses_per_sentence),
            avg_word_length: length.details.as_word_length().map_or(0.0, |d| d.avg_word_length),
        }
    }

    /// Weighted complexity score in `[0, 1]`, rounded to 4 decimals.
    ///
    /// Each metric is normalized against its percentile window (clause count
    /// on a log scale); clause count and word length share the syntax weight.
    pub fn complexity_score(&self, ranges: &MetricRanges, weights: MetricWeights) -> f64 {
        let rarity = ranges.lexical_rarity.normalize(self.lexical_rarity);
        let dwr = ranges.difficult_word_ratio.normalize(self.difficult_word_ratio);
        let morph = ranges.morphological_ratio.normalize(self.morphological_ratio);
        let clauses = ranges.clause_count.log_normalize(self.clause_count);
        let length = ranges.avg_word_length.normalize(self.avg_word_length);
        let syntax = (clauses + length) / 2.0;

        round_to(
            rarity * weights.rarity
                + syntax * weights.syntax
                + morph * weights.morphology
                + dwr * weights.difficult_words,
            4,
        )
    }
}
