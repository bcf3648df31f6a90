//! Lexical rarity against the calibration corpus.

use lexigrade_core::annotation::eligible_tokens;
use lexigrade_core::test_result::{RarityDetails, RareWord};
use lexigrade_core::{
    CefrLevel, LanguageProfile, Sentence, TestDetails, TestKind, TestResult, TestStatus,
};

/// Default number of rarest words listed in a result.
pub const DEFAULT_TOP_K: usize = 5;

/// Scores texts by the mean information content of their words.
///
/// Each eligible lemma has rarity `-ln((freq + 1) / (total_tokens + V))`
/// under the corpus frequencies of the profile. A text passes when the mean
/// rarity is at most the calibrated threshold of the target level; levels
/// without a threshold always pass.
#[derive(Debug, Clone, Copy)]
pub struct LexicalRarityEvaluator<'a> {
    profile: &'a LanguageProfile,
    target: CefrLevel,
    top_k: usize,
}

impl<'a> LexicalRarityEvaluator<'a> {
    pub fn new(profile: &'a LanguageProfile, target: CefrLevel) -> Self {
        Self {
            profile,
            target,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Sets how many of the rarest words are reported.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Rarity of a single lemma.
    pub fn word_rarity(&self, lemma: &str) -> f64 {
        self.profile.corpus().rarity(lemma)
    }

    pub fn calculate(&self, sentences: &[Sentence]) -> TestResult {
        let corpus = self.profile.corpus();
        let threshold = self.profile.rarity_thresholds().threshold(self.target);

        let mut per_word: Vec<RareWord> = eligible_tokens(sentences, self.profile.entity_filter())
            .map(|token| RareWord {
                word: token.text.clone(),
                lemma: token.lemma.clone(),
                rarity: self.word_rarity(&token.lemma),
                freq: corpus.count(&token.lemma),
            })
            .collect();

        let words_evaluated = per_word.len();
        let rarity_score = if per_word.is_empty() {
            0.0
        } else {
            per_word.iter().map(|w| w.rarity).sum::<f64>() / words_evaluated as f64
        };

        let status = match threshold {
            Some(limit) => TestStatus::at_most(rarity_score, limit),
            None => TestStatus::Pass,
        };

        per_word.sort_by(|a, b| b.rarity.total_cmp(&a.rarity));
        per_word.truncate(self.top_k);

        TestResult::new(
            TestKind::LexicalRarity,
            status,
            TestDetails::LexicalRarity(RarityDetails {
                rarity_score,
                threshold,
                words_evaluated,
                top_rare_words: per_word,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use lexigrade_core::{CorpusFrequencies, Language, LevelTable, Lexicon, RarityThresholds};
    use lexigrade_test::{entity, noun, punct, sentence};

    use super::*;
    use crate::test_utils::assert_close;

    fn profile() -> LanguageProfile {
        let mut corpus = CorpusFrequencies::new();
        corpus.add("house", 9);
        corpus.add("cat", 1);
        let thresholds = LevelTable::empty()
            .with(CefrLevel::A1, Some(1.0))
            .with(CefrLevel::C2, None);
        LanguageProfile::new(
            Language::English,
            Lexicon::new(),
            corpus,
            RarityThresholds::new(thresholds),
        )
    }

    fn text() -> Vec<Sentence> {
        vec![sentence(vec![
            noun("house", "nsubj"),
            noun("cat", "dobj"),
            noun("zebra", "pobj"),
            entity("Kenya", "GPE"),
            punct("."),
        ])]
    }

    #[test]
    fn test_mean_rarity_above_threshold_fails() {
        let profile = profile();
        let result = LexicalRarityEvaluator::new(&profile, CefrLevel::A1).calculate(&text());
        let details = result.details.as_rarity().unwrap();

        // total 10, V 2: ln(12/10), ln(12/2), ln(12/1)
        let expected = (1.2f64.ln() + 6.0f64.ln() + 12.0f64.ln()) / 3.0;
        assert_close(details.rarity_score, expected);
        assert_eq!(details.words_evaluated, 3);
        assert_eq!(details.threshold, Some(1.0));
        assert_eq!(result.status, TestStatus::Fail);
    }

    #[test]
    fn test_level_without_threshold_passes() {
        let profile = profile();
        for level in [CefrLevel::B1, CefrLevel::C2] {
            let result = LexicalRarityEvaluator::new(&profile, level).calculate(&text());
            assert!(result.passed());
            assert_eq!(result.details.as_rarity().unwrap().threshold, None);
        }
    }

    #[test]
    fn test_top_rare_words_sorted_descending() {
        let profile = profile();
        let result = LexicalRarityEvaluator::new(&profile, CefrLevel::A1)
            .with_top_k(2)
            .calculate(&text());
        let top = &result.details.as_rarity().unwrap().top_rare_words;

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].lemma, "zebra");
        assert_eq!(top[0].freq, 0);
        assert_eq!(top[1].lemma, "cat");
    }

    #[test]
    fn test_no_eligible_words_scores_zero() {
        let profile = profile();
        let sentences = vec![sentence(vec![entity("Kenya", "GPE"), punct(".")])];
        let result = LexicalRarityEvaluator::new(&profile, CefrLevel::A1).calculate(&sentences);
        let details = result.details.as_rarity().unwrap();

        assert!(result.passed());
        assert_eq!(details.rarity_score, 0.0);
        assert_eq!(details.words_evaluated, 0);
        assert!(details.top_rare_words.is_empty());
    }
}
