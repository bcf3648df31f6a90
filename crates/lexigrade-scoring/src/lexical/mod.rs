//! Lexical complexity checks against the CEFR lexicon.
//!
//! All four checks consider only eligible tokens: alphabetic, not proper
//! nouns and not inside an excluded named entity.

#[cfg(test)]
mod tests;

use lexigrade_config::LexicalConfig;
use lexigrade_core::annotation::eligible_tokens;
use lexigrade_core::stats::round_to;
use lexigrade_core::test_result::{
    CefrValidityDetails, ComplexWord, DifficultWordDetails, FlaggedWord, MorphologicalDetails,
    MorphologyKind, OovDetails,
};
use lexigrade_core::{
    AnnotatedToken, CefrLevel, LanguageProfile, PartOfSpeech, Sentence, TestDetails, TestKind,
    TestResult, TestStatus,
};

/// Lexicon-based checks for one language profile and target level.
///
/// # Example
///
/// ```
/// use lexigrade_config::LexicalConfig;
/// use lexigrade_core::{Annotator, CefrLevel, Language};
/// use lexigrade_scoring::LexicalComplexityEvaluator;
/// use lexigrade_test::{english_profile, FixtureAnnotator};
///
/// let profile = english_profile();
/// let config = LexicalConfig::default();
/// let evaluator = LexicalComplexityEvaluator::new(&profile, &config, CefrLevel::A1);
///
/// let sentences = FixtureAnnotator::english()
///     .annotate(Language::English, "The cat sleeps.")
///     .unwrap();
/// assert!(evaluator.check_oov(&sentences).passed());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LexicalComplexityEvaluator<'a> {
    profile: &'a LanguageProfile,
    config: &'a LexicalConfig,
    target: CefrLevel,
}

impl<'a> LexicalComplexityEvaluator<'a> {
    pub fn new(profile: &'a LanguageProfile, config: &'a LexicalConfig, target: CefrLevel) -> Self {
        Self {
            profile,
            config,
            target,
        }
    }

    pub fn target(&self) -> CefrLevel {
        self.target
    }

    fn words<'s>(&'s self, sentences: &'s [Sentence]) -> impl Iterator<Item = &'s AnnotatedToken> {
        eligible_tokens(sentences, self.profile.entity_filter())
    }

    /// Lexicon level of `lemma` if it is above the target level.
    fn level_above_target(&self, lemma: &str) -> Option<CefrLevel> {
        self.profile
            .lexicon()
            .level(lemma)
            .filter(|level| *level > self.target)
    }

    /// Cost of using `lemma` at `level` in a text aimed at the target level.
    ///
    /// `distance × frequency weight × abstractness weight`
    pub fn lexical_cost(&self, lemma: &str, level: CefrLevel) -> f64 {
        let distance = level.distance_from(self.target) as f64;
        let zipf = self.profile.frequencies().zipf(lemma);
        distance * self.config.frequency_weight(zipf) * self.config.abstractness_weight(lemma)
    }

    /// Gradient lexical validity: sums the cost of above-level words.
    ///
    /// Words costing less than the flag minimum are tolerated and contribute
    /// nothing. Passes iff the total stays within the level's budget.
    pub fn check_cefr_validity(&self, sentences: &[Sentence]) -> TestResult {
        let budget = self.config.cost_budget(self.target);
        let mut total_cost = 0.0;
        let mut flagged_count = 0;
        let mut flagged_words = Vec::new();

        for token in self.words(sentences) {
            let Some(level) = self.level_above_target(&token.lemma) else {
                continue;
            };
            let cost = self.lexical_cost(&token.lemma, level);
            if cost < self.config.min_flag_cost {
                continue;
            }
            total_cost += cost;
            flagged_count += 1;
            if flagged_words.len() < self.config.report_limit {
                flagged_words.push(FlaggedWord {
                    word: token.text.clone(),
                    lemma: token.lemma.clone(),
                    level,
                    cost: round_to(cost, 2),
                });
            }
        }

        TestResult::new(
            TestKind::CefrValidity,
            TestStatus::at_most(total_cost, budget),
            TestDetails::CefrValidity(CefrValidityDetails {
                total_cost: round_to(total_cost, 2),
                budget,
                flagged_count,
                flagged_words,
            }),
        )
    }

    /// Out-of-vocabulary detection. Passes iff every eligible lemma is in
    /// the lexicon.
    pub fn check_oov(&self, sentences: &[Sentence]) -> TestResult {
        let lexicon = self.profile.lexicon();
        let mut oov_count = 0;
        let mut oov_words: Vec<String> = Vec::new();

        for token in self.words(sentences) {
            if lexicon.contains(&token.lemma) {
                continue;
            }
            oov_count += 1;
            if oov_words.len() < self.config.report_limit && !oov_words.contains(&token.lemma) {
                oov_words.push(token.lemma.clone());
            }
        }

        let status = if oov_count == 0 {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        };
        TestResult::new(
            TestKind::Oov,
            status,
            TestDetails::Oov(OovDetails {
                oov_count,
                oov_words,
            }),
        )
    }

    /// Share of eligible words that are OOV or above the target level.
    pub fn check_difficult_word_ratio(&self, sentences: &[Sentence]) -> TestResult {
        let threshold = self.config.difficult_word_threshold(self.target);
        let lexicon = self.profile.lexicon();
        let mut total_words = 0;
        let mut difficult_words = 0;
        let mut examples = Vec::new();

        for token in self.words(sentences) {
            total_words += 1;
            let difficult = match lexicon.level(&token.lemma) {
                Some(level) => level > self.target,
                None => true,
            };
            if difficult {
                difficult_words += 1;
                if examples.len() < self.config.report_limit {
                    examples.push(token.text.clone());
                }
            }
        }

        let ratio = if total_words == 0 {
            0.0
        } else {
            difficult_words as f64 / total_words as f64
        };

        TestResult::new(
            TestKind::DifficultWordRatio,
            TestStatus::at_most(ratio, threshold),
            TestDetails::DifficultWordRatio(DifficultWordDetails {
                ratio,
                threshold,
                difficult_words,
                total_words,
                examples,
            }),
        )
    }

    /// Share of eligible words that are low-frequency derived forms.
    ///
    /// A noun in an argument position whose lemma differs from its surface
    /// form, or an adverb whose lemma differs from its surface form, counts
    /// when its Zipf frequency is below the configured cut.
    pub fn check_morphological_complexity(&self, sentences: &[Sentence]) -> TestResult {
        let threshold = self.config.morphology_threshold(self.target);
        let mut total_words = 0;
        let mut complex_count = 0;
        let mut complex_words = Vec::new();

        for token in self.words(sentences) {
            total_words += 1;
            let Some(kind) = self.derivation(token) else {
                continue;
            };
            let zipf = self.profile.frequencies().zipf(&token.lemma);
            if zipf >= self.config.morphology_max_zipf {
                continue;
            }
            complex_count += 1;
            if complex_words.len() < self.config.report_limit {
                complex_words.push(ComplexWord {
                    word: token.text.clone(),
                    lemma: token.lemma.clone(),
                    pos: token.pos.as_str().to_string(),
                    zipf,
                    kind,
                });
            }
        }

        let ratio = if total_words == 0 {
            0.0
        } else {
            complex_count as f64 / total_words as f64
        };

        TestResult::new(
            TestKind::MorphologicalComplexity,
            TestStatus::at_most(ratio, threshold),
            TestDetails::MorphologicalComplexity(MorphologicalDetails {
                ratio,
                threshold,
                complex_count,
                complex_words,
                total_words,
            }),
        )
    }

    fn derivation(&self, token: &AnnotatedToken) -> Option<MorphologyKind> {
        if token.lemma == token.text.to_lowercase() {
            return None;
        }
        match token.pos {
            PartOfSpeech::Noun if self.config.is_morphology_dependency(&token.dep) => {
                Some(MorphologyKind::DerivedNoun)
            }
            PartOfSpeech::Adv => Some(MorphologyKind::DerivedAdverb),
            _ => None,
        }
    }
}
