//! The hard and soft constraint batteries.
//!
//! Hard: CEFR validity, OOV and difficult word ratio, all of which must
//! pass. Soft: morphological complexity, lexical rarity, clause count and
//! average word length, accepted by pass ratio.

use lexigrade_config::LexigradeConfig;
use lexigrade_core::{Annotator, CefrLevel, LanguageProfile, Result, Sentence, TestResult};
use tracing::debug;

use crate::aggregate::{evaluate_hard, evaluate_soft, ConstraintDecision};
use crate::lexical::LexicalComplexityEvaluator;
use crate::rarity::LexicalRarityEvaluator;
use crate::syntactic::SyntacticComplexityEvaluator;

/// Runs every constraint test for one profile and target level.
///
/// # Example
///
/// ```
/// use lexigrade_config::LexigradeConfig;
/// use lexigrade_core::CefrLevel;
/// use lexigrade_scoring::ConstraintSuite;
/// use lexigrade_test::{english_profile, FixtureAnnotator};
///
/// let profile = english_profile();
/// let config = LexigradeConfig::default();
/// let annotator = FixtureAnnotator::english();
/// let suite = ConstraintSuite::new(&profile, &config, CefrLevel::A1);
///
/// let decision = suite.run_hard_constraints(&annotator, "The cat sleeps.").unwrap();
/// assert!(decision.accepted);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstraintSuite<'a> {
    profile: &'a LanguageProfile,
    config: &'a LexigradeConfig,
    target: CefrLevel,
}

impl<'a> ConstraintSuite<'a> {
    pub fn new(
        profile: &'a LanguageProfile,
        config: &'a LexigradeConfig,
        target: CefrLevel,
    ) -> Self {
        Self {
            profile,
            config,
            target,
        }
    }

    pub fn target(&self) -> CefrLevel {
        self.target
    }

    pub fn lexical(&self) -> LexicalComplexityEvaluator<'a> {
        LexicalComplexityEvaluator::new(self.profile, &self.config.lexical, self.target)
    }

    pub fn rarity(&self) -> LexicalRarityEvaluator<'a> {
        LexicalRarityEvaluator::new(self.profile, self.target).with_top_k(self.config.rarity.top_k)
    }

    pub fn syntactic(&self) -> SyntacticComplexityEvaluator<'a> {
        SyntacticComplexityEvaluator::new(self.profile, &self.config.syntactic, self.target)
    }

    /// Individual hard test results, in battery order.
    pub fn hard_results(&self, sentences: &[Sentence]) -> Vec<TestResult> {
        let lexical = self.lexical();
        vec![
            lexical.check_cefr_validity(sentences),
            lexical.check_oov(sentences),
            lexical.check_difficult_word_ratio(sentences),
        ]
    }

    /// Individual soft test results, in battery order.
    pub fn soft_results(&self, sentences: &[Sentence]) -> Vec<TestResult> {
        let syntactic = self.syntactic();
        vec![
            self.lexical().check_morphological_complexity(sentences),
            self.rarity().calculate(sentences),
            syntactic.check_clause_count(sentences),
            syntactic.check_average_word_length(sentences),
        ]
    }

    pub fn evaluate_hard(&self, sentences: &[Sentence]) -> ConstraintDecision {
        let decision = evaluate_hard(self.hard_results(sentences));
        debug!(
            event = "hard_constraints",
            target = %self.target,
            accepted = decision.accepted,
            failed = decision.failed_tests.len(),
        );
        decision
    }

    pub fn evaluate_soft(&self, sentences: &[Sentence], min_pass_ratio: f64) -> ConstraintDecision {
        let decision = evaluate_soft(self.soft_results(sentences), min_pass_ratio);
        debug!(
            event = "soft_constraints",
            target = %self.target,
            accepted = decision.accepted,
            pass_ratio = decision.pass_ratio.unwrap_or(1.0),
        );
        decision
    }

    /// Annotates `text` and runs the hard battery.
    pub fn run_hard_constraints(
        &self,
        annotator: &dyn Annotator,
        text: &str,
    ) -> Result<ConstraintDecision> {
        let sentences = annotator.annotate(self.profile.language(), text)?;
        Ok(self.evaluate_hard(&sentences))
    }

    /// Annotates `text` and runs the soft battery.
    pub fn run_soft_constraints(
        &self,
        annotator: &dyn Annotator,
        text: &str,
        min_pass_ratio: f64,
    ) -> Result<ConstraintDecision> {
        let sentences = annotator.annotate(self.profile.language(), text)?;
        Ok(self.evaluate_soft(&sentences, min_pass_ratio))
    }
}
