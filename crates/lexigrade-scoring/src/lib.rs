//! Linguistic constraint scoring for Lexigrade.
//!
//! This crate turns annotated sentences into pass/fail test results and
//! reduces them to acceptance decisions:
//! - [`LexicalComplexityEvaluator`] - lexicon level, OOV, difficult word ratio, morphology
//! - [`LexicalRarityEvaluator`] - mean corpus rarity against calibrated thresholds
//! - [`SyntacticComplexityEvaluator`] - clause density and average word length
//! - [`evaluate_hard`] / [`evaluate_soft`] - all-must-pass and ratio-must-pass reductions
//! - [`ConstraintSuite`] - the hard and soft batteries over a text
//!
//! Evaluators borrow an immutable [`LanguageProfile`](lexigrade_core::LanguageProfile)
//! and never mutate it, so scoring the same sentences twice yields identical
//! results.

pub mod aggregate;
pub mod lexical;
pub mod rarity;
pub mod suite;
pub mod syntactic;

#[cfg(test)]
mod test_utils;

pub use aggregate::{evaluate_hard, evaluate_soft, ConstraintDecision};
pub use lexical::LexicalComplexityEvaluator;
pub use rarity::LexicalRarityEvaluator;
pub use suite::ConstraintSuite;
pub use syntactic::SyntacticComplexityEvaluator;
