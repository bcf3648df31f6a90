//! External services the flow drives.

use std::sync::Arc;

use lexigrade_core::{CefrLevel, Language, Result};

/// Inputs of a feedback-driven rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regeneration<'a> {
    pub language: Language,
    /// The text being simplified.
    pub original: &'a str,
    /// The rejected rewrite.
    pub previous: &'a str,
    pub target: CefrLevel,
    /// Why the previous rewrite was rejected.
    pub feedback: &'a str,
}

/// Rewrites text toward a CEFR level.
pub trait Generator: Send + Sync {
    fn generate(&self, language: Language, text: &str, target: CefrLevel) -> Result<String>;

    fn regenerate(&self, request: &Regeneration<'_>) -> Result<String>;
}

/// Judges whether a simplification preserves the meaning of the original.
///
/// Returns the reviewer's raw output, expected to be a JSON object with a
/// `final_decision` of `PASS` or `FAIL`.
pub trait Reviewer: Send + Sync {
    fn review(&self, language: Language, original: &str, simplified: &str) -> Result<String>;
}

impl<G: Generator + ?Sized> Generator for Arc<G> {
    fn generate(&self, language: Language, text: &str, target: CefrLevel) -> Result<String> {
        (**self).generate(language, text, target)
    }

    fn regenerate(&self, request: &Regeneration<'_>) -> Result<String> {
        (**self).regenerate(request)
    }
}

impl<R: Reviewer + ?Sized> Reviewer for Arc<R> {
    fn review(&self, language: Language, original: &str, simplified: &str) -> Result<String> {
        (**self).review(language, original, simplified)
    }
}
