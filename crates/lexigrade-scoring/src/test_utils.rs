//! Test helpers for the scoring crate.

use lexigrade_config::LexigradeConfig;
use lexigrade_core::{Annotator, Language, Sentence};
use lexigrade_test::FixtureAnnotator;

/// Annotates `text` with the English fixture annotator.
pub fn english(text: &str) -> Vec<Sentence> {
    FixtureAnnotator::english()
        .annotate(Language::English, text)
        .unwrap()
}

/// Default configuration.
pub fn config() -> LexigradeConfig {
    LexigradeConfig::default()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
