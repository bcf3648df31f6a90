//! Lexigrade Core - Core types and traits for CEFR text scoring
//!
//! This crate provides the fundamental abstractions for Lexigrade:
//! - CEFR levels and level-keyed threshold tables
//! - Annotated tokens, sentences and the annotator contract
//! - Test results produced by the linguistic evaluators
//! - Language profiles bundling the read-only scoring resources

pub mod annotation;
pub mod error;
pub mod language;
pub mod level;
pub mod profile;
pub mod stats;
pub mod test_result;

pub use annotation::{AnnotatedToken, Annotator, EntityFilter, PartOfSpeech, Sentence};
pub use error::{LexigradeError, Result};
pub use language::Language;
pub use level::{compare_levels, CefrLevel, LevelTable, ParseLevelError};
pub use profile::{
    CorpusFrequencies, FrequencyTable, LanguageProfile, LevelStatistics, Lexicon, MetricRanges,
    PercentileRange, RarityThresholds, ZipfEntry,
};
pub use test_result::{TestDetails, TestKind, TestResult, TestStatus};
