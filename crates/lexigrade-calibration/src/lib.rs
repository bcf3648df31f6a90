//! Offline calibration of Lexigrade language resources.
//!
//! Builds the per-language files a [`LanguageProfile`](lexigrade_core::LanguageProfile)
//! is loaded from:
//!
//! - [`lexicon`] - CEFR lexicon and corpus frequencies from texts by level
//! - [`rarity`] - per-level rarity thresholds with sample statistics
//! - [`ranges`] - 5th/95th percentile windows of the classifier metrics
//! - [`subtlex`] - SUBTLEX frequency norms in the profile format
//!
//! [`Calibrator`] runs each step against the datasets directory of a
//! configuration and writes the resulting artifacts.

pub mod artifacts;
pub mod corpus;
pub mod lexicon;
pub mod pipeline;
pub mod ranges;
pub mod rarity;
pub mod subtlex;

pub use artifacts::{read_json, write_json};
pub use corpus::{normalize_level, LabelledText, TextsByLevel};
pub use lexicon::LexiconAccumulator;
pub use pipeline::Calibrator;
pub use ranges::{calibrate_metric_ranges, MetricSamples, MIN_RANGE_SAMPLES};
pub use rarity::{calibrate_rarity_thresholds, summarize_scores, text_rarity, MIN_RARITY_SAMPLES};
pub use subtlex::{convert_subtlex, convert_subtlex_file};
