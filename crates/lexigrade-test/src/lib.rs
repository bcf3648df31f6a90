//! Shared test fixtures for Lexigrade crates.
//!
//! This crate provides deterministic stand-ins for the external linguistic
//! resources. It depends only on `lexigrade-core` so every other crate can
//! use it as a dev-dependency.
//!
//! - [`tokens`] - Token and sentence builders
//! - [`annotator`] - Rule-based [`FixtureAnnotator`]
//! - [`profiles`] - Small in-memory English and Spanish language profiles
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! lexigrade-test = { workspace = true }
//! ```
//!
//! ```
//! use lexigrade_core::{Annotator, Language};
//! use lexigrade_test::{english_profile, FixtureAnnotator};
//!
//! let annotator = FixtureAnnotator::english();
//! let sentences = annotator.annotate(Language::English, "The cat sleeps.").unwrap();
//! assert_eq!(sentences.len(), 1);
//! assert!(english_profile().lexicon().contains("cat"));
//! ```

pub mod annotator;
pub mod profiles;
pub mod tokens;

pub use annotator::{FixtureAnnotator, TokenSpec};
pub use profiles::{english_profile, metric_ranges, spanish_profile};
pub use tokens::{entity, noun, punct, sentence, token, verb};
