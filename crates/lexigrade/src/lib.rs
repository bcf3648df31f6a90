//! Lexigrade - CEFR reading level estimation and guided simplification
//!
//! Scores texts against per-language CEFR resources, estimates their level
//! and drives an external generator toward a target level.
//!
//! # Example
//!
//! ```rust
//! use lexigrade::prelude::*;
//! use lexigrade_test::{english_profile, FixtureAnnotator};
//!
//! let profile = english_profile();
//! let config = LexigradeConfig::default();
//! let suite = ConstraintSuite::new(&profile, &config, CefrLevel::A1);
//!
//! let decision = suite
//!     .run_hard_constraints(&FixtureAnnotator::english(), "The cat sleeps.")
//!     .unwrap();
//! assert!(decision.accepted);
//! ```

// Levels, annotation and resources
pub use lexigrade_core::{
    compare_levels, AnnotatedToken, Annotator, CefrLevel, Language, LanguageProfile,
    LevelTable, LexigradeError, Result, Sentence, TestKind, TestResult, TestStatus,
};

// Configuration
pub use lexigrade_config::{ClassifierStrategy, ConfigError, LexigradeConfig};

// Constraint batteries
pub use lexigrade_scoring::{ConstraintDecision, ConstraintSuite};

// Level estimation
pub use lexigrade_classifier::{
    CefrClassifier, CefrEstimate, CefrEstimator, NeuralCefrClassifier, NlpCefrClassifier,
    SequenceClassifier,
};

// Simplification flow
pub use lexigrade_flow::{
    FlowFailure, FlowOutcome, Generator, Regeneration, Reviewer, SemanticReview,
    SimplificationOrchestrator, SimplificationStrategy,
};

#[cfg(feature = "service")]
pub use lexigrade_service as service;

#[cfg(feature = "calibration")]
pub use lexigrade_calibration as calibration;

pub mod prelude {
    pub use super::{Annotator, CefrLevel, Language, LanguageProfile, LexigradeConfig};
    pub use super::{CefrEstimator, ConstraintDecision, ConstraintSuite};
    pub use super::{FlowOutcome, Generator, Reviewer, SimplificationOrchestrator};
}
