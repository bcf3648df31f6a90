//! Lexigrade simplification flow.
//!
//! Drives an external generator toward a target CEFR level:
//!
//! 1. estimate the level of the original text
//! 2. pick a strategy (skip, one pass, or one level at a time)
//! 3. per chunk, generate and test against the hard and soft batteries,
//!    regenerating with feedback derived from the failed tests
//! 4. validate the assembled text and, if it passes, ask the reviewer for a
//!    semantic check

pub mod chunk;
pub mod collaborators;
pub mod feedback;
pub mod orchestrator;
pub mod retry;
pub mod review;
pub mod strategy;

#[cfg(test)]
mod test_utils;

pub use chunk::{chunk_text_by_words, split_sentences};
pub use collaborators::{Generator, Regeneration, Reviewer};
pub use feedback::{build_hard_feedback, build_soft_feedback, invalid_words};
pub use orchestrator::{FlowFailure, FlowOutcome, FlowStage, SimplificationOrchestrator};
pub use retry::{AttemptVerdict, ChunkReport, ChunkSimplifier, ChunkStatus};
pub use review::{ReviewDecision, SemanticReview};
pub use strategy::SimplificationStrategy;
