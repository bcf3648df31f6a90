//! The bounded generate, test and regenerate loop for one chunk.

use lexigrade_config::LexigradeConfig;
use lexigrade_core::{Annotator, CefrLevel, Language, Result};
use lexigrade_scoring::ConstraintSuite;
use serde::Serialize;
use tracing::{debug, warn};

use crate::collaborators::{Generator, Regeneration};
use crate::feedback::{build_hard_feedback, build_soft_feedback, fallback_feedback};

/// Outcome of testing one generated rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptVerdict {
    /// Hard and soft batteries both accepted the rewrite.
    Accepted,
    /// A hard test failed; `feedback` names the offending words.
    HardFailed { feedback: String },
    /// Hard tests passed but the soft pass ratio is too low.
    SoftFailed { feedback: String },
    /// The rewrite contains no words.
    Empty,
}

impl AttemptVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttemptVerdict::Accepted)
    }

    pub fn feedback(&self) -> Option<&str> {
        match self {
            AttemptVerdict::Accepted | AttemptVerdict::Empty => None,
            AttemptVerdict::HardFailed { feedback } | AttemptVerdict::SoftFailed { feedback } => {
                Some(feedback)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStatus {
    Accepted,
    /// Retries ran out; the last rewrite is kept.
    BestEffort,
    /// The generator never produced a rewrite.
    GeneratorUnavailable,
    /// The generator only answered without words.
    EmptyOutput,
}

/// What happened to one chunk at one target level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkReport {
    pub index: usize,
    pub target: CefrLevel,
    pub attempts: usize,
    pub generator_failures: usize,
    pub empty_outputs: usize,
    pub status: ChunkStatus,
    pub text: String,
}

impl ChunkReport {
    pub fn is_best_effort(&self) -> bool {
        self.status != ChunkStatus::Accepted
    }

    /// The chunk carries a rewrite, accepted or not.
    pub fn has_output(&self) -> bool {
        matches!(self.status, ChunkStatus::Accepted | ChunkStatus::BestEffort)
    }
}

/// Rewrites chunks toward the target of its constraint suite.
pub struct ChunkSimplifier<'a> {
    language: Language,
    suite: ConstraintSuite<'a>,
    annotator: &'a dyn Annotator,
    generator: &'a dyn Generator,
    max_retries: usize,
    soft_min_pass_ratio: f64,
    report_limit: usize,
}

impl<'a> ChunkSimplifier<'a> {
    pub fn new(
        language: Language,
        suite: ConstraintSuite<'a>,
        annotator: &'a dyn Annotator,
        generator: &'a dyn Generator,
        config: &LexigradeConfig,
    ) -> Self {
        Self {
            language,
            suite,
            annotator,
            generator,
            max_retries: config.flow.max_retries,
            soft_min_pass_ratio: config.flow.soft_min_pass_ratio,
            report_limit: config.lexical.report_limit,
        }
    }

    pub fn target(&self) -> CefrLevel {
        self.suite.target()
    }

    /// Tests a rewrite: the hard battery first, the soft battery only if the
    /// hard one passes. A rewrite without words is never tested.
    pub fn judge(&self, text: &str) -> Result<AttemptVerdict> {
        if text.trim().is_empty() {
            return Ok(AttemptVerdict::Empty);
        }
        let target = self.target();
        let sentences = self.annotator.annotate(self.language, text)?;
        let has_words = sentences
            .iter()
            .flat_map(|sentence| &sentence.tokens)
            .any(|token| token.is_alpha);
        if !has_words {
            return Ok(AttemptVerdict::Empty);
        }

        let hard = self.suite.evaluate_hard(&sentences);
        if !hard.accepted {
            return Ok(AttemptVerdict::HardFailed {
                feedback: build_hard_feedback(&hard, target, self.report_limit),
            });
        }

        let soft = self.suite.evaluate_soft(&sentences, self.soft_min_pass_ratio);
        if soft.accepted {
            return Ok(AttemptVerdict::Accepted);
        }
        Ok(AttemptVerdict::SoftFailed {
            feedback: build_soft_feedback(&soft, target)
                .unwrap_or_else(|| fallback_feedback(target)),
        })
    }

    /// Runs at most `1 + max_retries` generator calls on `chunk`.
    ///
    /// Returns the first accepted rewrite, otherwise the last one produced.
    /// Generator errors and blank rewrites are counted and retried;
    /// annotation errors abort.
    pub fn simplify(&self, index: usize, chunk: &str) -> Result<ChunkReport> {
        let target = self.target();
        let mut previous: Option<(String, String)> = None;
        let mut generator_failures = 0;
        let mut empty_outputs = 0;
        let mut attempts = 0;

        for attempt in 0..=self.max_retries {
            attempts += 1;
            let generated = match &previous {
                Some((output, feedback)) => self.generator.regenerate(&Regeneration {
                    language: self.language,
                    original: chunk,
                    previous: output,
                    target,
                    feedback,
                }),
                None => self.generator.generate(self.language, chunk, target),
            };

            let output = match generated {
                Ok(output) => output,
                Err(err) => {
                    generator_failures += 1;
                    warn!(
                        event = "generator_failed",
                        chunk = index,
                        attempt,
                        target = %target,
                        error = %err,
                    );
                    continue;
                }
            };

            let verdict = self.judge(&output)?;
            debug!(
                event = "attempt",
                chunk = index,
                attempt,
                target = %target,
                accepted = verdict.is_accepted(),
            );

            match verdict {
                AttemptVerdict::Accepted => {
                    return Ok(ChunkReport {
                        index,
                        target,
                        attempts,
                        generator_failures,
                        empty_outputs,
                        status: ChunkStatus::Accepted,
                        text: output,
                    });
                }
                AttemptVerdict::Empty => {
                    empty_outputs += 1;
                    warn!(event = "empty_generation", chunk = index, attempt, target = %target);
                }
                AttemptVerdict::HardFailed { feedback }
                | AttemptVerdict::SoftFailed { feedback } => {
                    previous = Some((output, feedback));
                }
            }
        }

        let (status, text) = match previous {
            Some((output, _)) => (ChunkStatus::BestEffort, output),
            None if empty_outputs > 0 => (ChunkStatus::EmptyOutput, String::new()),
            None => (ChunkStatus::GeneratorUnavailable, String::new()),
        };
        warn!(event = "chunk_best_effort", chunk = index, target = %target, status = ?status);
        Ok(ChunkReport {
            index,
            target,
            attempts,
            generator_failures,
            empty_outputs,
            status,
            text,
        })
    }
}
