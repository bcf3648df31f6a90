//! End-to-end simplification of a text toward a target level.


use std::collections::HashMap;
use std::sync::Arc;

use lexigrade_classifier::CefrEstimator;
use lexigrade_config::LexigradeConfig;
use lexigrade_core::{Annotator, CefrLevel, Language, LanguageProfile, LexigradeError, Result};
use lexigrade_scoring::{ConstraintDecision, ConstraintSuite};
use serde::Serialize;
use tracing::{info, warn};

use crate::chunk::chunk_text_by_words;
use crate::collaborators::{Generator, Reviewer};
use crate::retry::{ChunkReport, ChunkSimplifier};
use crate::review::{SemanticReview, REVIEWER_UNAVAILABLE};
use crate::strategy::SimplificationStrategy;

/// Step of the flow that stopped it early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    /// Rewriting chunks toward a stage target.
    Simplify,
    /// Testing the assembled text.
    Validate,
}

/// Why the flow produced no acceptable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowFailure {
    /// No chunk yielded a rewrite.
    NoOutput,
    /// A collaborator failed; chunks finished before it are kept.
    Collaborator { stage: FlowStage, error: String },
}

/// Result of [`SimplificationOrchestrator::execute_flow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowOutcome {
    /// Final hard and soft batteries both accepted a non-empty text.
    pub accepted: bool,
    pub strategy: SimplificationStrategy,
    pub original_cefr: CefrLevel,
    pub target_cefr: CefrLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_hard_tests: Option<ConstraintDecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_soft_tests: Option<ConstraintDecision>,
    /// Soft battery accepted despite some failed soft tests.
    pub soft_relaxed: bool,
    /// Explanation of a failing semantic review.
    pub semantic_alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_review: Option<SemanticReview>,
    /// Some chunk was kept without passing its tests.
    pub best_effort: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FlowFailure>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<ChunkReport>,
    pub text: String,
}

impl FlowOutcome {
    fn unchecked(
        strategy: SimplificationStrategy,
        original_cefr: CefrLevel,
        target_cefr: CefrLevel,
        text: String,
    ) -> Self {
        Self {
            accepted: false,
            strategy,
            original_cefr,
            target_cefr,
            final_hard_tests: None,
            final_soft_tests: None,
            soft_relaxed: false,
            semantic_alert: None,
            semantic_review: None,
            best_effort: false,
            failure: None,
            chunks: Vec::new(),
            text,
        }
    }

    fn with_chunks(mut self, chunks: Vec<ChunkReport>) -> Self {
        self.best_effort = chunks.iter().any(ChunkReport::is_best_effort);
        self.chunks = chunks;
        self
    }

    fn failed(mut self, failure: FlowFailure) -> Self {
        warn!(event = "flow_failed", failure = ?failure);
        self.failure = Some(failure);
        self
    }
}

struct LanguageResources {
    profile: Arc<LanguageProfile>,
    estimator: Arc<dyn CefrEstimator>,
}

/// Runs the estimate, rewrite and validate flow for registered languages.
///
/// # Example
///
/// ```ignore
/// let orchestrator = SimplificationOrchestrator::new(config, annotator, generator, reviewer)
///     .with_language(english_profile, english_classifier);
/// let outcome = orchestrator.execute_flow(Language::English, text, CefrLevel::A2)?;
/// ```
pub struct SimplificationOrchestrator {
    config: Arc<LexigradeConfig>,
    annotator: Arc<dyn Annotator>,
    generator: Arc<dyn Generator>,
    reviewer: Arc<dyn Reviewer>,
    languages: HashMap<Language, LanguageResources>,
}

impl SimplificationOrchestrator {
    pub fn new(
        config: Arc<LexigradeConfig>,
        annotator: Arc<dyn Annotator>,
        generator: Arc<dyn Generator>,
        reviewer: Arc<dyn Reviewer>,
    ) -> Self {
        Self {
            config,
            annotator,
            generator,
            reviewer,
            languages: HashMap::new(),
        }
    }

    /// Registers the profile and level estimator of a language.
    pub fn with_language(
        mut self,
        profile: Arc<LanguageProfile>,
        estimator: Arc<dyn CefrEstimator>,
    ) -> Self {
        self.languages.insert(
            profile.language(),
            LanguageResources { profile, estimator },
        );
        self
    }

    pub fn supports(&self, language: Language) -> bool {
        self.languages.contains_key(&language)
    }

    /// Simplifies `text` toward `target`.
    ///
    /// # Errors
    ///
    /// Fails for unregistered languages and when the original text cannot be
    /// estimated. Later collaborator failures degrade the outcome instead:
    /// the chunks finished so far are returned with a [`FlowFailure`].
    pub fn execute_flow(
        &self,
        language: Language,
        text: &str,
        target: CefrLevel,
    ) -> Result<FlowOutcome> {
        let resources = self.languages.get(&language).ok_or_else(|| {
            LexigradeError::InvalidInput(format!("no language profile registered for {language}"))
        })?;

        info!(event = "flow_start", language = %language, target = %target);

        let original = resources.estimator.estimate(text)?.estimated_level;
        let strategy = SimplificationStrategy::select(original, target);
        info!(
            event = "strategy_selected",
            original = %original,
            target = %target,
            strategy = %strategy,
        );

        if strategy == SimplificationStrategy::NotNecessary {
            info!(event = "flow_end", accepted = true, strategy = %strategy);
            return Ok(FlowOutcome {
                accepted: true,
                ..FlowOutcome::unchecked(strategy, original, target, text.to_string())
            });
        }

        let profile = resources.profile.as_ref();
        let mut current = text.to_string();
        let mut chunks = Vec::new();
        for (stage, stage_target) in strategy.targets(original, target).into_iter().enumerate() {
            info!(event = "stage_start", stage, target = %stage_target);
            let (reports, error) = self.simplify_stage(profile, &current, stage_target);
            if !reports.is_empty() || error.is_none() {
                current = join_chunks(&reports);
            }
            chunks.extend(reports);

            if let Some(err) = error {
                let failure = FlowFailure::Collaborator {
                    stage: FlowStage::Simplify,
                    error: err.to_string(),
                };
                return Ok(FlowOutcome::unchecked(strategy, original, target, current)
                    .with_chunks(chunks)
                    .failed(failure));
            }
            if current.trim().is_empty() {
                return Ok(FlowOutcome::unchecked(strategy, original, target, current)
                    .with_chunks(chunks)
                    .failed(FlowFailure::NoOutput));
            }
        }

        let suite = ConstraintSuite::new(profile, &self.config, target);
        let sentences = match self.annotator.annotate(language, &current) {
            Ok(sentences) => sentences,
            Err(err) => {
                let failure = FlowFailure::Collaborator {
                    stage: FlowStage::Validate,
                    error: err.to_string(),
                };
                return Ok(FlowOutcome::unchecked(strategy, original, target, current)
                    .with_chunks(chunks)
                    .failed(failure));
            }
        };
        let hard = suite.evaluate_hard(&sentences);
        let soft = suite.evaluate_soft(&sentences, self.config.flow.soft_min_pass_ratio);

        let semantic_review = if hard.accepted && soft.accepted {
            Some(self.review(language, text, &current))
        } else {
            None
        };
        let semantic_alert = semantic_review
            .as_ref()
            .and_then(SemanticReview::alert)
            .map(String::from);

        let accepted = hard.accepted && soft.accepted;
        let outcome = FlowOutcome {
            accepted,
            soft_relaxed: soft.accepted && soft.has_failures(),
            final_hard_tests: Some(hard),
            final_soft_tests: Some(soft),
            semantic_alert,
            semantic_review,
            ..FlowOutcome::unchecked(strategy, original, target, current)
        }
        .with_chunks(chunks);
        info!(
            event = "flow_end",
            accepted,
            strategy = %strategy,
            chunks = outcome.chunks.len(),
            best_effort = outcome.best_effort,
            semantic_alert = outcome.semantic_alert.is_some(),
        );
        Ok(outcome)
    }

    /// Rewrites every chunk of `text`, stopping at the first collaborator
    /// error. Reports of the chunks finished before it are kept.
    fn simplify_stage(
        &self,
        profile: &LanguageProfile,
        text: &str,
        target: CefrLevel,
    ) -> (Vec<ChunkReport>, Option<LexigradeError>) {
        let suite = ConstraintSuite::new(profile, &self.config, target);
        let simplifier = ChunkSimplifier::new(
            profile.language(),
            suite,
            self.annotator.as_ref(),
            self.generator.as_ref(),
            &self.config,
        );
        let mut reports = Vec::new();
        for (index, chunk) in chunk_text_by_words(text, self.config.flow.chunk_max_words)
            .iter()
            .enumerate()
        {
            match simplifier.simplify(index, chunk) {
                Ok(report) => reports.push(report),
                Err(err) => return (reports, Some(err)),
            }
        }
        (reports, None)
    }

    fn review(&self, language: Language, original: &str, simplified: &str) -> SemanticReview {
        match self.reviewer.review(language, original, simplified) {
            Ok(raw) => SemanticReview::parse(&raw),
            Err(err) => {
                warn!(event = "reviewer_failed", error = %err);
                SemanticReview::failed(REVIEWER_UNAVAILABLE, "")
            }
        }
    }
}

/// Joins chunk rewrites with a space, skipping chunks without output.
fn join_chunks(reports: &[ChunkReport]) -> String {
    reports
        .iter()
        .map(|report| report.text.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl std::fmt::Debug for SimplificationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut languages: Vec<Language> = self.languages.keys().copied().collect();
        languages.sort();
        f.debug_struct("SimplificationOrchestrator")
            .field("languages", &languages)
            .field("flow", &self.config.flow)
            .finish_non_exhaustive()
    }
}
