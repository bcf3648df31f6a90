//! Command execution.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use lexigrade_calibration::subtlex::convert_subtlex_file;
use lexigrade_calibration::{Calibrator, TextsByLevel};
use lexigrade_classifier::{CefrClassifier, CefrEstimator, SequenceClassifier};
use lexigrade_config::{ClassifierStrategy, LexigradeConfig};
use lexigrade_core::profile::files;
use lexigrade_core::{Annotator, Language, LanguageProfile};
use lexigrade_flow::SimplificationOrchestrator;
use lexigrade_scoring::ConstraintSuite;
use lexigrade_service::{HttpAnnotator, HttpGenerator, HttpReviewer, RemoteSequenceClassifier};
use serde_json::{json, Value};

use crate::args::{CalibrateCommand, Cli, Command, EstimateArgs, TargetArgs};

/// Reads a configuration file, choosing the format by extension.
pub fn load_config(path: &Path) -> anyhow::Result<LexigradeConfig> {
    let yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let config = if yaml {
        LexigradeConfig::from_yaml_file(path)
    } else {
        LexigradeConfig::from_toml_file(path)
    };
    config.with_context(|| format!("loading configuration from {}", path.display()))
}

/// Resolved configuration plus the collaborators built from it.
pub struct Context {
    config: Arc<LexigradeConfig>,
}

impl Context {
    /// Applies, in order: the configuration file, environment overrides and
    /// command line overrides.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => load_config(path)?,
            None => LexigradeConfig::default(),
        }
        .with_env_overrides();
        if let Some(datasets) = &cli.datasets {
            config = config.with_datasets_path(datasets);
        }
        config.validate().context("invalid configuration")?;
        Ok(Self::new(config))
    }

    pub fn new(config: LexigradeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &LexigradeConfig {
        &self.config
    }

    fn annotator(&self) -> anyhow::Result<Arc<dyn Annotator>> {
        let annotator = HttpAnnotator::from_config(&self.config.services)?;
        Ok(Arc::new(annotator))
    }

    fn profile(&self, language: Language) -> anyhow::Result<Arc<LanguageProfile>> {
        let profile = LanguageProfile::load(&self.config.resources.datasets_path, language)
            .with_context(|| format!("loading the {language} language profile"))?
            .with_entity_filter(self.config.resources.excluded_entities.clone());
        Ok(Arc::new(profile))
    }

    fn classifier(
        &self,
        profile: Arc<LanguageProfile>,
        annotator: Arc<dyn Annotator>,
    ) -> anyhow::Result<CefrClassifier> {
        let language = profile.language();
        let model: Option<Arc<dyn SequenceClassifier>> =
            match CefrClassifier::strategy_for(&self.config, language) {
                ClassifierStrategy::Neural => {
                    let remote = RemoteSequenceClassifier::from_config(&self.config.services)?;
                    Some(Arc::new(remote))
                }
                ClassifierStrategy::Metric => None,
            };
        let classifier =
            CefrClassifier::for_profile(profile, annotator, Arc::clone(&self.config), model)
                .with_context(|| format!("building the {language} classifier"))?;
        Ok(classifier)
    }

    /// Runs `command` and returns its JSON result.
    pub fn run(&self, command: &Command) -> anyhow::Result<Value> {
        match command {
            Command::Estimate(args) => self.estimate(args),
            Command::Hard(args) => self.constraints(args, Battery::Hard),
            Command::Soft(args) => self.constraints(args, Battery::Soft),
            Command::Execute(args) => self.execute(args),
            Command::Calibrate(command) => self.calibrate(command),
        }
    }

    fn estimate(&self, args: &EstimateArgs) -> anyhow::Result<Value> {
        let text = args.input.read()?;
        let annotator = self.annotator()?;
        let profile = self.profile(args.language)?;
        let classifier = match self.classifier(profile, annotator)? {
            CefrClassifier::Metric(metric) => {
                CefrClassifier::Metric(metric.with_debug_windows(args.debug_windows))
            }
            neural => neural,
        };
        Ok(serde_json::to_value(classifier.estimate(&text)?)?)
    }

    fn constraints(&self, args: &TargetArgs, battery: Battery) -> anyhow::Result<Value> {
        let text = args.input.read()?;
        let annotator = self.annotator()?;
        let profile = self.profile(args.language)?;
        let suite = ConstraintSuite::new(&profile, &self.config, args.target);
        let decision = match battery {
            Battery::Hard => suite.run_hard_constraints(annotator.as_ref(), &text)?,
            Battery::Soft => suite.run_soft_constraints(
                annotator.as_ref(),
                &text,
                self.config.flow.soft_min_pass_ratio,
            )?,
        };
        Ok(serde_json::to_value(decision)?)
    }

    fn execute(&self, args: &TargetArgs) -> anyhow::Result<Value> {
        let text = args.input.read()?;
        let annotator = self.annotator()?;
        let profile = self.profile(args.language)?;
        let classifier = self.classifier(Arc::clone(&profile), Arc::clone(&annotator))?;
        let generator = HttpGenerator::from_config(&self.config.services)?;
        let reviewer = HttpReviewer::from_config(&self.config.services)?;

        let orchestrator = SimplificationOrchestrator::new(
            Arc::clone(&self.config),
            annotator,
            Arc::new(generator),
            Arc::new(reviewer),
        )
        .with_language(profile, Arc::new(classifier));

        let outcome = orchestrator.execute_flow(args.language, &text, args.target)?;
        Ok(serde_json::to_value(outcome)?)
    }

    fn calibrate(&self, command: &CalibrateCommand) -> anyhow::Result<Value> {
        let language = command.language();
        match command {
            CalibrateCommand::Lexicon { input, .. } => {
                let texts = TextsByLevel::load(input)
                    .with_context(|| format!("reading texts from {}", input.display()))?;
                let accumulator =
                    self.with_calibrator(language, |calibrator| calibrator.build_lexicon(texts))?;
                Ok(json!({
                    "language": language,
                    "texts": accumulator.texts(),
                    "lemmas": accumulator.lexicon().len(),
                    "total_tokens": accumulator.corpus().total_tokens,
                }))
            }
            CalibrateCommand::Rarity { .. } => {
                let thresholds = self.with_calibrator(language, |calibrator| calibrator.rarity())?;
                Ok(serde_json::to_value(thresholds)?)
            }
            CalibrateCommand::Ranges { .. } => {
                let ranges =
                    self.with_calibrator(language, |calibrator| calibrator.metric_ranges())?;
                Ok(serde_json::to_value(ranges)?)
            }
            CalibrateCommand::Subtlex { source, .. } => {
                let destination =
                    LanguageProfile::directory(&self.config.resources.datasets_path, language)
                        .join(files::SUBTLEX);
                let source = source.as_deref().unwrap_or(destination.as_path());
                let table = convert_subtlex_file(language, source, &destination)?;
                Ok(json!({"language": language, "words": table.len()}))
            }
        }
    }

    fn with_calibrator<T>(
        &self,
        language: Language,
        step: impl FnOnce(&Calibrator<'_>) -> lexigrade_core::Result<T>,
    ) -> anyhow::Result<T> {
        let annotator = self.annotator()?;
        let calibrator = Calibrator::new(&self.config, annotator.as_ref(), language);
        step(&calibrator).with_context(|| format!("calibrating {language}"))
    }
}

#[derive(Debug, Clone, Copy)]
enum Battery {
    Hard,
    Soft,
}

/// JSON object reported for a failed command.
pub fn error_value(error: &anyhow::Error) -> Value {
    json!({ "error": format!("{error:#}") })
}
