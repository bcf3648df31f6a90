//! Per-language strategy selection.

use std::sync::Arc;

use lexigrade_config::{ClassifierStrategy, LexigradeConfig};
use lexigrade_core::{Annotator, Language, LanguageProfile, LexigradeError, Result};
use tracing::info;

use crate::estimate::{CefrEstimate, CefrEstimator};
use crate::metric::NlpCefrClassifier;
use crate::neural::{NeuralCefrClassifier, SequenceClassifier};

/// The classifier configured for one language.
#[derive(Debug)]
pub enum CefrClassifier {
    Metric(NlpCefrClassifier),
    Neural(NeuralCefrClassifier),
}

impl CefrClassifier {
    /// Builds the strategy configured for the profile's language.
    ///
    /// # Errors
    ///
    /// A neural strategy without a sequence classifier is a configuration
    /// error; a metric strategy over a profile without metric ranges is a
    /// resource error.
    pub fn for_profile(
        profile: Arc<LanguageProfile>,
        annotator: Arc<dyn Annotator>,
        config: Arc<LexigradeConfig>,
        sequence_classifier: Option<Arc<dyn SequenceClassifier>>,
    ) -> Result<Self> {
        let language = profile.language();
        let strategy = Self::strategy_for(&config, language);
        info!(event = "classifier_selected", %language, ?strategy);

        match strategy {
            ClassifierStrategy::Metric => {
                NlpCefrClassifier::new(profile, annotator, config).map(CefrClassifier::Metric)
            }
            ClassifierStrategy::Neural => match sequence_classifier {
                Some(model) => Ok(CefrClassifier::Neural(NeuralCefrClassifier::new(model))),
                None => Err(LexigradeError::Config(format!(
                    "{language} uses the neural classifier but no sequence classifier is configured"
                ))),
            },
        }
    }

    /// Pure lookup of the configured strategy.
    pub fn strategy_for(config: &LexigradeConfig, language: Language) -> ClassifierStrategy {
        config.classifier.strategies.for_language(language)
    }

    pub fn strategy(&self) -> ClassifierStrategy {
        match self {
            CefrClassifier::Metric(_) => ClassifierStrategy::Metric,
            CefrClassifier::Neural(_) => ClassifierStrategy::Neural,
        }
    }
}

impl CefrEstimator for CefrClassifier {
    fn estimate(&self, text: &str) -> Result<CefrEstimate> {
        match self {
            CefrClassifier::Metric(classifier) => classifier.estimate(text),
            CefrClassifier::Neural(classifier) => classifier.estimate(text),
        }
    }
}
