//! Configuration system for Lexigrade.
//!
//! Every threshold, weight and band used by the scoring pipeline is data in
//! [`LexigradeConfig`]; the defaults reproduce the calibrated constants, so
//! an empty file is a complete configuration.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use lexigrade_config::LexigradeConfig;
//! use lexigrade_core::CefrLevel;
//!
//! let config = LexigradeConfig::from_toml_str(r#"
//!     [flow]
//!     max_retries = 4
//!
//!     [lexical.cost_budgets]
//!     A2 = 5.0
//! "#).unwrap();
//!
//! assert_eq!(config.flow.max_retries, 4);
//! assert_eq!(config.lexical.cost_budget(CefrLevel::A2), 5.0);
//! assert_eq!(config.flow.chunk_max_words, 100);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use lexigrade_config::LexigradeConfig;
//!
//! let config = LexigradeConfig::load("lexigrade.toml").unwrap_or_default();
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use lexigrade_core::{CefrLevel, EntityFilter, Language, LevelTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Environment variable overriding [`ServicesConfig::models_url`].
pub const ENV_MODELS_SERVICE_URL: &str = "MODELS_SERVICE_URL";
/// Environment variable overriding [`ResourcesConfig::datasets_path`].
pub const ENV_DATASETS_BASE_PATH: &str = "DATASETS_BASE_PATH";
/// Environment variable overriding [`ServicesConfig::annotator_url`].
pub const ENV_ANNOTATOR_SERVICE_URL: &str = "ANNOTATOR_SERVICE_URL";
/// Environment variable overriding [`ServicesConfig::classifier_url`].
pub const ENV_CEFR_CLASSIFIER_SERVICE_URL: &str = "CEFR_CLASSIFIER_SERVICE_URL";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main Lexigrade configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LexigradeConfig {
    /// Language resource locations and entity exclusion.
    pub resources: ResourcesConfig,

    /// Lexical complexity checks.
    pub lexical: LexicalConfig,

    /// Clause count and word length checks.
    pub syntactic: SyntacticConfig,

    /// Lexical rarity reporting.
    pub rarity: RarityConfig,

    /// CEFR level estimation.
    pub classifier: ClassifierConfig,

    /// Simplification loop.
    pub flow: FlowConfig,

    /// External generation, review, annotation and classification services.
    pub services: ServicesConfig,
}

impl LexigradeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = var(ENV_MODELS_SERVICE_URL) {
            self.services.models_url = url;
        }
        if let Some(path) = var(ENV_DATASETS_BASE_PATH) {
            self.resources.datasets_path = PathBuf::from(path);
        }
        if let Some(url) = var(ENV_ANNOTATOR_SERVICE_URL) {
            self.services.annotator_url = Some(url);
        }
        if let Some(url) = var(ENV_CEFR_CLASSIFIER_SERVICE_URL) {
            self.services.classifier_url = Some(url);
        }
        self
    }

    /// Sets the directory holding the per-language resources.
    pub fn with_datasets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.resources.datasets_path = path.into();
        self
    }

    /// Sets the maximum number of regenerations per chunk.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.flow.max_retries = retries;
        self
    }

    /// Sets the minimum soft pass ratio.
    pub fn with_soft_min_pass_ratio(mut self, ratio: f64) -> Self {
        self.flow.soft_min_pass_ratio = ratio;
        self
    }

    /// Sets the estimation strategy for a language.
    pub fn with_classifier_strategy(
        mut self,
        language: Language,
        strategy: ClassifierStrategy,
    ) -> Self {
        match language {
            Language::English => self.classifier.strategies.english = strategy,
            Language::Spanish => self.classifier.strategies.spanish = strategy,
        }
        self
    }

    /// Checks cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.window_size == 0 {
            return Err(ConfigError::Invalid(
                "classifier.window_size must be at least 1".to_string(),
            ));
        }
        if self.flow.chunk_max_words == 0 {
            return Err(ConfigError::Invalid(
                "flow.chunk_max_words must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.flow.soft_min_pass_ratio) {
            return Err(ConfigError::Invalid(format!(
                "flow.soft_min_pass_ratio must be within [0, 1], got {}",
                self.flow.soft_min_pass_ratio
            )));
        }
        if self.classifier.bands.is_empty() {
            return Err(ConfigError::Invalid(
                "classifier.bands must not be empty".to_string(),
            ));
        }
        let ascending = self
            .classifier
            .bands
            .windows(2)
            .all(|pair| pair[0].upper < pair[1].upper && pair[0].level < pair[1].level);
        if !ascending {
            return Err(ConfigError::Invalid(
                "classifier.bands must be sorted by level and upper bound".to_string(),
            ));
        }
        Ok(())
    }
}

/// Location of the per-language resources.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory containing one subdirectory per language.
    pub datasets_path: PathBuf,

    /// Named-entity types excluded from every lexical measurement.
    pub excluded_entities: EntityFilter,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            datasets_path: PathBuf::from("datasets"),
            excluded_entities: EntityFilter::default(),
        }
    }
}

/// A Zipf frequency band and the cost weight of words inside it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FrequencyBand {
    pub min_zipf: f64,
    pub weight: f64,
}

/// Lexical complexity configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Maximum total cost of above-level words.
    pub cost_budgets: LevelTable<f64>,

    /// Maximum share of OOV or above-level words.
    pub difficult_word_thresholds: LevelTable<f64>,

    /// Maximum share of morphologically complex words.
    pub morphology_thresholds: LevelTable<f64>,

    /// Frequency bands, checked in order; the first with `zipf >= min_zipf` wins.
    pub frequency_bands: Vec<FrequencyBand>,

    /// Weight of words below every frequency band.
    pub rare_weight: f64,

    /// Lemma suffixes marking abstract nouns.
    pub abstract_suffixes: Vec<String>,

    pub abstract_weight: f64,
    pub concrete_weight: f64,

    /// Word costs below this value are ignored.
    pub min_flag_cost: f64,

    /// Derived words at or above this Zipf score are not morphologically complex.
    pub morphology_max_zipf: f64,

    /// Dependency labels of nouns considered for derivation.
    pub morphology_dependencies: Vec<String>,

    /// Maximum number of flagged items listed in a result.
    pub report_limit: usize,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            cost_budgets: LevelTable::from_values([0.0, 3.0, 6.0, 10.0, 20.0, 999.0]),
            difficult_word_thresholds: LevelTable::from_values([0.18, 0.15, 0.25, 0.35, 0.45, 1.0]),
            morphology_thresholds: LevelTable::from_values([0.05, 0.10, 0.18, 0.30, 0.45, 1.0]),
            frequency_bands: vec![
                FrequencyBand { min_zipf: 5.5, weight: 0.25 },
                FrequencyBand { min_zipf: 5.0, weight: 0.4 },
                FrequencyBand { min_zipf: 4.5, weight: 0.6 },
                FrequencyBand { min_zipf: 4.0, weight: 0.8 },
            ],
            rare_weight: 1.0,
            abstract_suffixes: ["ity", "ness", "ance", "ence", "ment", "ship", "hood", "acy"]
                .into_iter()
                .map(String::from)
                .collect(),
            abstract_weight: 1.4,
            concrete_weight: 0.8,
            min_flag_cost: 1.2,
            morphology_max_zipf: 4.0,
            morphology_dependencies: ["nsubj", "dobj", "pobj", "obj", "obl"]
                .into_iter()
                .map(String::from)
                .collect(),
            report_limit: 5,
        }
    }
}

impl LexicalConfig {
    pub fn cost_budget(&self, level: CefrLevel) -> f64 {
        self.cost_budgets.get_or_loosest(level).unwrap_or(f64::MAX)
    }

    pub fn difficult_word_threshold(&self, level: CefrLevel) -> f64 {
        self.difficult_word_thresholds.get_or_loosest(level).unwrap_or(1.0)
    }

    pub fn morphology_threshold(&self, level: CefrLevel) -> f64 {
        self.morphology_thresholds.get_or_loosest(level).unwrap_or(1.0)
    }

    /// Cost weight for a word with the given Zipf frequency.
    ///
    /// ```
    /// use lexigrade_config::LexicalConfig;
    ///
    /// let config = LexicalConfig::default();
    /// assert_eq!(config.frequency_weight(6.0), 0.25);
    /// assert_eq!(config.frequency_weight(4.2), 0.8);
    /// assert_eq!(config.frequency_weight(0.0), 1.0);
    /// ```
    pub fn frequency_weight(&self, zipf: f64) -> f64 {
        self.frequency_bands
            .iter()
            .find(|band| zipf >= band.min_zipf)
            .map_or(self.rare_weight, |band| band.weight)
    }

    /// Cost weight by abstractness of the lemma.
    pub fn abstractness_weight(&self, lemma: &str) -> f64 {
        if self.is_abstract(lemma) {
            self.abstract_weight
        } else {
            self.concrete_weight
        }
    }

    pub fn is_abstract(&self, lemma: &str) -> bool {
        self.abstract_suffixes
            .iter()
            .any(|suffix| lemma.ends_with(suffix.as_str()))
    }

    pub fn is_morphology_dependency(&self, dep: &str) -> bool {
        self.morphology_dependencies.iter().any(|d| d == dep)
    }
}

/// Syntactic complexity configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SyntacticConfig {
    /// Maximum clauses in any one sentence.
    pub clause_limits: LevelTable<usize>,

    /// Dependency labels that open a subordinate clause.
    pub clause_dependencies: Vec<String>,

    /// Maximum average word length in characters.
    pub word_length_limits: LevelTable<f64>,

    /// Number of most complex sentences listed in a clause count result.
    pub reported_sentences: usize,

    /// Maximum number of long words listed in a word length result.
    pub report_limit: usize,
}

impl Default for SyntacticConfig {
    fn default() -> Self {
        Self {
            clause_limits: LevelTable::from_values([1, 1, 2, 3, 4, 10]),
            clause_dependencies: ["advcl", "ccomp", "xcomp", "acl", "relcl"]
                .into_iter()
                .map(String::from)
                .collect(),
            word_length_limits: LevelTable::from_values([4.5, 5.0, 5.5, 6.0, 6.5, 10.0]),
            reported_sentences: 2,
            report_limit: 5,
        }
    }
}

impl SyntacticConfig {
    pub fn clause_limit(&self, level: CefrLevel) -> usize {
        self.clause_limits.get_or_loosest(level).unwrap_or(usize::MAX)
    }

    pub fn word_length_limit(&self, level: CefrLevel) -> f64 {
        self.word_length_limits.get_or_loosest(level).unwrap_or(f64::MAX)
    }

    pub fn is_clause_dependency(&self, dep: &str) -> bool {
        self.clause_dependencies.iter().any(|d| d == dep)
    }
}

/// Lexical rarity configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RarityConfig {
    /// Number of rarest words listed in a result.
    pub top_k: usize,
}

impl Default for RarityConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// How the CEFR level of a text is estimated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    /// Windowed aggregation of the linguistic metrics.
    #[default]
    Metric,

    /// Remote supervised sequence classifier.
    Neural,
}

/// Estimation strategy per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub english: ClassifierStrategy,
    pub spanish: ClassifierStrategy,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            english: ClassifierStrategy::Neural,
            spanish: ClassifierStrategy::Metric,
        }
    }
}

impl StrategyConfig {
    pub fn for_language(&self, language: Language) -> ClassifierStrategy {
        match language {
            Language::English => self.english,
            Language::Spanish => self.spanish,
        }
    }
}

/// Weights of the metric groups in a window score.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MetricWeights {
    pub rarity: f64,
    /// Applied to the mean of normalized clause count and word length.
    pub syntax: f64,
    pub morphology: f64,
    pub difficult_words: f64,
}

impl MetricWeights {
    pub const fn new(rarity: f64, syntax: f64, morphology: f64, difficult_words: f64) -> Self {
        Self {
            rarity,
            syntax,
            morphology,
            difficult_words,
        }
    }
}

/// Metric weights per language.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub english: MetricWeights,
    /// Used for every language other than English.
    pub other: MetricWeights,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            english: MetricWeights::new(0.40, 0.35, 0.15, 0.10),
            other: MetricWeights::new(0.30, 0.45, 0.10, 0.15),
        }
    }
}

impl WeightsConfig {
    pub fn for_language(&self, language: Language) -> MetricWeights {
        match language {
            Language::English => self.english,
            _ => self.other,
        }
    }
}

/// Upper bound (exclusive) of the score band of a level.
///
/// A band starts where the previous one ends; the first starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScoreBand {
    pub level: CefrLevel,
    pub upper: f64,
}

/// CEFR classifier configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Sentences per scoring window.
    pub window_size: usize,

    pub strategies: StrategyConfig,

    pub weights: WeightsConfig,

    /// Score bands in ascending order.
    pub bands: Vec<ScoreBand>,

    /// Confidence reported for scores above every band.
    pub overflow_confidence: f64,

    /// Weight of the 75th percentile in the final score; the mean gets the rest.
    pub upper_quantile_weight: f64,

    /// Maximum score reduction for texts with no controlled vocabulary.
    pub lexical_control_penalty: f64,

    /// Highest lexicon level counted as controlled vocabulary.
    pub lexical_control_max_level: CefrLevel,

    /// Token count at which the length dampening reaches 1.
    pub length_reference_tokens: usize,

    /// Weight of window agreement in the confidence; stability gets the rest.
    pub agreement_weight: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            window_size: 2,
            strategies: StrategyConfig::default(),
            weights: WeightsConfig::default(),
            bands: vec![
                ScoreBand { level: CefrLevel::A1, upper: 0.18 },
                ScoreBand { level: CefrLevel::A2, upper: 0.33 },
                ScoreBand { level: CefrLevel::B1, upper: 0.48 },
                ScoreBand { level: CefrLevel::B2, upper: 0.63 },
                ScoreBand { level: CefrLevel::C1, upper: 0.80 },
                ScoreBand { level: CefrLevel::C2, upper: 1.0 },
            ],
            overflow_confidence: 0.9,
            upper_quantile_weight: 0.6,
            lexical_control_penalty: 0.25,
            lexical_control_max_level: CefrLevel::B1,
            length_reference_tokens: 40,
            agreement_weight: 0.6,
        }
    }
}

/// Simplification loop configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Regenerations allowed per chunk after the first generation.
    pub max_retries: usize,

    /// Word budget of a chunk.
    pub chunk_max_words: usize,

    /// Minimum share of soft tests that must pass.
    pub soft_min_pass_ratio: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            chunk_max_words: 100,
            soft_min_pass_ratio: 0.6,
        }
    }
}

/// External services configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Generation endpoint shared by the generator and reviewer models.
    pub models_url: String,

    /// Annotation endpoint.
    pub annotator_url: Option<String>,

    /// Sequence classifier endpoint.
    pub classifier_url: Option<String>,

    pub generator_model: String,
    pub reviewer_model: String,

    /// Stop sequences passed to the generator.
    pub generator_stop: Vec<String>,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            models_url: "http://localhost:11434/api/generate".to_string(),
            annotator_url: None,
            classifier_url: None,
            generator_model: "lexigrade-generator".to_string(),
            reviewer_model: "lexigrade-reviewer".to_string(),
            generator_stop: vec!["Here is the rewritten".to_string()],
            request_timeout_secs: 120,
        }
    }
}

impl ServicesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
