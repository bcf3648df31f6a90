//! Per-language scoring resources.
//!
//! A [`LanguageProfile`] bundles every read-only resource the evaluators and
//! the classifier consult for one language. Profiles are loaded once and then
//! shared by reference; nothing mutates them after construction.

mod frequency;
mod lexicon;
mod thresholds;


use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub use frequency::{CorpusFrequencies, FrequencyTable, ZipfEntry};
pub use lexicon::Lexicon;
pub use thresholds::{LevelStatistics, MetricRanges, PercentileRange, RarityThresholds};

use crate::annotation::EntityFilter;
use crate::error::{LexigradeError, Result};
use crate::language::Language;

/// File names of the per-language resources inside a profile directory.
pub mod files {
    pub const LEXICON: &str = "cefr_lexicon.json";
    pub const SUBTLEX: &str = "subtlex_word_frequencies.json";
    pub const CORPUS_FREQUENCIES: &str = "cefr_frequencies.json";
    pub const RARITY_THRESHOLDS: &str = "cefr_rarity_thresholds.json";
    pub const METRIC_RANGES: &str = "cefr_metric_ranges.json";
    /// Calibration texts grouped by level; not part of a loaded profile.
    pub const DATASET: &str = "universal_cefr_dataset.json";
}

/// Read-only resources for scoring texts in one language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageProfile {
    language: Language,
    lexicon: Lexicon,
    frequencies: FrequencyTable,
    corpus: CorpusFrequencies,
    rarity_thresholds: RarityThresholds,
    metric_ranges: Option<MetricRanges>,
    entity_filter: EntityFilter,
}

impl LanguageProfile {
    /// Creates a profile from the required resources.
    ///
    /// External frequency norms start empty and metric ranges absent; add
    /// them with the `with_*` builders.
    pub fn new(
        language: Language,
        lexicon: Lexicon,
        corpus: CorpusFrequencies,
        rarity_thresholds: RarityThresholds,
    ) -> Self {
        Self {
            language,
            lexicon,
            frequencies: FrequencyTable::default(),
            corpus,
            rarity_thresholds,
            metric_ranges: None,
            entity_filter: EntityFilter::default(),
        }
    }

    pub fn with_frequencies(mut self, frequencies: FrequencyTable) -> Self {
        self.frequencies = frequencies;
        self
    }

    pub fn with_metric_ranges(mut self, ranges: MetricRanges) -> Self {
        self.metric_ranges = Some(ranges);
        self
    }

    pub fn with_entity_filter(mut self, filter: EntityFilter) -> Self {
        self.entity_filter = filter;
        self
    }

    /// Loads a profile from `base/<language>/`.
    ///
    /// The lexicon, corpus frequencies and rarity thresholds are required.
    /// SUBTLEX norms and metric ranges are optional: a missing file yields an
    /// empty table or no ranges.
    pub fn load(base: impl AsRef<Path>, language: Language) -> Result<Self> {
        let dir = base.as_ref().join(language.as_str());
        if !dir.is_dir() {
            return Err(LexigradeError::resource(
                &dir,
                "language resource directory not found",
            ));
        }

        let lexicon: Lexicon = read_json(&dir.join(files::LEXICON))?;
        let corpus: CorpusFrequencies = read_json(&dir.join(files::CORPUS_FREQUENCIES))?;
        let rarity_thresholds: RarityThresholds =
            read_json(&dir.join(files::RARITY_THRESHOLDS))?;
        let frequencies: FrequencyTable =
            read_optional_json(&dir.join(files::SUBTLEX))?.unwrap_or_default();
        let metric_ranges: Option<MetricRanges> =
            read_optional_json(&dir.join(files::METRIC_RANGES))?;

        Ok(Self {
            language,
            lexicon,
            frequencies,
            corpus,
            rarity_thresholds,
            metric_ranges,
            entity_filter: EntityFilter::default(),
        })
    }

    /// Directory a profile for `language` is loaded from.
    pub fn directory(base: impl AsRef<Path>, language: Language) -> PathBuf {
        base.as_ref().join(language.as_str())
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    #[inline]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    #[inline]
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    #[inline]
    pub fn corpus(&self) -> &CorpusFrequencies {
        &self.corpus
    }

    #[inline]
    pub fn rarity_thresholds(&self) -> &RarityThresholds {
        &self.rarity_thresholds
    }

    #[inline]
    pub fn metric_ranges(&self) -> Option<&MetricRanges> {
        self.metric_ranges.as_ref()
    }

    #[inline]
    pub fn entity_filter(&self) -> &EntityFilter {
        &self.entity_filter
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).map_err(|e| LexigradeError::resource(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| LexigradeError::resource(path, e.to_string()))
}

fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}
