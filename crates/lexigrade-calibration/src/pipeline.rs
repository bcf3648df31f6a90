//! Calibration steps over a datasets directory.

use std::path::{Path, PathBuf};

use lexigrade_config::LexigradeConfig;
use lexigrade_core::profile::files;
use lexigrade_core::{
    Annotator, CorpusFrequencies, FrequencyTable, Language, LanguageProfile, MetricRanges,
    RarityThresholds, Result,
};
use tracing::info;

use crate::artifacts::{read_json, write_json};
use crate::corpus::TextsByLevel;
use crate::lexicon::LexiconAccumulator;
use crate::ranges::calibrate_metric_ranges;
use crate::rarity::calibrate_rarity_thresholds;
use crate::subtlex::convert_subtlex_file;

/// Runs calibration steps for one language and writes their artifacts into
/// `<datasets>/<language>/`.
///
/// Steps are meant to run in order: [`build_lexicon`](Self::build_lexicon)
/// stores the grouped texts that [`rarity`](Self::rarity) and
/// [`metric_ranges`](Self::metric_ranges) read back.
///
/// ```ignore
/// let calibrator = Calibrator::new(&config, &annotator, Language::Spanish);
/// calibrator.build_lexicon(TextsByLevel::load(Path::new("raw.json"))?)?;
/// calibrator.rarity()?;
/// calibrator.metric_ranges()?;
/// ```
pub struct Calibrator<'a> {
    config: &'a LexigradeConfig,
    annotator: &'a dyn Annotator,
    language: Language,
}

impl<'a> Calibrator<'a> {
    pub fn new(
        config: &'a LexigradeConfig,
        annotator: &'a dyn Annotator,
        language: Language,
    ) -> Self {
        Self {
            config,
            annotator,
            language,
        }
    }

    /// Directory the artifacts of this language are written to.
    pub fn directory(&self) -> PathBuf {
        LanguageProfile::directory(&self.config.resources.datasets_path, self.language)
    }

    fn artifact(&self, name: &str) -> PathBuf {
        self.directory().join(name)
    }

    /// Merges `texts` into the stored calibration dataset, then rebuilds the
    /// lexicon and corpus frequencies from the whole dataset.
    pub fn build_lexicon(&self, texts: TextsByLevel) -> Result<LexiconAccumulator> {
        let dataset_path = self.artifact(files::DATASET);
        let mut dataset = if dataset_path.exists() {
            TextsByLevel::load(&dataset_path)?
        } else {
            TextsByLevel::new()
        };
        dataset.merge(texts);
        info!(event = "calibrate_lexicon", language = %self.language, texts = dataset.len());

        let mut accumulator = LexiconAccumulator::new();
        accumulator.add_texts(self.annotator, self.language, &dataset)?;
        accumulator.write(&self.directory())?;
        write_json(&dataset_path, &dataset)?;
        Ok(accumulator)
    }

    /// Calibrates rarity thresholds from the stored dataset and corpus.
    pub fn rarity(&self) -> Result<RarityThresholds> {
        info!(event = "calibrate_rarity", language = %self.language);
        let texts = TextsByLevel::load(&self.artifact(files::DATASET))?;
        let corpus: CorpusFrequencies = read_json(&self.artifact(files::CORPUS_FREQUENCIES))?;

        let thresholds = calibrate_rarity_thresholds(
            self.annotator,
            self.language,
            &texts,
            &corpus,
            &self.config.resources.excluded_entities,
        )?;
        write_json(&self.artifact(files::RARITY_THRESHOLDS), &thresholds)?;
        Ok(thresholds)
    }

    /// Calibrates metric ranges against the profile built by earlier steps.
    pub fn metric_ranges(&self) -> Result<MetricRanges> {
        info!(event = "calibrate_ranges", language = %self.language);
        let texts = TextsByLevel::load(&self.artifact(files::DATASET))?;
        let profile = LanguageProfile::load(&self.config.resources.datasets_path, self.language)?
            .with_entity_filter(self.config.resources.excluded_entities.clone());

        let ranges = calibrate_metric_ranges(&profile, self.config, self.annotator, &texts)?;
        write_json(&self.artifact(files::METRIC_RANGES), &ranges)?;
        Ok(ranges)
    }

    /// Converts raw SUBTLEX norms into the profile frequency table.
    ///
    /// `source` defaults to the frequency file itself, which is rewritten in
    /// place.
    pub fn subtlex(&self, source: Option<&Path>) -> Result<FrequencyTable> {
        let destination = self.artifact(files::SUBTLEX);
        convert_subtlex_file(
            self.language,
            source.unwrap_or(destination.as_path()),
            &destination,
        )
    }
}
