//! Per-level lexical rarity thresholds.

use lexigrade_core::annotation::eligible_tokens;
use lexigrade_core::stats::{mean, population_std};
use lexigrade_core::{
    Annotator, CorpusFrequencies, EntityFilter, Language, LevelStatistics, LevelTable,
    RarityThresholds, Result, Sentence,
};
use tracing::{info, warn};

use crate::corpus::TextsByLevel;

/// Levels with fewer scored texts than this are reported as sparse.
pub const MIN_RARITY_SAMPLES: usize = 10;

/// Mean rarity of the eligible words of a text, or `None` when it has none.
pub fn text_rarity(
    corpus: &CorpusFrequencies,
    sentences: &[Sentence],
    filter: &EntityFilter,
) -> Option<f64> {
    let rarities: Vec<f64> = eligible_tokens(sentences, filter)
        .map(|token| corpus.rarity(&token.lemma))
        .collect();
    if rarities.is_empty() {
        None
    } else {
        Some(mean(&rarities))
    }
}

/// Threshold and statistics of one level's rarity scores.
///
/// The threshold is the score at index `floor(0.9 * n)` of the sorted
/// scores; an empty sample has no threshold.
///
/// ```
/// use lexigrade_calibration::summarize_scores;
///
/// let scores: Vec<f64> = (1..=10).map(f64::from).collect();
/// let (threshold, stats) = summarize_scores(scores);
/// assert_eq!(threshold, Some(10.0));
/// assert_eq!(stats.samples, 10);
/// assert_eq!(stats.mean, Some(5.5));
/// ```
pub fn summarize_scores(mut scores: Vec<f64>) -> (Option<f64>, LevelStatistics) {
    if scores.is_empty() {
        return (None, LevelStatistics::default());
    }
    scores.sort_by(f64::total_cmp);

    let p90 = scores[(scores.len() as f64 * 0.9) as usize];
    let stats = LevelStatistics {
        samples: scores.len(),
        mean: Some(mean(&scores)),
        std: Some(population_std(&scores)),
        p90: Some(p90),
    };
    (Some(p90), stats)
}

/// Calibrates one rarity threshold per level present in `texts`.
pub fn calibrate_rarity_thresholds(
    annotator: &dyn Annotator,
    language: Language,
    texts: &TextsByLevel,
    corpus: &CorpusFrequencies,
    filter: &EntityFilter,
) -> Result<RarityThresholds> {
    let mut thresholds = LevelTable::empty();
    let mut result = RarityThresholds::default();

    for (level, samples) in texts.iter() {
        info!(event = "rarity_level", level = %level, texts = samples.len());

        let mut scores = Vec::with_capacity(samples.len());
        for text in samples {
            let sentences = annotator.annotate(language, text)?;
            if let Some(score) = text_rarity(corpus, &sentences, filter) {
                scores.push(score);
            }
        }
        if scores.len() < MIN_RARITY_SAMPLES {
            warn!(event = "sparse_level", level = %level, samples = scores.len());
        }

        let (threshold, stats) = summarize_scores(scores);
        thresholds.insert(level, threshold);
        result.statistics.insert(level, stats);
    }

    result.thresholds = thresholds;
    Ok(result)
}
