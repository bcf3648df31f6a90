//! Small in-memory language profiles.
//!
//! Each vocabulary row is `(lemma, level, zipf, corpus count)`. Lemmas match
//! the ones produced by [`FixtureAnnotator`](crate::FixtureAnnotator).

use lexigrade_core::{
    CefrLevel, CorpusFrequencies, FrequencyTable, Language, LanguageProfile, LevelTable, Lexicon,
    MetricRanges, PercentileRange, RarityThresholds,
};

use CefrLevel::*;

type Row = (&'static str, CefrLevel, f64, u64);

const ENGLISH: &[Row] = &[
    ("the", A1, 7.3, 5000),
    ("a", A1, 7.2, 4000),
    ("be", A1, 7.1, 3500),
    ("i", A1, 7.0, 3000),
    ("we", A1, 6.8, 1500),
    ("it", A1, 6.9, 2000),
    ("my", A1, 6.7, 1200),
    ("and", A1, 7.0, 3000),
    ("in", A1, 7.0, 2800),
    ("to", A1, 7.3, 4500),
    ("cat", A1, 5.0, 300),
    ("dog", A1, 5.2, 320),
    ("house", A1, 5.6, 400),
    ("park", A1, 4.8, 150),
    ("fish", A1, 4.9, 160),
    ("big", A1, 5.5, 380),
    ("red", A1, 5.2, 250),
    ("small", A1, 5.2, 260),
    ("happy", A1, 5.4, 280),
    ("sleep", A1, 5.0, 200),
    ("run", A1, 5.3, 260),
    ("eat", A1, 5.1, 240),
    ("like", A1, 6.2, 900),
    ("play", A1, 5.4, 300),
    ("sun", A1, 4.9, 140),
    ("which", A1, 6.0, 700),
    ("shine", A1, 4.2, 60),
    ("because", A2, 5.9, 500),
    ("walk", A2, 5.3, 220),
    ("quickly", A2, 4.9, 120),
    ("although", B1, 5.0, 90),
    ("decide", B1, 4.9, 80),
    ("improve", B1, 4.6, 50),
    ("happiness", B1, 4.2, 30),
    ("environment", B1, 4.6, 40),
    ("development", B2, 4.8, 35),
    ("sustainable", B2, 3.9, 12),
    ("consequently", B2, 3.6, 8),
    ("ubiquitous", C1, 2.9, 3),
    ("ambiguity", C1, 3.4, 4),
    ("meticulous", C1, 3.0, 2),
    ("perspicacity", C2, 1.5, 1),
];

const SPANISH: &[Row] = &[
    ("el", A1, 7.4, 6000),
    ("ser", A1, 7.0, 3000),
    ("en", A1, 7.2, 4000),
    ("gato", A1, 4.8, 150),
    ("perro", A1, 5.0, 200),
    ("casa", A1, 5.8, 600),
    ("grande", A1, 5.4, 300),
    ("comer", A1, 5.1, 220),
    ("dormir", A1, 4.9, 140),
    ("llover", A2, 4.2, 40),
    ("aunque", B1, 5.6, 250),
    ("desarrollo", B2, 4.7, 60),
    ("sostenible", B2, 3.8, 10),
    ("ubicuo", C1, 2.6, 2),
];

fn build(language: Language, rows: &[Row]) -> LanguageProfile {
    let lexicon: Lexicon = rows.iter().map(|(lemma, level, _, _)| (*lemma, *level)).collect();

    let mut frequencies = FrequencyTable::new();
    let mut corpus = CorpusFrequencies::new();
    for (lemma, _, zipf, count) in rows {
        frequencies.insert(*lemma, *zipf, "");
        corpus.add(*lemma, *count);
    }

    let thresholds = LevelTable::empty()
        .with(A1, Some(5.0))
        .with(A2, Some(5.5))
        .with(B1, Some(6.0))
        .with(B2, Some(6.5))
        .with(C1, Some(7.5))
        .with(C2, None);

    LanguageProfile::new(language, lexicon, corpus, RarityThresholds::new(thresholds))
        .with_frequencies(frequencies)
        .with_metric_ranges(metric_ranges())
}

/// English profile over a few dozen lemmas spanning A1 to C2.
pub fn english_profile() -> LanguageProfile {
    build(Language::English, ENGLISH)
}

/// Spanish profile over a handful of lemmas spanning A1 to C1.
pub fn spanish_profile() -> LanguageProfile {
    build(Language::Spanish, SPANISH)
}

/// Percentile windows shared by both fixture profiles.
pub fn metric_ranges() -> MetricRanges {
    MetricRanges {
        lexical_rarity: PercentileRange::new(2.0, 9.0),
        difficult_word_ratio: PercentileRange::new(0.0, 0.5),
        morphological_ratio: PercentileRange::new(0.0, 0.3),
        clause_count: PercentileRange::new(1.0, 4.0),
        avg_word_length: PercentileRange::new(3.0, 7.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_cover_every_row() {
        let english = english_profile();
        assert_eq!(english.lexicon().len(), ENGLISH.len());
        assert_eq!(english.frequencies().zipf("house"), 5.6);
        assert_eq!(english.lexicon().level("perspicacity"), Some(C2));
        assert_eq!(english.rarity_thresholds().threshold(C2), None);

        let spanish = spanish_profile();
        assert_eq!(spanish.language(), Language::Spanish);
        assert_eq!(spanish.corpus().count("casa"), 600);
    }
}
