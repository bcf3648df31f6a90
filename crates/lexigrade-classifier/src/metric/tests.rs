use std::sync::Arc;

use lexigrade_config::LexigradeConfig;
use lexigrade_core::{
    CorpusFrequencies, Language, LanguageProfile, LevelTable, LexigradeError, Lexicon,
    RarityThresholds,
};
use lexigrade_test::{english_profile, noun, punct, sentence, FixtureAnnotator};

use super::*;

const SIMPLE: &str = "The cat sleeps.";
const HARD: &str = "Although the environment is sustainable, consequently perspicacity decided. \
                    The ubiquitous ambiguity is meticulous. The cat sleeps.";

fn classifier_with(annotator: FixtureAnnotator) -> NlpCefrClassifier {
    NlpCefrClassifier::new(
        Arc::new(english_profile()),
        Arc::new(annotator),
        Arc::new(LexigradeConfig::default()),
    )
    .unwrap()
}

fn classifier() -> NlpCefrClassifier {
    classifier_with(FixtureAnnotator::english())
}

fn sentences(n: usize) -> Vec<Sentence> {
    (0..n)
        .map(|_| sentence(vec![noun("cats", "nsubj"), punct(".")]))
        .collect()
}

#[test]
fn test_windows_step_by_window_size() {
    let five = sentences(5);
    let windows = split_into_windows(&five, 2);
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[2].len(), 1);

    let two = sentences(2);
    assert_eq!(split_into_windows(&two, 2).len(), 1);

    let none = split_into_windows(&[], 2);
    assert_eq!(none.len(), 1);
    assert!(none[0].is_empty());
}

#[test]
fn test_band_midpoint_has_full_confidence() {
    let bands = ScoreBands::from_config(&LexigradeConfig::default().classifier);
    assert_eq!(bands.map_score(0.09), (CefrLevel::A1, 1.0));
    assert_eq!(bands.map_score(0.0).0, CefrLevel::A1);
    assert_eq!(bands.map_score(0.18).0, CefrLevel::A2);
    assert_eq!(bands.map_score(0.55).0, CefrLevel::B2);
    assert_eq!(bands.map_score(0.9).0, CefrLevel::C2);
}

#[test]
fn test_scores_outside_every_band_map_to_c2() {
    let bands = ScoreBands::from_config(&LexigradeConfig::default().classifier);
    assert_eq!(bands.map_score(1.0), (CefrLevel::C2, 0.9));
    assert_eq!(bands.map_score(1.7), (CefrLevel::C2, 0.9));
}

#[test]
fn test_band_confidence_is_within_unit_interval() {
    let bands = ScoreBands::from_config(&LexigradeConfig::default().classifier);
    for step in 0..=120 {
        let (_, confidence) = bands.map_score(step as f64 / 100.0);
        assert!((0.0..=1.0).contains(&confidence));
    }
}

#[test]
fn test_empty_text_has_defined_estimate() {
    let classifier = classifier();
    for text in ["", "   \n\t"] {
        let estimate = classifier.estimate(text).unwrap();
        assert_eq!(estimate.estimated_level, CefrLevel::A1);
        assert_eq!(estimate.confidence, 0.0);
        assert_eq!(estimate.error.as_deref(), Some("Empty text"));
        assert!(estimate.aggregation.is_none());
    }
}

#[test]
fn test_simple_text_is_a1() {
    let estimate = classifier().estimate(SIMPLE).unwrap();
    let aggregation = estimate.aggregation.as_ref().unwrap();

    assert_eq!(estimate.estimated_level, CefrLevel::A1);
    assert_eq!(aggregation.windows, 1);
    assert_eq!(aggregation.lexical_control_ratio, 1.0);
    assert_eq!(aggregation.agreement, 1.0);
    assert_eq!(aggregation.stability, 1.0);

    // three words: ln(4) / ln(40)
    let length_factor = round_to(4f64.ln() / 40f64.ln(), 3);
    assert_eq!(aggregation.length_factor, length_factor);
    assert_eq!(estimate.confidence, length_factor);
    assert!(estimate.windows.is_none());
    assert!(estimate.probabilities.is_none());
}

#[test]
fn test_harder_text_scores_higher() {
    let classifier = classifier();
    let simple = classifier.estimate(SIMPLE).unwrap();
    let hard = classifier.estimate(HARD).unwrap();

    assert!(hard.complexity_score.unwrap() > simple.complexity_score.unwrap());
    assert!(hard.estimated_level >= simple.estimated_level);
    assert!((0.0..=1.0).contains(&hard.confidence));

    let aggregation = hard.aggregation.unwrap();
    assert_eq!(aggregation.windows, 2);
    assert!(aggregation.lexical_control_ratio < 1.0);
}

#[test]
fn test_debug_windows_are_reported() {
    let classifier = classifier().with_debug_windows(true);
    let estimate = classifier.estimate(HARD).unwrap();
    let windows = estimate.windows.unwrap();

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[1].text, "The cat sleeps.");
    assert!(windows[0].score > windows[1].score);
    assert!(windows[0].metrics.difficult_word_ratio > 0.0);
}

#[test]
fn test_estimates_are_deterministic() {
    let classifier = classifier();
    assert_eq!(
        classifier.estimate(HARD).unwrap(),
        classifier.estimate(HARD).unwrap()
    );
}

#[test]
fn test_lexical_control_ratio_counts_controlled_words() {
    let classifier = classifier();
    let annotated = FixtureAnnotator::english()
        .annotate(Language::English, "The environment is sustainable.")
        .unwrap();
    // the, be: A1; environment: B1; sustainable: B2
    assert_eq!(classifier.lexical_control_ratio(&annotated), 0.75);
    assert_eq!(classifier.lexical_control_ratio(&[]), 1.0);
}

#[test]
fn test_length_dampening() {
    let classifier = classifier();
    assert_eq!(classifier.length_dampening(0), 0.0);
    assert_eq!(classifier.length_dampening(39), 1.0);
    assert_eq!(classifier.length_dampening(500), 1.0);
    assert!(classifier.length_dampening(3) < classifier.length_dampening(10));
}

#[test]
fn test_missing_metric_ranges_is_a_resource_error() {
    let profile = LanguageProfile::new(
        Language::English,
        Lexicon::new(),
        CorpusFrequencies::new(),
        RarityThresholds::new(LevelTable::empty()),
    );
    let err = NlpCefrClassifier::new(
        Arc::new(profile),
        Arc::new(FixtureAnnotator::english()),
        Arc::new(LexigradeConfig::default()),
    )
    .unwrap_err();
    assert!(matches!(err, LexigradeError::Resource { .. }));
}

#[test]
fn test_annotation_failure_propagates() {
    let classifier = classifier_with(FixtureAnnotator::failing());
    assert!(classifier.estimate(SIMPLE).is_err());
}
