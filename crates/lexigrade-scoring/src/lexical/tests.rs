use lexigrade_core::{CefrLevel, PartOfSpeech, TestStatus};
use lexigrade_test::{entity, english_profile, noun, punct, sentence, token};

use super::*;
use crate::test_utils::{assert_close, config, english};

#[test]
fn test_above_level_abstract_word_is_flagged() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);

    let result = evaluator.check_cefr_validity(&english("The cat likes happiness."));
    let details = result.details.as_cefr_validity().unwrap();

    // B1 at A1: distance 2, zipf 4.2 -> 0.8, "-ness" -> 1.4
    assert_eq!(result.status, TestStatus::Fail);
    assert_close(details.total_cost, 2.24);
    assert_eq!(details.budget, 0.0);
    assert_eq!(details.flagged_count, 1);
    assert_eq!(details.flagged_words[0].lemma, "happiness");
    assert_eq!(details.flagged_words[0].level, CefrLevel::B1);
}

#[test]
fn test_cheap_above_level_words_are_tolerated() {
    let profile = english_profile();
    let config = config();

    // A2 word at A1: 1 * 0.6 * 0.8 = 0.48
    let a1 = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);
    let result = a1.check_cefr_validity(&english("The dog runs quickly."));
    assert!(result.passed());
    assert_eq!(result.details.as_cefr_validity().unwrap().flagged_count, 0);

    // B1 word at A2: 1 * 0.8 * 1.4 = 1.12
    let a2 = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A2);
    assert!(a2.check_cefr_validity(&english("I like happiness.")).passed());
}

#[test]
fn test_lexical_cost_uses_rare_weight() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);

    // C2 at A1: distance 5, zipf 1.5 -> 1.0, "-ity" -> 1.4
    assert_close(evaluator.lexical_cost("perspicacity", CefrLevel::C2), 7.0);
}

#[test]
fn test_oov_reports_missing_lemma() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::B1);

    let result = evaluator.check_oov(&english("The zyxt eats the zyxt and a blorp."));
    let details = result.details.as_oov().unwrap();

    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(details.oov_count, 3);
    assert_eq!(details.oov_words, vec!["zyxt".to_string(), "blorp".to_string()]);
}

#[test]
fn test_oov_passes_on_known_vocabulary() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);
    assert!(evaluator.check_oov(&english("The big cat sleeps in the house.")).passed());
}

#[test]
fn test_difficult_word_ratio_counts_oov_and_above_level() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);

    // 6 words: the, cat, likes, happiness(B1), and, zyxt(OOV)
    let result =
        evaluator.check_difficult_word_ratio(&english("The cat likes happiness and zyxt."));
    let details = result.details.as_difficult_word_ratio().unwrap();

    assert_eq!(details.total_words, 6);
    assert_eq!(details.difficult_words, 2);
    assert_close(details.ratio, 2.0 / 6.0);
    assert_eq!(details.threshold, 0.18);
    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(details.examples, vec!["happiness".to_string(), "zyxt".to_string()]);
}

#[test]
fn test_entities_are_excluded_everywhere() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);
    let sentences = vec![sentence(vec![entity("Zanzibar", "GPE"), punct(".")])];

    let dwr = evaluator.check_difficult_word_ratio(&sentences);
    assert!(dwr.passed());
    assert_eq!(dwr.details.as_difficult_word_ratio().unwrap().total_words, 0);
    assert_eq!(dwr.details.as_difficult_word_ratio().unwrap().ratio, 0.0);

    let morph = evaluator.check_morphological_complexity(&sentences);
    assert!(morph.passed());
    assert_eq!(morph.details.as_morphological().unwrap().total_words, 0);

    assert!(evaluator.check_oov(&sentences).passed());
    assert!(evaluator.check_cefr_validity(&sentences).passed());
}

#[test]
fn test_entity_type_excludes_common_noun() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);
    let sentences = vec![sentence(vec![
        noun("Zyxt", "nsubj").with_entity("ORG"),
        noun("zyxt", "dobj").with_entity("DATE"),
    ])];

    let details = evaluator.check_oov(&sentences);
    assert_eq!(details.details.as_oov().unwrap().oov_count, 1);
}

#[test]
fn test_morphological_complexity_flags_rare_derived_forms() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);

    let sentences = vec![sentence(vec![
        // derived adverb, zipf 3.0 -> complex
        token("meticulously", "meticulous", PartOfSpeech::Adv, "advmod"),
        // derived noun in argument position, zipf 4.8 -> too frequent
        token("developments", "development", PartOfSpeech::Noun, "nsubj"),
        // unknown derived noun, zipf 0.0 -> complex
        token("simplifications", "simplification", PartOfSpeech::Noun, "dobj"),
        // derived noun outside argument positions
        token("improvements", "improvement", PartOfSpeech::Noun, "compound"),
        punct("."),
    ])];

    let result = evaluator.check_morphological_complexity(&sentences);
    let details = result.details.as_morphological().unwrap();

    assert_eq!(details.total_words, 4);
    assert_eq!(details.complex_count, 2);
    assert_close(details.ratio, 0.5);
    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(details.complex_words[0].kind, MorphologyKind::DerivedAdverb);
    assert_eq!(details.complex_words[1].kind, MorphologyKind::DerivedNoun);
    assert_eq!(details.complex_words[1].zipf, 0.0);
}

#[test]
fn test_report_lists_are_truncated() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::A1);

    let result = evaluator.check_oov(&english("Qa qb qc qd qe qf qg."));
    let details = result.details.as_oov().unwrap();
    assert_eq!(details.oov_count, 7);
    assert_eq!(details.oov_words.len(), 5);
}

#[test]
fn test_checks_are_idempotent() {
    let profile = english_profile();
    let config = config();
    let evaluator = LexicalComplexityEvaluator::new(&profile, &config.lexical, CefrLevel::B1);
    let sentences = english("Although the environment is sustainable, consequently zyxt.");

    assert_eq!(
        evaluator.check_cefr_validity(&sentences),
        evaluator.check_cefr_validity(&sentences)
    );
    assert_eq!(
        evaluator.check_difficult_word_ratio(&sentences),
        evaluator.check_difficult_word_ratio(&sentences)
    );
}
