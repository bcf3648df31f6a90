//! Generator feedback synthesized from failed constraint tests.

use lexigrade_core::{CefrLevel, TestKind};
use lexigrade_scoring::ConstraintDecision;

/// Words named by the failed hard tests: flagged over-level words first,
/// then out-of-vocabulary words.
///
/// When only the difficult word ratio failed, its examples are used. At
/// most `limit` words are returned.
pub fn invalid_words(decision: &ConstraintDecision, limit: usize) -> Vec<String> {
    let mut words = Vec::new();
    if let Some(details) = decision
        .failure(TestKind::CefrValidity)
        .and_then(|result| result.details.as_cefr_validity())
    {
        words.extend(details.flagged_words.iter().map(|w| w.word.clone()));
    }
    if let Some(details) = decision
        .failure(TestKind::Oov)
        .and_then(|result| result.details.as_oov())
    {
        words.extend(details.oov_words.iter().cloned());
    }
    if words.is_empty() {
        if let Some(details) = decision
            .failure(TestKind::DifficultWordRatio)
            .and_then(|result| result.details.as_difficult_word_ratio())
        {
            words.extend(details.examples.iter().cloned());
        }
    }
    words.truncate(limit);
    words
}

/// Feedback for a rewrite that failed the hard battery.
pub fn build_hard_feedback(
    decision: &ConstraintDecision,
    target: CefrLevel,
    limit: usize,
) -> String {
    let words = invalid_words(decision, limit);
    if words.is_empty() {
        return fallback_feedback(target);
    }
    format!(
        "The text contains words above CEFR {target}: {}. \nRewrite the text without using these words.",
        words.join(", ")
    )
}

/// Feedback for a rewrite that passed the hard battery but not the soft
/// one, with one paragraph per failing metric in priority order: clause
/// count, lexical rarity, average word length, morphological complexity.
///
/// Returns `None` when no failure yields an actionable message.
pub fn build_soft_feedback(decision: &ConstraintDecision, target: CefrLevel) -> Option<String> {
    let mut messages = Vec::new();

    if let Some(details) = decision
        .failure(TestKind::ClauseCount)
        .and_then(|result| result.details.as_clause_count())
    {
        // one clause over the limit is tolerated
        if details.max_clauses_per_sentence > details.threshold + 1 {
            if let Some(worst) = details.sentences.first() {
                messages.push(format!(
                    "The following sentence has {} clauses, but CEFR {target} allows at most {}:\n\"{}\"\nRewrite it as multiple very short sentences, each with one idea only.",
                    worst.clauses, details.threshold, worst.text
                ));
            }
        }
    }

    if let Some(details) = decision
        .failure(TestKind::LexicalRarity)
        .and_then(|result| result.details.as_rarity())
    {
        if !details.top_rare_words.is_empty() {
            let words: Vec<&str> = details.top_rare_words.iter().map(|w| w.word.as_str()).collect();
            messages.push(format!(
                "The following words are too rare for CEFR {target}: {}. Replace them with very common, everyday words.",
                words.join(", ")
            ));
        }
    }

    if let Some(details) = decision
        .failure(TestKind::AverageWordLength)
        .and_then(|result| result.details.as_word_length())
    {
        if !details.long_words.is_empty() {
            messages.push(format!(
                "The following words are too long for CEFR {target}: {}. Replace them with shorter, simpler words.",
                details.long_words.join(", ")
            ));
        }
    }

    if let Some(details) = decision
        .failure(TestKind::MorphologicalComplexity)
        .and_then(|result| result.details.as_morphological())
    {
        if !details.complex_words.is_empty() {
            let words: Vec<&str> = details.complex_words.iter().map(|w| w.word.as_str()).collect();
            messages.push(format!(
                "The following words are morphologically complex for CEFR {target}: {}. Replace them with simpler word forms.",
                words.join(", ")
            ));
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("\n\n"))
    }
}

/// Generic nudge used when no failed test names anything specific.
pub fn fallback_feedback(target: CefrLevel) -> String {
    format!("Simplify the text slightly to better match CEFR {target}.\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use lexigrade_core::test_result::{
        CefrValidityDetails, ClauseCountDetails, ComplexWord, DifficultWordDetails, FlaggedWord,
        MorphologicalDetails, MorphologyKind, OovDetails, RareWord, RarityDetails,
        SentenceClauses, WordLengthDetails,
    };
    use lexigrade_core::{TestDetails, TestResult, TestStatus};

    use super::*;

    fn decision(failures: Vec<(TestKind, TestDetails)>) -> ConstraintDecision {
        let failed_tests: BTreeMap<TestKind, TestResult> = failures
            .into_iter()
            .map(|(kind, details)| (kind, TestResult::new(kind, TestStatus::Fail, details)))
            .collect();
        ConstraintDecision {
            accepted: failed_tests.is_empty(),
            pass_ratio: None,
            passed_tests: Vec::new(),
            total_tests: failed_tests.len(),
            failed_tests,
            min_required: None,
        }
    }

    fn clauses(max: usize, threshold: usize) -> (TestKind, TestDetails) {
        (
            TestKind::ClauseCount,
            TestDetails::ClauseCount(ClauseCountDetails {
                max_clauses_per_sentence: max,
                mean_clauses_per_sentence: max as f64,
                threshold,
                sentences: vec![SentenceClauses {
                    text: "I stayed because it rained although it was late.".to_string(),
                    clauses: max,
                }],
            }),
        )
    }

    fn rarity() -> (TestKind, TestDetails) {
        (
            TestKind::LexicalRarity,
            TestDetails::LexicalRarity(RarityDetails {
                rarity_score: 8.0,
                threshold: Some(5.0),
                words_evaluated: 2,
                top_rare_words: vec![RareWord {
                    word: "perspicacity".to_string(),
                    lemma: "perspicacity".to_string(),
                    rarity: 10.0,
                    freq: 1,
                }],
            }),
        )
    }

    #[test]
    fn test_hard_feedback_names_flagged_and_oov_words() {
        let decision = decision(vec![
            (
                TestKind::CefrValidity,
                TestDetails::CefrValidity(CefrValidityDetails {
                    total_cost: 3.2,
                    budget: 1.0,
                    flagged_count: 1,
                    flagged_words: vec![FlaggedWord {
                        word: "ubiquitous".to_string(),
                        lemma: "ubiquitous".to_string(),
                        level: CefrLevel::C1,
                        cost: 3.2,
                    }],
                }),
            ),
            (
                TestKind::Oov,
                TestDetails::Oov(OovDetails {
                    oov_count: 1,
                    oov_words: vec!["zyxt".to_string()],
                }),
            ),
        ]);

        assert_eq!(invalid_words(&decision, 5), vec!["ubiquitous", "zyxt"]);
        assert_eq!(invalid_words(&decision, 1), vec!["ubiquitous"]);
        assert_eq!(
            build_hard_feedback(&decision, CefrLevel::A2, 5),
            "The text contains words above CEFR A2: ubiquitous, zyxt. \n\
             Rewrite the text without using these words."
        );
    }

    #[test]
    fn test_hard_feedback_falls_back_to_difficult_word_examples() {
        let decision = decision(vec![(
            TestKind::DifficultWordRatio,
            TestDetails::DifficultWordRatio(DifficultWordDetails {
                ratio: 0.5,
                threshold: 0.1,
                difficult_words: 1,
                total_words: 2,
                examples: vec!["environment".to_string()],
            }),
        )]);
        assert_eq!(invalid_words(&decision, 5), vec!["environment"]);
    }

    #[test]
    fn test_hard_feedback_without_words_is_generic() {
        let empty = decision(Vec::new());
        assert_eq!(
            build_hard_feedback(&empty, CefrLevel::B1, 5),
            "Simplify the text slightly to better match CEFR B1.\n"
        );
    }

    #[test]
    fn test_soft_feedback_priority_order() {
        let decision = decision(vec![
            (
                TestKind::AverageWordLength,
                TestDetails::AverageWordLength(WordLengthDetails {
                    avg_word_length: 7.0,
                    threshold: 4.5,
                    total_words: 3,
                    long_words: vec!["sustainable".to_string()],
                }),
            ),
            (
                TestKind::MorphologicalComplexity,
                TestDetails::MorphologicalComplexity(MorphologicalDetails {
                    ratio: 0.5,
                    threshold: 0.1,
                    complex_count: 1,
                    complex_words: vec![ComplexWord {
                        word: "happiness".to_string(),
                        lemma: "happiness".to_string(),
                        pos: "NOUN".to_string(),
                        zipf: 4.2,
                        kind: MorphologyKind::DerivedNoun,
                    }],
                    total_words: 2,
                }),
            ),
            rarity(),
            clauses(4, 1),
        ]);

        let feedback = build_soft_feedback(&decision, CefrLevel::A1).unwrap();
        let paragraphs: Vec<&str> = feedback.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        assert_eq!(
            paragraphs[0],
            "The following sentence has 4 clauses, but CEFR A1 allows at most 1:\n\
             \"I stayed because it rained although it was late.\"\n\
             Rewrite it as multiple very short sentences, each with one idea only."
        );
        assert!(paragraphs[1].starts_with("The following words are too rare for CEFR A1: perspicacity."));
        assert!(paragraphs[2].contains("too long for CEFR A1: sustainable."));
        assert!(paragraphs[3].contains("morphologically complex for CEFR A1: happiness."));
    }

    #[test]
    fn test_clause_count_one_over_limit_is_tolerated() {
        let tolerated = decision(vec![clauses(2, 1)]);
        assert_eq!(build_soft_feedback(&tolerated, CefrLevel::A1), None);

        let with_rarity = decision(vec![clauses(2, 1), rarity()]);
        let feedback = build_soft_feedback(&with_rarity, CefrLevel::A1).unwrap();
        assert!(!feedback.contains("clauses"));
    }
}
