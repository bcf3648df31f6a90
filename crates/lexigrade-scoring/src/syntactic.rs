//! Syntactic complexity: clause density and word length.

use lexigrade_config::SyntacticConfig;
use lexigrade_core::annotation::eligible_tokens;
use lexigrade_core::test_result::{ClauseCountDetails, SentenceClauses, WordLengthDetails};
use lexigrade_core::{
    CefrLevel, LanguageProfile, Sentence, TestDetails, TestKind, TestResult, TestStatus,
};

#[derive(Debug, Clone, Copy)]
pub struct SyntacticComplexityEvaluator<'a> {
    profile: &'a LanguageProfile,
    config: &'a SyntacticConfig,
    target: CefrLevel,
}

impl<'a> SyntacticComplexityEvaluator<'a> {
    pub fn new(
        profile: &'a LanguageProfile,
        config: &'a SyntacticConfig,
        target: CefrLevel,
    ) -> Self {
        Self {
            profile,
            config,
            target,
        }
    }

    /// Clauses in a sentence: one main clause plus one per subordinate
    /// clause attachment.
    pub fn clauses(&self, sentence: &Sentence) -> usize {
        1 + sentence
            .tokens
            .iter()
            .filter(|token| self.config.is_clause_dependency(&token.dep))
            .count()
    }

    /// Passes iff no sentence has more clauses than the level allows.
    pub fn check_clause_count(&self, sentences: &[Sentence]) -> TestResult {
        let threshold = self.config.clause_limit(self.target);

        let mut per_sentence: Vec<SentenceClauses> = sentences
            .iter()
            .map(|sentence| SentenceClauses {
                text: sentence.text.trim().to_string(),
                clauses: self.clauses(sentence),
            })
            .collect();

        let max_clauses = per_sentence.iter().map(|s| s.clauses).max().unwrap_or(0);
        let mean_clauses = if per_sentence.is_empty() {
            0.0
        } else {
            per_sentence.iter().map(|s| s.clauses).sum::<usize>() as f64
                / per_sentence.len() as f64
        };

        per_sentence.sort_by(|a, b| b.clauses.cmp(&a.clauses));
        per_sentence.truncate(self.config.reported_sentences);

        TestResult::new(
            TestKind::ClauseCount,
            TestStatus::at_most(max_clauses, threshold),
            TestDetails::ClauseCount(ClauseCountDetails {
                max_clauses_per_sentence: max_clauses,
                mean_clauses_per_sentence: mean_clauses,
                threshold,
                sentences: per_sentence,
            }),
        )
    }

    /// Mean character length of punctuation-stripped eligible words.
    pub fn check_average_word_length(&self, sentences: &[Sentence]) -> TestResult {
        let threshold = self.config.word_length_limit(self.target);

        let words: Vec<&str> = eligible_tokens(sentences, self.profile.entity_filter())
            .map(|token| token.stripped_text())
            .filter(|word| !word.is_empty())
            .collect();

        let total_words = words.len();
        let total_chars: usize = words.iter().map(|word| word.chars().count()).sum();
        let avg_word_length = if total_words == 0 {
            0.0
        } else {
            total_chars as f64 / total_words as f64
        };

        let mut long_words: Vec<&str> = words
            .iter()
            .copied()
            .filter(|word| word.chars().count() as f64 > threshold)
            .collect();
        long_words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        long_words.truncate(self.config.report_limit);

        TestResult::new(
            TestKind::AverageWordLength,
            TestStatus::at_most(avg_word_length, threshold),
            TestDetails::AverageWordLength(WordLengthDetails {
                avg_word_length,
                threshold,
                total_words,
                long_words: long_words.into_iter().map(String::from).collect(),
            }),
        )
    }
}
