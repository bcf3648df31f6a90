//! Linguistic test results.
//!
//! Every evaluator check produces one immutable [`TestResult`]: a named test,
//! a pass/fail status and metric-specific details. All metrics are oriented so
//! that a higher measured value means a more complex text; a test passes when
//! the measured value is at or below its threshold.

use serde::Serialize;

use crate::level::CefrLevel;

/// Identifies one of the linguistic constraint tests.
///
/// # Example
///
/// ```
/// use lexigrade_core::TestKind;
///
/// assert_eq!(TestKind::Oov.key(), "oov");
/// assert!(TestKind::Oov.is_hard());
/// assert!(!TestKind::ClauseCount.is_hard());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    CefrValidity,
    Oov,
    DifficultWordRatio,
    MorphologicalComplexity,
    LexicalRarity,
    ClauseCount,
    AverageWordLength,
}

impl TestKind {
    /// Tests gating every candidate (all must pass).
    pub const HARD: [TestKind; 3] = [
        TestKind::CefrValidity,
        TestKind::Oov,
        TestKind::DifficultWordRatio,
    ];

    /// Stylistic tests aggregated by pass ratio.
    pub const SOFT: [TestKind; 4] = [
        TestKind::MorphologicalComplexity,
        TestKind::LexicalRarity,
        TestKind::ClauseCount,
        TestKind::AverageWordLength,
    ];

    /// Stable snake_case key used in decisions and JSON output.
    pub const fn key(self) -> &'static str {
        match self {
            TestKind::CefrValidity => "cefr_validity",
            TestKind::Oov => "oov",
            TestKind::DifficultWordRatio => "difficult_word_ratio",
            TestKind::MorphologicalComplexity => "morphological_complexity",
            TestKind::LexicalRarity => "lexical_rarity",
            TestKind::ClauseCount => "clause_count",
            TestKind::AverageWordLength => "average_word_length",
        }
    }

    /// Human-readable test name.
    pub const fn display_name(self) -> &'static str {
        match self {
            TestKind::CefrValidity => "CEFR Lexical Validity (Gradient)",
            TestKind::Oov => "OOV Vocabulary Detection",
            TestKind::DifficultWordRatio => "Difficult Word Ratio",
            TestKind::MorphologicalComplexity => "Morphological Complexity",
            TestKind::LexicalRarity => "Lexical Rarity Score",
            TestKind::ClauseCount => "Clause Count",
            TestKind::AverageWordLength => "Average Word Length",
        }
    }

    pub fn is_hard(self) -> bool {
        Self::HARD.contains(&self)
    }
}

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
}

impl TestStatus {
    /// `Pass` iff `measured <= limit`.
    #[inline]
    pub fn at_most<T: PartialOrd>(measured: T, limit: T) -> Self {
        if measured <= limit {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        }
    }

    #[inline]
    pub fn is_pass(self) -> bool {
        self == TestStatus::Pass
    }
}

/// Result of one evaluator check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    #[serde(skip)]
    pub kind: TestKind,
    pub test_name: &'static str,
    pub status: TestStatus,
    pub details: TestDetails,
}

impl TestResult {
    pub fn new(kind: TestKind, status: TestStatus, details: TestDetails) -> Self {
        Self {
            kind,
            test_name: kind.display_name(),
            status,
            details,
        }
    }

    #[inline]
    pub fn passed(&self) -> bool {
        self.status.is_pass()
    }
}

/// Metric-specific details of a test result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestDetails {
    CefrValidity(CefrValidityDetails),
    Oov(OovDetails),
    DifficultWordRatio(DifficultWordDetails),
    MorphologicalComplexity(MorphologicalDetails),
    LexicalRarity(RarityDetails),
    ClauseCount(ClauseCountDetails),
    AverageWordLength(WordLengthDetails),
}

impl TestDetails {
    pub fn as_cefr_validity(&self) -> Option<&CefrValidityDetails> {
        match self {
            TestDetails::CefrValidity(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_oov(&self) -> Option<&OovDetails> {
        match self {
            TestDetails::Oov(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_difficult_word_ratio(&self) -> Option<&DifficultWordDetails> {
        match self {
            TestDetails::DifficultWordRatio(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_morphological(&self) -> Option<&MorphologicalDetails> {
        match self {
            TestDetails::MorphologicalComplexity(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_rarity(&self) -> Option<&RarityDetails> {
        match self {
            TestDetails::LexicalRarity(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_clause_count(&self) -> Option<&ClauseCountDetails> {
        match self {
            TestDetails::ClauseCount(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_word_length(&self) -> Option<&WordLengthDetails> {
        match self {
            TestDetails::AverageWordLength(d) => Some(d),
            _ => None,
        }
    }
}

/// A word above the target level that contributed to the lexical cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedWord {
    pub word: String,
    pub lemma: String,
    pub level: CefrLevel,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CefrValidityDetails {
    pub total_cost: f64,
    pub budget: f64,
    /// Number of contributing words, including those not listed.
    pub flagged_count: usize,
    pub flagged_words: Vec<FlaggedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OovDetails {
    pub oov_count: usize,
    pub oov_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultWordDetails {
    pub ratio: f64,
    pub threshold: f64,
    pub difficult_words: usize,
    pub total_words: usize,
    pub examples: Vec<String>,
}

/// How a word was judged morphologically complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphologyKind {
    DerivedNoun,
    DerivedAdverb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexWord {
    pub word: String,
    pub lemma: String,
    pub pos: String,
    pub zipf: f64,
    #[serde(rename = "type")]
    pub kind: MorphologyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MorphologicalDetails {
    pub ratio: f64,
    pub threshold: f64,
    pub complex_count: usize,
    pub complex_words: Vec<ComplexWord>,
    pub total_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RareWord {
    pub word: String,
    pub lemma: String,
    pub rarity: f64,
    pub freq: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RarityDetails {
    pub rarity_score: f64,
    /// Calibrated limit for the target level; `None` means no limit applies.
    pub threshold: Option<f64>,
    pub words_evaluated: usize,
    pub top_rare_words: Vec<RareWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceClauses {
    pub text: String,
    pub clauses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseCountDetails {
    pub max_clauses_per_sentence: usize,
    pub mean_clauses_per_sentence: f64,
    pub threshold: usize,
    /// The most complex sentences, worst first.
    pub sentences: Vec<SentenceClauses>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordLengthDetails {
    pub avg_word_length: f64,
    pub threshold: f64,
    pub total_words: usize,
    pub long_words: Vec<String>,
}
