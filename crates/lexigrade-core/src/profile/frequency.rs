//! Word frequency resources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Zipf-scale frequency of a lemma, with its dominant part of speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipfEntry {
    pub zipf: f64,
    #[serde(default)]
    pub pos: String,
}

/// External frequency norms (SUBTLEX) keyed by lemma.
///
/// Optional per language: an empty table yields zipf 0.0 for every lemma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: HashMap<String, ZipfEntry>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zipf score of `lemma`; 0.0 when unknown.
    #[inline]
    pub fn zipf(&self, lemma: &str) -> f64 {
        self.entries.get(lemma).map_or(0.0, |entry| entry.zipf)
    }

    pub fn get(&self, lemma: &str) -> Option<&ZipfEntry> {
        self.entries.get(lemma)
    }

    pub fn insert(&mut self, lemma: impl Into<String>, zipf: f64, pos: impl Into<String>) {
        self.entries.insert(
            lemma.into(),
            ZipfEntry {
                zipf,
                pos: pos.into(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw lemma counts from the calibration corpus.
///
/// Serialized as `{"total_tokens": N, "freqs": {"lemma": count, ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusFrequencies {
    pub total_tokens: u64,
    pub freqs: HashMap<String, u64>,
}

impl CorpusFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of `lemma`; 0 when unseen.
    #[inline]
    pub fn count(&self, lemma: &str) -> u64 {
        self.freqs.get(lemma).copied().unwrap_or(0)
    }

    /// Number of distinct lemmas, at least 1.
    #[inline]
    pub fn vocabulary_size(&self) -> u64 {
        (self.freqs.len() as u64).max(1)
    }

    /// Adds `count` occurrences of `lemma`.
    pub fn add(&mut self, lemma: impl Into<String>, count: u64) {
        *self.freqs.entry(lemma.into()).or_insert(0) += count;
        self.total_tokens += count;
    }

    /// Additive-smoothed negative log probability of `lemma`.
    ///
    /// `-ln((freq + 1) / (total_tokens + V))`
    pub fn rarity(&self, lemma: &str) -> f64 {
        let freq = self.count(lemma) as f64;
        let denominator = (self.total_tokens + self.vocabulary_size()) as f64;
        -((freq + 1.0) / denominator).ln()
    }
}
