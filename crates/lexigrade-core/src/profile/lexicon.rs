//! CEFR lexicon: lemma to the level at which it is introduced.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::level::CefrLevel;

/// Mapping from lemma to its minimal CEFR level.
///
/// # Example
///
/// ```
/// use lexigrade_core::{CefrLevel, Lexicon};
///
/// let mut lexicon = Lexicon::new();
/// lexicon.insert_min("house", CefrLevel::A2);
/// lexicon.insert_min("house", CefrLevel::A1);
/// lexicon.insert_min("house", CefrLevel::B1);
/// assert_eq!(lexicon.level("house"), Some(CefrLevel::A1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    entries: HashMap<String, CefrLevel>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of `lemma`, or `None` if it is out of vocabulary.
    #[inline]
    pub fn level(&self, lemma: &str) -> Option<CefrLevel> {
        self.entries.get(lemma).copied()
    }

    #[inline]
    pub fn contains(&self, lemma: &str) -> bool {
        self.entries.contains_key(lemma)
    }

    /// Records `lemma` at `level`, keeping the lowest level seen.
    pub fn insert_min(&mut self, lemma: impl Into<String>, level: CefrLevel) {
        self.entries
            .entry(lemma.into())
            .and_modify(|existing| *existing = (*existing).min(level))
            .or_insert(level);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CefrLevel)> {
        self.entries.iter().map(|(lemma, level)| (lemma.as_str(), *level))
    }
}

impl<S: Into<String>> FromIterator<(S, CefrLevel)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (S, CefrLevel)>>(iter: I) -> Self {
        let mut lexicon = Lexicon::new();
        for (lemma, level) in iter {
            lexicon.insert_min(lemma, level);
        }
        lexicon
    }
}
