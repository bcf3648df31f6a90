//! Calibration texts grouped by CEFR level.

use std::collections::BTreeMap;
use std::path::Path;

use lexigrade_core::{CefrLevel, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::artifacts::read_json;

/// Maps a dataset level label to a CEFR level.
///
/// Plus levels fold into their base level and `NA` marks unlabelled texts.
///
/// ```
/// use lexigrade_calibration::normalize_level;
/// use lexigrade_core::CefrLevel;
///
/// assert_eq!(normalize_level("B2+"), Some(CefrLevel::B2));
/// assert_eq!(normalize_level(" c1 "), Some(CefrLevel::C1));
/// assert_eq!(normalize_level("NA"), None);
/// assert_eq!(normalize_level("D1"), None);
/// ```
pub fn normalize_level(label: &str) -> Option<CefrLevel> {
    let label = label.trim();
    if label.eq_ignore_ascii_case("NA") {
        return None;
    }
    label.replace('+', "").parse().ok()
}

/// One labelled sample, as published in the source datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledText {
    pub text: String,
    pub cefr_level: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    ByLevel(BTreeMap<String, Vec<String>>),
    Records(Vec<LabelledText>),
}

/// Texts grouped by normalized level.
///
/// Serialized as `{"A1": ["...", ...], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextsByLevel {
    texts: BTreeMap<CefrLevel, Vec<String>>,
}

impl TextsByLevel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: CefrLevel, text: impl Into<String>) {
        self.texts.entry(level).or_default().push(text.into());
    }

    /// Groups labelled samples, dropping those whose label is not a level.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = LabelledText>,
    {
        let mut grouped = Self::new();
        let mut skipped = 0usize;
        for record in records {
            match normalize_level(&record.cefr_level) {
                Some(level) => grouped.push(level, record.text),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(event = "unlabelled_texts", skipped);
        }
        grouped
    }

    /// Normalizes the labels of a raw level map, merging folded levels.
    pub fn from_labels(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut grouped = Self::new();
        for (label, texts) in raw {
            let Some(level) = normalize_level(&label) else {
                warn!(event = "ignored_level", label = %label, texts = texts.len());
                continue;
            };
            grouped.texts.entry(level).or_default().extend(texts);
        }
        grouped
    }

    /// Reads either a level map or an array of labelled records.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(match read_json::<DatasetFile>(path)? {
            DatasetFile::ByLevel(raw) => Self::from_labels(raw),
            DatasetFile::Records(records) => Self::from_records(records),
        })
    }

    /// Appends every text of `other`.
    pub fn merge(&mut self, other: TextsByLevel) {
        for (level, texts) in other.texts {
            self.texts.entry(level).or_default().extend(texts);
        }
    }

    pub fn texts(&self, level: CefrLevel) -> &[String] {
        self.texts.get(&level).map_or(&[], Vec::as_slice)
    }

    /// Iterates levels in ascending order with their texts.
    pub fn iter(&self) -> impl Iterator<Item = (CefrLevel, &[String])> {
        self.texts.iter().map(|(level, texts)| (*level, texts.as_slice()))
    }

    /// Total number of texts.
    pub fn len(&self) -> usize {
        self.texts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
