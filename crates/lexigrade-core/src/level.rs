//! CEFR levels and level-keyed tables.
//!
//! Levels form a fixed total order `A1 < A2 < B1 < B2 < C1 < C2`. Every
//! threshold in the scoring pipeline is keyed by level through [`LevelTable`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Common European Framework of Reference proficiency level.
///
/// # Examples
///
/// ```
/// use lexigrade_core::CefrLevel;
///
/// let level: CefrLevel = "b2".parse().unwrap();
/// assert_eq!(level, CefrLevel::B2);
/// assert!(CefrLevel::A1 < level);
/// assert_eq!(level.lower(), Some(CefrLevel::B1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// All levels in ascending order.
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    /// Position of the level in the fixed order (A1 = 0).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the level at the given position, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the next simpler level, or `None` for A1.
    pub fn lower(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Signed number of levels from `other` to `self`.
    #[inline]
    pub fn distance_from(self, other: CefrLevel) -> i32 {
        self.index() as i32 - other.index() as i32
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

/// Compares two levels, returning a negative value when `l1` is simpler.
///
/// ```
/// use lexigrade_core::{compare_levels, CefrLevel};
///
/// assert!(compare_levels(CefrLevel::A2, CefrLevel::C1) < 0);
/// assert_eq!(compare_levels(CefrLevel::B1, CefrLevel::B1), 0);
/// ```
pub fn compare_levels(l1: CefrLevel, l2: CefrLevel) -> i32 {
    l1.distance_from(l2)
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the six CEFR levels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown CEFR level '{input}' (expected one of A1, A2, B1, B2, C1, C2)")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for CefrLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CefrLevel {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CefrLevel> for String {
    fn from(level: CefrLevel) -> Self {
        level.as_str().to_string()
    }
}

/// A per-level table of limits.
///
/// Serialized as a plain map (`{"A1": 0.18, "A2": 0.15, ...}`). Lookups for a
/// level missing from the table return `None`; callers decide the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable<T>(BTreeMap<CefrLevel, T>);

impl<T> LevelTable<T> {
    /// Creates an empty table.
    pub fn empty() -> Self {
        LevelTable(BTreeMap::new())
    }

    /// Builds a table from one value per level, in ascending level order.
    pub fn from_values(values: [T; 6]) -> Self {
        LevelTable(CefrLevel::ALL.into_iter().zip(values).collect())
    }

    /// Sets the value for a level.
    pub fn insert(&mut self, level: CefrLevel, value: T) {
        self.0.insert(level, value);
    }

    /// Sets the value for a level (builder form).
    pub fn with(mut self, level: CefrLevel, value: T) -> Self {
        self.0.insert(level, value);
        self
    }

    /// Iterates entries in level order.
    pub fn iter(&self) -> impl Iterator<Item = (CefrLevel, &T)> {
        self.0.iter().map(|(level, value)| (*level, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Copy> LevelTable<T> {
    /// Returns the value configured for `level`.
    pub fn get(&self, level: CefrLevel) -> Option<T> {
        self.0.get(&level).copied()
    }

    /// Returns the value for `level`, or `fallback` when the level is absent.
    pub fn get_or(&self, level: CefrLevel, fallback: T) -> T {
        self.get(level).unwrap_or(fallback)
    }
}

impl<T: Copy + PartialOrd> LevelTable<T> {
    /// Returns the value for `level`, or the largest configured value when
    /// the level is absent. Limits grow with the level, so the largest value
    /// is the most permissive one.
    ///
    /// ```
    /// use lexigrade_core::{CefrLevel, LevelTable};
    ///
    /// let table = LevelTable::empty()
    ///     .with(CefrLevel::A1, 0.18)
    ///     .with(CefrLevel::B1, 0.25);
    /// assert_eq!(table.get_or_loosest(CefrLevel::A1), Some(0.18));
    /// assert_eq!(table.get_or_loosest(CefrLevel::C2), Some(0.25));
    /// ```
    pub fn get_or_loosest(&self, level: CefrLevel) -> Option<T> {
        self.get(level).or_else(|| {
            self.0
                .values()
                .copied()
                .fold(None, |loosest: Option<T>, value| match loosest {
                    Some(current) if current >= value => Some(current),
                    _ => Some(value),
                })
        })
    }
}

impl<T> Default for LevelTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FromIterator<(CefrLevel, T)> for LevelTable<T> {
    fn from_iter<I: IntoIterator<Item = (CefrLevel, T)>>(iter: I) -> Self {
        LevelTable(iter.into_iter().collect())
    }
}
