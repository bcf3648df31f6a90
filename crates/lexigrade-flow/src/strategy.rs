//! Choice between skipping, a single pass and staged simplification.

use std::fmt;

use lexigrade_core::CefrLevel;
use serde::Serialize;

/// Largest level gap handled in a single pass.
pub const MAX_SINGLE_PASS_DISTANCE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplificationStrategy {
    /// The text is already at or below the target.
    NotNecessary,
    /// Rewrite straight to the target.
    Simple,
    /// Rewrite one level at a time.
    InStages,
}

impl SimplificationStrategy {
    /// Selects a strategy from the level gap between `original` and `target`.
    ///
    /// ```
    /// use lexigrade_core::CefrLevel;
    /// use lexigrade_flow::SimplificationStrategy;
    ///
    /// let strategy = SimplificationStrategy::select(CefrLevel::C1, CefrLevel::A2);
    /// assert_eq!(strategy, SimplificationStrategy::InStages);
    /// ```
    pub fn select(original: CefrLevel, target: CefrLevel) -> Self {
        let distance = original.distance_from(target);
        if distance <= 0 {
            SimplificationStrategy::NotNecessary
        } else if distance <= MAX_SINGLE_PASS_DISTANCE {
            SimplificationStrategy::Simple
        } else {
            SimplificationStrategy::InStages
        }
    }

    /// Intermediate targets in the order they are applied.
    ///
    /// Staged runs visit every level from one below `original` down to
    /// `target`; a simple pass goes straight to `target`.
    pub fn targets(self, original: CefrLevel, target: CefrLevel) -> Vec<CefrLevel> {
        match self {
            SimplificationStrategy::NotNecessary => Vec::new(),
            SimplificationStrategy::Simple => vec![target],
            SimplificationStrategy::InStages => CefrLevel::ALL
                .into_iter()
                .rev()
                .filter(|level| *level < original && *level >= target)
                .collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimplificationStrategy::NotNecessary => "not_necessary",
            SimplificationStrategy::Simple => "simple",
            SimplificationStrategy::InStages => "in_stages",
        }
    }
}

impl fmt::Display for SimplificationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CefrLevel::*;

    #[test]
    fn test_select_by_distance() {
        assert_eq!(SimplificationStrategy::select(A2, B1), SimplificationStrategy::NotNecessary);
        assert_eq!(SimplificationStrategy::select(B1, B1), SimplificationStrategy::NotNecessary);
        assert_eq!(SimplificationStrategy::select(B1, A2), SimplificationStrategy::Simple);
        assert_eq!(SimplificationStrategy::select(B2, A2), SimplificationStrategy::Simple);
        assert_eq!(SimplificationStrategy::select(C1, A2), SimplificationStrategy::InStages);
        assert_eq!(SimplificationStrategy::select(C2, A1), SimplificationStrategy::InStages);
    }

    #[test]
    fn test_staged_targets_step_one_level_down() {
        let strategy = SimplificationStrategy::select(C1, A2);
        assert_eq!(strategy.targets(C1, A2), vec![B2, B1, A2]);
        assert_eq!(
            SimplificationStrategy::InStages.targets(C2, A1),
            vec![C1, B2, B1, A2, A1]
        );
    }

    #[test]
    fn test_simple_and_skip_targets() {
        assert_eq!(SimplificationStrategy::Simple.targets(B2, A2), vec![A2]);
        assert!(SimplificationStrategy::NotNecessary.targets(A1, B2).is_empty());
    }

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(SimplificationStrategy::InStages.to_string(), "in_stages");
        assert_eq!(
            serde_json::to_value(SimplificationStrategy::NotNecessary).unwrap(),
            "not_necessary"
        );
    }
}
