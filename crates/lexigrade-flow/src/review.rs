//! Parsing of the semantic reviewer's verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Explanation attached to reviewer output that is not a JSON verdict.
pub const INVALID_REVIEW: &str = "Invalid JSON from semantic reviewer";

/// Explanation attached when the reviewer could not be reached.
pub const REVIEWER_UNAVAILABLE: &str = "Semantic reviewer unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewDecision {
    Pass,
    Fail,
}

/// Verdict of the semantic reviewer.
///
/// Fields the reviewer adds beyond the decision and explanation are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticReview {
    pub final_decision: ReviewDecision,
    #[serde(default)]
    pub brief_explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SemanticReview {
    /// Parses raw reviewer output.
    ///
    /// Anything that is not a JSON object with a valid `final_decision`
    /// becomes a failing review carrying the raw output.
    ///
    /// ```
    /// use lexigrade_flow::{ReviewDecision, SemanticReview};
    ///
    /// let review = SemanticReview::parse("not json");
    /// assert_eq!(review.final_decision, ReviewDecision::Fail);
    /// assert_eq!(review.brief_explanation, "Invalid JSON from semantic reviewer");
    /// assert_eq!(review.raw_output.as_deref(), Some("not json"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::failed(INVALID_REVIEW, raw))
    }

    /// A failing review with the given explanation.
    pub fn failed(explanation: &str, raw_output: &str) -> Self {
        Self {
            final_decision: ReviewDecision::Fail,
            brief_explanation: explanation.to_string(),
            raw_output: Some(raw_output.to_string()),
            extra: BTreeMap::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.final_decision == ReviewDecision::Pass
    }

    /// The explanation of a failing review.
    pub fn alert(&self) -> Option<&str> {
        match self.final_decision {
            ReviewDecision::Fail => Some(self.brief_explanation.as_str()),
            ReviewDecision::Pass => None,
        }
    }
}
