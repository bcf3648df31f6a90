//! Reduction of named test results to acceptance decisions.

use std::collections::BTreeMap;

use lexigrade_core::{TestKind, TestResult};
use serde::Serialize;

/// Outcome of a constraint battery.
///
/// `pass_ratio` and `min_required` are only set for soft batteries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintDecision {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_ratio: Option<f64>,
    pub passed_tests: Vec<TestKind>,
    pub failed_tests: BTreeMap<TestKind, TestResult>,
    pub total_tests: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_required: Option<f64>,
}

impl ConstraintDecision {
    /// The failed result of `kind`, if it failed.
    pub fn failure(&self, kind: TestKind) -> Option<&TestResult> {
        self.failed_tests.get(&kind)
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_tests.is_empty()
    }
}

fn partition(results: Vec<TestResult>) -> (Vec<TestKind>, BTreeMap<TestKind, TestResult>, usize) {
    let total = results.len();
    let mut passed = Vec::new();
    let mut failed = BTreeMap::new();
    for result in results {
        if result.passed() {
            passed.push(result.kind);
        } else {
            failed.insert(result.kind, result);
        }
    }
    (passed, failed, total)
}

/// All-must-pass reduction.
///
/// ```
/// use lexigrade_core::test_result::{OovDetails, TestDetails};
/// use lexigrade_core::{TestKind, TestResult, TestStatus};
/// use lexigrade_scoring::evaluate_hard;
///
/// let oov = TestResult::new(
///     TestKind::Oov,
///     TestStatus::Fail,
///     TestDetails::Oov(OovDetails { oov_count: 1, oov_words: vec!["zyxt".into()] }),
/// );
/// let decision = evaluate_hard(vec![oov]);
/// assert!(!decision.accepted);
/// assert_eq!(decision.total_tests, 1);
/// ```
pub fn evaluate_hard(results: Vec<TestResult>) -> ConstraintDecision {
    let (passed_tests, failed_tests, total_tests) = partition(results);
    ConstraintDecision {
        accepted: failed_tests.is_empty(),
        pass_ratio: None,
        passed_tests,
        failed_tests,
        total_tests,
        min_required: None,
    }
}

/// Ratio-must-pass reduction. An empty battery has pass ratio 1.0.
pub fn evaluate_soft(results: Vec<TestResult>, min_pass_ratio: f64) -> ConstraintDecision {
    let (passed_tests, failed_tests, total_tests) = partition(results);
    let pass_ratio = if total_tests == 0 {
        1.0
    } else {
        passed_tests.len() as f64 / total_tests as f64
    };
    ConstraintDecision {
        accepted: pass_ratio >= min_pass_ratio,
        pass_ratio: Some(pass_ratio),
        passed_tests,
        failed_tests,
        total_tests,
        min_required: Some(min_pass_ratio),
    }
}
