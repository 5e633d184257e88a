//! Expectation results and their aggregation.

use super::Expectation;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of evaluating one expectation.
///
/// `details` carries check-specific evidence such as observed statistics or
/// offending row indices. Results are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectationResult {
    expectation: Expectation,
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    details: BTreeMap<String, serde_json::Value>,
}

impl ExpectationResult {
    pub fn new(expectation: Expectation, success: bool, message: impl Into<String>) -> Self {
        Self {
            expectation,
            success,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Creates a result with evidence attached.
    pub fn with_details(
        expectation: Expectation,
        success: bool,
        message: impl Into<String>,
        details: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            expectation,
            success,
            message: message.into(),
            details,
        }
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.details
    }

    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.get(key)
    }
}

/// The aggregated outcome of an evaluation.
///
/// Invariants: `expectations_met + expectations_failed == total_expectations
/// == results.len()` and `success == (expectations_failed == 0)`. `results`
/// follows input order, or a prefix of it under short-circuit evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    success: bool,
    results: Vec<ExpectationResult>,
    total_expectations: usize,
    expectations_met: usize,
    expectations_failed: usize,
}

impl ValidationResult {
    /// Folds individual results into a summary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use data_expect::core::{Expectation, ExpectationResult, ValidationResult};
    ///
    /// let exists = Expectation::column_exists("id").unwrap();
    /// let result = ValidationResult::from_results(vec![
    ///     ExpectationResult::new(exists.clone(), true, "ok"),
    ///     ExpectationResult::new(exists, false, "missing"),
    /// ]);
    ///
    /// assert!(!result.success());
    /// assert_eq!(result.total_expectations(), 2);
    /// assert_eq!(result.expectations_met(), 1);
    /// assert_eq!(result.expectations_failed(), 1);
    /// ```
    pub fn from_results(results: Vec<ExpectationResult>) -> Self {
        let expectations_met = results.iter().filter(|r| r.success).count();
        let total_expectations = results.len();
        let expectations_failed = total_expectations - expectations_met;
        Self {
            success: expectations_failed == 0,
            results,
            total_expectations,
            expectations_met,
            expectations_failed,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn results(&self) -> &[ExpectationResult] {
        &self.results
    }

    pub fn total_expectations(&self) -> usize {
        self.total_expectations
    }

    pub fn expectations_met(&self) -> usize {
        self.expectations_met
    }

    pub fn expectations_failed(&self) -> usize {
        self.expectations_failed
    }

    /// Failed results, in evaluation order.
    pub fn failures(&self) -> impl Iterator<Item = &ExpectationResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Fraction of evaluated expectations that passed.
    pub fn success_rate(&self) -> f64 {
        if self.total_expectations == 0 {
            0.0
        } else {
            self.expectations_met as f64 / self.total_expectations as f64
        }
    }
}
