//! Check logic for every expectation kind.
//!
//! Each submodule holds the pure check functions for one family of
//! expectations. A check reads the dataset, never mutates it, and never fails
//! for data-shape reasons: wrong types, missing columns and empty datasets are
//! reported as a failed [`CheckOutcome`] with a descriptive message.
//!
//! ## Check Families
//!
//! ### Schema
//! - [`column_exists`], [`column_count_equals`], [`column_type`]
//!
//! ### Completeness & Uniqueness
//! - [`values_not_null`], [`values_unique`]
//!
//! ### Ranges & Statistics
//! - [`values_between`], [`mean_between`], [`stdev_between`],
//!   [`row_count_between`], [`correlation_between`]
//!
//! ### Distribution
//! - [`label_balance`]
//!
//! ### Format & Temporal
//! - [`valid_emails`], [`valid_urls`], [`valid_timestamps`],
//!   [`timestamps_chronological`]
//!
//! Dispatch from an [`Expectation`] to these functions lives in
//! [`core::evaluator`](crate::core::evaluator).

use crate::core::{Expectation, ExpectationResult};
use crate::data::Dataset;
use std::collections::BTreeMap;

mod balance;
mod column_count;
mod completeness;
mod correlation;
mod datatype;
mod format;
mod size;
mod statistics;
mod temporal_ordering;
mod uniqueness;
mod values;

pub use balance::label_balance;
pub use column_count::column_count_equals;
pub use completeness::{column_exists, values_not_null};
pub use correlation::correlation_between;
pub use datatype::column_type;
pub use format::{is_valid_email, valid_emails, valid_timestamps, valid_urls};
pub use size::row_count_between;
pub use statistics::{mean_between, stdev_between};
pub use temporal_ordering::timestamps_chronological;
pub use uniqueness::values_unique;
pub use values::values_between;

/// Maximum number of offending row indices recorded in a result's details.
/// The full count is always reported alongside.
pub const MAX_REPORTED_VIOLATIONS: usize = 100;

/// The outcome of a single check, before it is tied to its expectation.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    success: bool,
    message: String,
    details: BTreeMap<String, serde_json::Value>,
}

impl CheckOutcome {
    /// Creates a passing outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Creates a failing outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Passing or failing depending on `success`.
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        if success {
            Self::success(message)
        } else {
            Self::failure(message)
        }
    }

    /// Attaches a piece of evidence.
    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Attaches offending row indices, capped at [`MAX_REPORTED_VIOLATIONS`].
    pub fn with_rows(self, key: &str, rows: &[usize]) -> Self {
        let shown: Vec<usize> = rows.iter().take(MAX_REPORTED_VIOLATIONS).copied().collect();
        let truncated = rows.len() > shown.len();
        let outcome = self.with_detail(key, shown);
        if truncated {
            outcome.with_detail("truncated", true)
        } else {
            outcome
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.details
    }

    /// Binds the outcome to the expectation that produced it.
    pub fn into_result(self, expectation: Expectation) -> ExpectationResult {
        ExpectationResult::with_details(expectation, self.success, self.message, self.details)
    }
}

/// Fails when no record carries `column`.
pub(crate) fn missing_column(dataset: &Dataset, column: &str) -> Option<CheckOutcome> {
    if dataset.has_column(column) {
        None
    } else {
        Some(
            CheckOutcome::failure(format!("column '{column}' not found in dataset"))
                .with_detail("column", column),
        )
    }
}

/// Percentage with at most two decimals, for messages.
pub(crate) fn percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0%".to_string();
    }
    let pct = part as f64 / whole as f64 * 100.0;
    format!("{}%", (pct * 100.0).round() / 100.0)
}
