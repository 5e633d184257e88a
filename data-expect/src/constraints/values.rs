//! Value range check.

use super::{missing_column, CheckOutcome};
use crate::core::Bounds;
use crate::data::Dataset;
use tracing::debug;

/// Passes when every non-null value of `column` is numeric and lies within
/// `bounds`.
///
/// Nulls and missing keys are skipped. Pair with a not-null expectation when
/// they must be rejected too.
///
/// # Examples
///
/// ```rust
/// use data_expect::constraints::values_between;
/// use data_expect::core::Bounds;
/// use data_expect::data::{Dataset, Record};
///
/// let dataset = Dataset::new(vec![Record::new().with("age", 150)]);
/// let outcome = values_between(&dataset, "age", Bounds::new(0.0, 100.0).unwrap());
/// assert!(!outcome.is_success());
/// ```
pub fn values_between(dataset: &Dataset, column: &str, bounds: Bounds) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let mut checked = 0usize;
    let mut out_of_range = Vec::new();
    let mut non_numeric = Vec::new();
    let mut observed_min = f64::INFINITY;
    let mut observed_max = f64::NEG_INFINITY;

    for (row, value) in dataset.non_null_values(column) {
        match value.as_f64() {
            Some(x) => {
                checked += 1;
                observed_min = observed_min.min(x);
                observed_max = observed_max.max(x);
                if !bounds.contains(x) {
                    out_of_range.push(row);
                }
            }
            None => non_numeric.push(row),
        }
    }

    debug!(
        column = %column,
        checked,
        out_of_range = out_of_range.len(),
        non_numeric = non_numeric.len(),
        "Range evaluated"
    );

    let mut outcome = if out_of_range.is_empty() && non_numeric.is_empty() {
        CheckOutcome::success(format!(
            "all {checked} non-null value(s) of '{column}' are {bounds}"
        ))
    } else {
        let mut problems = Vec::new();
        if !out_of_range.is_empty() {
            problems.push(format!("{} value(s) not {bounds}", out_of_range.len()));
        }
        if !non_numeric.is_empty() {
            problems.push(format!("{} non-numeric value(s)", non_numeric.len()));
        }
        CheckOutcome::failure(format!("'{column}' has {}", problems.join(" and ")))
    };

    if checked > 0 {
        outcome = outcome
            .with_detail("observed_min", observed_min)
            .with_detail("observed_max", observed_max);
    }
    if !out_of_range.is_empty() {
        outcome = outcome
            .with_detail("out_of_range_count", out_of_range.len())
            .with_rows("out_of_range_rows", &out_of_range);
    }
    if !non_numeric.is_empty() {
        outcome = outcome
            .with_detail("non_numeric_count", non_numeric.len())
            .with_rows("non_numeric_rows", &non_numeric);
    }
    outcome
}
