//! Mean and standard deviation checks.
//!
//! Both use the sample conventions of [`analyzers::statistics`](crate::analyzers::statistics).
//! An undefined statistic (no numeric values, or a single value for the
//! standard deviation) fails the check.

use super::{missing_column, CheckOutcome};
use crate::analyzers::statistics;
use crate::core::Bounds;
use crate::data::Dataset;

/// Which statistic to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statistic {
    Mean,
    Stdev,
}

impl Statistic {
    fn name(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Stdev => "standard deviation",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Stdev => "stdev",
        }
    }

    fn compute(&self, xs: &[f64]) -> Option<f64> {
        match self {
            Statistic::Mean => statistics::mean(xs),
            Statistic::Stdev => statistics::stdev(xs),
        }
    }
}

/// Passes when the mean of the numeric values of `column` lies within `bounds`.
pub fn mean_between(dataset: &Dataset, column: &str, bounds: Bounds) -> CheckOutcome {
    statistic_between(dataset, column, Statistic::Mean, bounds)
}

/// Passes when the sample standard deviation of `column` lies within `bounds`.
pub fn stdev_between(dataset: &Dataset, column: &str, bounds: Bounds) -> CheckOutcome {
    statistic_between(dataset, column, Statistic::Stdev, bounds)
}

fn statistic_between(
    dataset: &Dataset,
    column: &str,
    statistic: Statistic,
    bounds: Bounds,
) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let mut xs = Vec::new();
    let mut non_numeric = Vec::new();
    for (row, value) in dataset.non_null_values(column) {
        match value.as_f64() {
            Some(x) => xs.push(x),
            None => non_numeric.push(row),
        }
    }

    if !non_numeric.is_empty() {
        return CheckOutcome::failure(format!(
            "'{column}' has {} non-numeric value(s); {} is not computable",
            non_numeric.len(),
            statistic.name()
        ))
        .with_detail("non_numeric_count", non_numeric.len())
        .with_rows("non_numeric_rows", &non_numeric);
    }

    let Some(observed) = statistic.compute(&xs) else {
        return CheckOutcome::failure(format!(
            "{} of '{column}' is undefined over {} numeric value(s)",
            statistic.name(),
            xs.len()
        ))
        .with_detail("count", xs.len());
    };

    let success = bounds.contains(observed);
    let message = if success {
        format!("{} of '{column}' is {observed}, {bounds}", statistic.name())
    } else {
        format!("{} of '{column}' is {observed}, not {bounds}", statistic.name())
    };
    CheckOutcome::new(success, message)
        .with_detail(statistic.key(), observed)
        .with_detail("count", xs.len())
}
