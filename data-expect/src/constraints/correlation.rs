//! Correlation check between two numeric columns.

use super::{missing_column, CheckOutcome};
use crate::analyzers::correlation::{correlation, paired_values, CorrelationMethod};
use crate::core::Bounds;
use crate::data::Dataset;
use tracing::{debug, instrument};

/// Passes when the correlation of `column_a` and `column_b` lies within
/// `bounds`.
///
/// Only rows where both values are numeric take part. An undefined
/// correlation (fewer than two such rows, or zero variance on either side)
/// fails the check; it is never read as zero.
///
/// # Examples
///
/// ```rust
/// use data_expect::analyzers::CorrelationMethod;
/// use data_expect::constraints::correlation_between;
/// use data_expect::core::Bounds;
/// use data_expect::data::{Dataset, Record};
///
/// let dataset: Dataset = (1..=5)
///     .map(|i| Record::new().with("x", i).with("y", i * 2))
///     .collect();
///
/// let outcome = correlation_between(
///     &dataset,
///     "x",
///     "y",
///     CorrelationMethod::Pearson,
///     Bounds::new(0.9, 1.0).unwrap(),
/// );
/// assert!(outcome.is_success());
/// ```
#[instrument(skip(dataset), fields(rows = dataset.len()))]
pub fn correlation_between(
    dataset: &Dataset,
    column_a: &str,
    column_b: &str,
    method: CorrelationMethod,
    bounds: Bounds,
) -> CheckOutcome {
    for column in [column_a, column_b] {
        if let Some(missing) = missing_column(dataset, column) {
            return missing;
        }
    }

    let (xs, ys) = paired_values(dataset, column_a, column_b);
    let pairs = xs.len();

    let Some(r) = correlation(method, &xs, &ys) else {
        debug!(pairs, "Correlation undefined");
        return CheckOutcome::failure(format!(
            "{method} correlation of '{column_a}' and '{column_b}' is undefined over {pairs} complete pair(s)"
        ))
        .with_detail("pairs", pairs)
        .with_detail("method", method.name());
    };

    let success = bounds.contains(r);
    let message = if success {
        format!("{method} correlation of '{column_a}' and '{column_b}' is {r:.4}, {bounds}")
    } else {
        format!("{method} correlation of '{column_a}' and '{column_b}' is {r:.4}, not {bounds}")
    };
    CheckOutcome::new(success, message)
        .with_detail("correlation", r)
        .with_detail("pairs", pairs)
        .with_detail("method", method.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Value};

    fn bounds(min: f64, max: f64) -> Bounds {
        Bounds::new(min, max).unwrap()
    }

    fn linear() -> Dataset {
        (1..=5)
            .map(|i| Record::new().with("x", i).with("y", 10 - 2 * i))
            .collect()
    }

    #[test]
    fn test_negative_correlation() {
        let dataset = linear();
        let outcome =
            correlation_between(&dataset, "x", "y", CorrelationMethod::Pearson, bounds(-1.0, -0.9));
        assert!(outcome.is_success());
        assert_eq!(outcome.details()["pairs"], 5);

        let outcome =
            correlation_between(&dataset, "x", "y", CorrelationMethod::Pearson, bounds(0.0, 1.0));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_spearman_monotonic() {
        let dataset: Dataset = (1..=5)
            .map(|i| Record::new().with("x", i).with("y", i * i))
            .collect();
        let outcome =
            correlation_between(&dataset, "x", "y", CorrelationMethod::Spearman, bounds(0.999, 1.0));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_pairwise_complete_rows_only() {
        let dataset = Dataset::new(vec![
            Record::new().with("x", 1).with("y", 2),
            Record::new().with("x", 2).with("y", Value::Null),
            Record::new().with("x", "n/a").with("y", 5),
            Record::new().with("x", 3).with("y", 6),
        ]);
        let outcome =
            correlation_between(&dataset, "x", "y", CorrelationMethod::Pearson, bounds(0.9, 1.0));
        assert!(outcome.is_success());
        assert_eq!(outcome.details()["pairs"], 2);
    }

    #[test]
    fn test_zero_variance_is_failure_not_zero() {
        let dataset: Dataset = (1..=4)
            .map(|i| Record::new().with("x", i).with("k", 7))
            .collect();
        let outcome =
            correlation_between(&dataset, "x", "k", CorrelationMethod::Pearson, bounds(-1.0, 1.0));
        assert!(!outcome.is_success());
        assert!(outcome.message().contains("undefined"));
        assert!(!outcome.details().contains_key("correlation"));
    }

    #[test]
    fn test_missing_column() {
        let outcome = correlation_between(
            &linear(),
            "x",
            "z",
            CorrelationMethod::Pearson,
            bounds(-1.0, 1.0),
        );
        assert_eq!(outcome.message(), "column 'z' not found in dataset");
    }
}
