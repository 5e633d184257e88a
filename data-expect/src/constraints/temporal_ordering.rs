//! Chronological ordering check.

use super::{missing_column, CheckOutcome};
use crate::data::Dataset;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Passes when the non-null timestamps of `column` never decrease in record
/// order. Equal consecutive timestamps are allowed.
///
/// Values are read with [`Value::as_timestamp`](crate::data::Value::as_timestamp),
/// so timestamp strings take part in the ordering. A value that is not a
/// timestamp fails the check.
///
/// # Examples
///
/// ```rust
/// use data_expect::constraints::timestamps_chronological;
/// use data_expect::data::{Dataset, Record};
///
/// let dataset: Dataset = ["2024-01-01", "2024-01-02", "2024-01-02", "2024-01-05"]
///     .into_iter()
///     .map(|ts| Record::new().with("at", ts))
///     .collect();
/// assert!(timestamps_chronological(&dataset, "at").is_success());
/// ```
pub fn timestamps_chronological(dataset: &Dataset, column: &str) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let mut unparseable = Vec::new();
    let mut violations = Vec::new();
    let mut previous: Option<(usize, DateTime<Utc>)> = None;
    let mut first_violation: Option<(usize, usize)> = None;

    for (row, value) in dataset.non_null_values(column) {
        let Some(ts) = value.as_timestamp() else {
            unparseable.push(row);
            continue;
        };
        if let Some((prev_row, prev_ts)) = previous {
            if ts < prev_ts {
                violations.push(row);
                first_violation.get_or_insert((prev_row, row));
            }
        }
        previous = Some((row, ts));
    }

    debug!(
        column = %column,
        violations = violations.len(),
        unparseable = unparseable.len(),
        "Temporal ordering evaluated"
    );

    if !unparseable.is_empty() {
        return CheckOutcome::failure(format!(
            "{} value(s) of '{column}' are not timestamps",
            unparseable.len()
        ))
        .with_detail("unparseable_count", unparseable.len())
        .with_rows("unparseable_rows", &unparseable);
    }

    match first_violation {
        None => CheckOutcome::success(format!("timestamps in '{column}' are chronological")),
        Some((before, after)) => CheckOutcome::failure(format!(
            "timestamps in '{column}' go backwards {} time(s), first at row {after} (after row {before})",
            violations.len()
        ))
        .with_detail("violation_count", violations.len())
        .with_rows("violation_rows", &violations),
    }
}
