//! Column count check.

use super::CheckOutcome;
use crate::data::Dataset;

/// Passes when the number of distinct column names across all records equals
/// `expected`. Records need not share the same columns.
///
/// # Examples
///
/// ```rust
/// use data_expect::constraints::column_count_equals;
/// use data_expect::data::{Dataset, Record};
///
/// let dataset = Dataset::new(vec![
///     Record::new().with("id", 1).with("name", "a"),
///     Record::new().with("id", 2).with("email", "b@example.com"),
/// ]);
/// assert!(column_count_equals(&dataset, 3).is_success());
/// ```
pub fn column_count_equals(dataset: &Dataset, expected: usize) -> CheckOutcome {
    let columns = dataset.columns();
    let actual = columns.len();
    let names: Vec<&str> = columns.into_iter().collect();

    let outcome = if actual == expected {
        CheckOutcome::success(format!("dataset has {actual} column(s)"))
    } else {
        CheckOutcome::failure(format!(
            "dataset has {actual} column(s), expected {expected}"
        ))
    };
    outcome
        .with_detail("column_count", actual)
        .with_detail("columns", names)
}
