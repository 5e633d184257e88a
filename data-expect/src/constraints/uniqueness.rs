//! Uniqueness check.

use super::{missing_column, CheckOutcome};
use crate::data::{Dataset, Value};
use std::collections::HashSet;

/// Passes when no two records share the same non-null value of `column`.
///
/// Value equality is type-aware: `Integer(1)` and `Float(1.0)` are distinct.
/// Nulls and missing keys never collide.
pub fn values_unique(dataset: &Dataset, column: &str) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let mut seen: HashSet<&Value> = HashSet::new();
    let mut duplicate_rows = Vec::new();
    let mut duplicated: Vec<&Value> = Vec::new();

    for (row, value) in dataset.non_null_values(column) {
        if !seen.insert(value) {
            if !duplicated.contains(&value) {
                duplicated.push(value);
            }
            duplicate_rows.push(row);
        }
    }

    if duplicate_rows.is_empty() {
        return CheckOutcome::success(format!(
            "all {} non-null value(s) of '{column}' are unique",
            seen.len()
        ));
    }

    let samples: Vec<serde_json::Value> = duplicated
        .iter()
        .take(10)
        .map(|v| v.to_json())
        .collect();
    CheckOutcome::failure(format!(
        "{} duplicate value(s) in '{column}' across {} distinct value(s)",
        duplicate_rows.len(),
        duplicated.len()
    ))
    .with_detail("duplicate_count", duplicate_rows.len())
    .with_detail("duplicated_values", samples)
    .with_rows("duplicate_rows", &duplicate_rows)
}
