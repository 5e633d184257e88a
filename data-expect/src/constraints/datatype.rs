//! Declared type check.

use super::{missing_column, CheckOutcome};
use crate::data::{Dataset, ValueType};
use std::collections::BTreeMap;

/// Passes when every non-null value of `column` has the `expected` type.
///
/// [`ValueType::Numeric`] accepts integers and floats; every other declared
/// type matches exactly, so a float never satisfies `Integer`.
pub fn column_type(dataset: &Dataset, column: &str, expected: ValueType) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let mut mismatched = Vec::new();
    let mut observed: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (row, value) in dataset.non_null_values(column) {
        let actual = value.value_type();
        *observed.entry(actual.as_str()).or_default() += 1;
        if !expected.accepts(actual) {
            mismatched.push(row);
        }
    }

    let outcome = if mismatched.is_empty() {
        CheckOutcome::success(format!("all values of '{column}' are {expected}"))
    } else {
        CheckOutcome::failure(format!(
            "{} value(s) of '{column}' are not {expected}",
            mismatched.len()
        ))
        .with_detail("mismatched_count", mismatched.len())
        .with_rows("mismatched_rows", &mismatched)
    };

    let observed: serde_json::Map<String, serde_json::Value> = observed
        .into_iter()
        .map(|(t, n)| (t.to_string(), n.into()))
        .collect();
    outcome.with_detail("observed_types", observed)
}
