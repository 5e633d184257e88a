//! Presence and null checks.

use super::{missing_column, percent, CheckOutcome};
use crate::data::Dataset;
use tracing::debug;

/// Passes when every record carries the `column` key.
///
/// An explicit null still counts as present. An empty dataset fails, since
/// there is no record to carry the column.
pub fn column_exists(dataset: &Dataset, column: &str) -> CheckOutcome {
    if dataset.is_empty() {
        return CheckOutcome::failure(format!(
            "column '{column}' not found in dataset: dataset is empty"
        ))
        .with_detail("column", column);
    }

    let missing: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.contains(column))
        .map(|(i, _)| i)
        .collect();

    if missing.is_empty() {
        return CheckOutcome::success(format!("column '{column}' exists in all records"));
    }

    let message = if missing.len() == dataset.len() {
        format!("column '{column}' not found in dataset")
    } else {
        format!(
            "column '{column}' missing from {} of {} record(s)",
            missing.len(),
            dataset.len()
        )
    };
    CheckOutcome::failure(message)
        .with_detail("column", column)
        .with_detail("missing_count", missing.len())
        .with_rows("missing_rows", &missing)
}

/// Passes when no record has a null or missing value for `column`.
pub fn values_not_null(dataset: &Dataset, column: &str) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let nulls: Vec<usize> = dataset
        .column_values(column)
        .enumerate()
        .filter(|(_, v)| v.is_none())
        .map(|(i, _)| i)
        .collect();

    debug!(
        column = %column,
        null_count = nulls.len(),
        total = dataset.len(),
        "Null values counted"
    );

    if nulls.is_empty() {
        CheckOutcome::success(format!("no null values in '{column}'"))
            .with_detail("null_count", 0)
    } else {
        CheckOutcome::failure(format!(
            "{} null value(s) in '{column}' ({} of rows)",
            nulls.len(),
            percent(nulls.len(), dataset.len())
        ))
        .with_detail("null_count", nulls.len())
        .with_rows("null_rows", &nulls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Value};

    fn people() -> Dataset {
        Dataset::new(vec![
            Record::new().with("age", 25).with("name", "Alice"),
            Record::new().with("age", 30).with("name", "Bob"),
        ])
    }

    #[test]
    fn test_column_exists_in_all_records() {
        assert!(column_exists(&people(), "age").is_success());
    }

    #[test]
    fn test_column_exists_requires_every_record() {
        let dataset = Dataset::new(vec![
            Record::new().with("age", 25),
            Record::new().with("name", "Bob"),
            Record::new().with("age", Value::Null),
        ]);
        let outcome = column_exists(&dataset, "age");
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "column 'age' missing from 1 of 3 record(s)");
        assert_eq!(outcome.details()["missing_rows"], serde_json::json!([1]));
    }

    #[test]
    fn test_column_exists_unknown_and_empty() {
        let outcome = column_exists(&people(), "salary");
        assert_eq!(outcome.message(), "column 'salary' not found in dataset");

        let outcome = column_exists(&Dataset::default(), "age");
        assert!(!outcome.is_success());
        assert!(outcome.message().contains("dataset is empty"));
    }

    #[test]
    fn test_values_not_null_counts_missing_keys() {
        let dataset = Dataset::new(vec![
            Record::new().with("email", "a@example.com"),
            Record::new().with("email", Value::Null),
            Record::new().with("name", "no email"),
            Record::new().with("email", "d@example.com"),
        ]);
        let outcome = values_not_null(&dataset, "email");
        assert!(!outcome.is_success());
        assert_eq!(outcome.details()["null_count"], 2);
        assert_eq!(outcome.details()["null_rows"], serde_json::json!([1, 2]));
        assert_eq!(outcome.message(), "2 null value(s) in 'email' (50% of rows)");
    }

    #[test]
    fn test_values_not_null_passes_and_missing_column() {
        assert!(values_not_null(&people(), "name").is_success());
        assert!(!values_not_null(&people(), "email").is_success());
        assert!(!values_not_null(&Dataset::default(), "email").is_success());
    }
}
