//! Row count checks.

use super::CheckOutcome;
use crate::data::Dataset;
use tracing::debug;

/// Passes when the number of records lies in `[min, max]`.
pub fn row_count_between(dataset: &Dataset, min: usize, max: usize) -> CheckOutcome {
    let row_count = dataset.len();
    let success = (min..=max).contains(&row_count);

    debug!(
        result.row_count = row_count,
        result.status = if success { "success" } else { "failure" },
        "Row count checked"
    );

    let message = if success {
        format!("row count {row_count} is between {min} and {max}")
    } else {
        format!("row count {row_count} is not between {min} and {max}")
    };
    CheckOutcome::new(success, message).with_detail("row_count", row_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn rows(n: usize) -> Dataset {
        (0..n).map(|i| Record::new().with("id", i as i64)).collect()
    }

    #[test]
    fn test_within_bounds() {
        let outcome = row_count_between(&rows(5), 1, 10);
        assert!(outcome.is_success());
        assert_eq!(outcome.details()["row_count"], 5);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(row_count_between(&rows(1), 1, 3).is_success());
        assert!(row_count_between(&rows(3), 1, 3).is_success());
        assert!(!row_count_between(&rows(4), 1, 3).is_success());
    }

    #[test]
    fn test_empty_dataset() {
        assert!(row_count_between(&Dataset::default(), 0, 0).is_success());

        let outcome = row_count_between(&Dataset::default(), 1, 10);
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "row count 0 is not between 1 and 10");
    }
}
