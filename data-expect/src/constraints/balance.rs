//! Label balance check.

use super::{missing_column, CheckOutcome};
use crate::data::{Dataset, Value};
use std::collections::HashMap;

/// Passes when every distinct non-null label of `column` accounts for at
/// least `min_ratio` of all rows.
///
/// The denominator is the full row count, so rows with a null or missing
/// label lower every label's share without forming a label of their own.
///
/// # Examples
///
/// ```rust
/// use data_expect::constraints::label_balance;
/// use data_expect::data::{Dataset, Record};
///
/// let dataset: Dataset = ["cat", "dog", "cat", "bird"]
///     .into_iter()
///     .map(|label| Record::new().with("label", label))
///     .collect();
///
/// assert!(label_balance(&dataset, "label", 0.25).is_success());
/// assert!(!label_balance(&dataset, "label", 0.3).is_success());
/// ```
pub fn label_balance(dataset: &Dataset, column: &str, min_ratio: f64) -> CheckOutcome {
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    // labels in first-seen order
    let mut index: HashMap<&Value, usize> = HashMap::new();
    let mut counts: Vec<(&Value, usize)> = Vec::new();
    for (_, label) in dataset.non_null_values(column) {
        match index.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }

    let row_count = dataset.len() as f64;
    let ratios: Vec<(&Value, f64)> = counts
        .iter()
        .map(|(label, count)| (*label, *count as f64 / row_count))
        .collect();

    // a list, not a map: labels of different types may render alike
    let ratio_entries: Vec<serde_json::Value> = ratios
        .iter()
        .map(|(label, ratio)| serde_json::json!({"label": label.to_json(), "ratio": ratio}))
        .collect();

    if ratios.is_empty() {
        return CheckOutcome::failure(format!("'{column}' has no non-null labels"))
            .with_detail("label_count", 0);
    }

    let underrepresented: Vec<String> = ratios
        .iter()
        .filter(|(_, ratio)| *ratio < min_ratio)
        .map(|(label, _)| label.to_string())
        .collect();

    let outcome = if underrepresented.is_empty() {
        CheckOutcome::success(format!(
            "all {} label(s) of '{column}' cover at least {min_ratio} of rows",
            ratios.len()
        ))
    } else {
        CheckOutcome::failure(format!(
            "{} of {} label(s) of '{column}' fall below {min_ratio} of rows: {}",
            underrepresented.len(),
            ratios.len(),
            underrepresented.join(", ")
        ))
        .with_detail("underrepresented", underrepresented)
    };

    outcome
        .with_detail("label_count", ratios.len())
        .with_detail("ratios", ratio_entries)
}
