//! The expectation model.
//!
//! An [`Expectation`] is an immutable, declarative check against a dataset.
//! The set of kinds is closed: every kind is a variant of one enum, so adding a
//! kind makes the compiler flag every dispatch site that does not handle it.
//!
//! Expectations are built through validating constructors, one per kind, which
//! reject malformed parameters before any data is seen:
//!
//! ```rust
//! use data_expect::core::Expectation;
//!
//! let age = Expectation::values_between("age", 0.0, 120.0).unwrap();
//! assert_eq!(age.kind_name(), "values_between");
//! assert_eq!(age.to_string(), "values of 'age' between 0 and 120");
//!
//! assert!(Expectation::values_between("age", 10.0, 1.0).is_err());
//! assert!(Expectation::column_exists("  ").is_err());
//! ```
//!
//! Lists of expectations can also be loaded from JSON, tagged by `kind`:
//!
//! ```rust
//! use data_expect::core::Expectation;
//!
//! let json = serde_json::json!([
//!     {"kind": "column_exists", "column": "id"},
//!     {"kind": "row_count_between", "min": 1, "max": 1000}
//! ]);
//! let expectations = Expectation::list_from_json(&json).unwrap();
//! assert_eq!(expectations.len(), 2);
//! ```

use super::Bounds;
use crate::analyzers::CorrelationMethod;
use crate::data::{normalize_column, ValueType};
use crate::error::{ExpectError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

fn default_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

/// A declarative check against a dataset.
///
/// Serialized with an internal `kind` tag in snake_case, e.g.
/// `{"kind": "values_not_null", "column": "email"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// The column key is present in every record.
    ColumnExists { column: String },
    /// Every non-null value has the declared type.
    ColumnType {
        column: String,
        #[serde(rename = "type")]
        expected: ValueType,
    },
    /// The number of distinct columns across the dataset.
    ColumnCountEquals { count: usize },
    /// Non-null values are numeric and within the inclusive range.
    ValuesBetween { column: String, min: f64, max: f64 },
    /// No record has a null or missing value.
    ValuesNotNull { column: String },
    /// No two records share a non-null value.
    ValuesUnique { column: String },
    MeanBetween { column: String, min: f64, max: f64 },
    /// Sample standard deviation within the inclusive range.
    StdevBetween { column: String, min: f64, max: f64 },
    RowCountBetween { min: usize, max: usize },
    /// Every distinct label makes up at least `min_ratio` of all rows.
    LabelBalance { column: String, min_ratio: f64 },
    ValidEmails { column: String },
    /// Every non-null value is a URL whose scheme is in `schemes`.
    ValidUrls {
        column: String,
        #[serde(default = "default_schemes")]
        schemes: Vec<String>,
    },
    ValidTimestamps { column: String },
    /// Non-null timestamps are non-decreasing in record order.
    TimestampsChronological { column: String },
    /// Correlation over rows where both columns are numeric.
    CorrelationBetween {
        column_a: String,
        column_b: String,
        #[serde(default)]
        method: CorrelationMethod,
        min: f64,
        max: f64,
    },
}

impl Expectation {
    pub fn column_exists(column: impl Into<String>) -> Result<Self> {
        Self::ColumnExists {
            column: column.into(),
        }
        .checked()
    }

    /// Declares the type of every non-null value. `Numeric` accepts both
    /// integers and floats; `Null` cannot be declared.
    pub fn column_type(column: impl Into<String>, expected: ValueType) -> Result<Self> {
        Self::ColumnType {
            column: column.into(),
            expected,
        }
        .checked()
    }

    pub fn column_count_equals(count: usize) -> Result<Self> {
        Self::ColumnCountEquals { count }.checked()
    }

    pub fn values_between(column: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        Self::ValuesBetween {
            column: column.into(),
            min,
            max,
        }
        .checked()
    }

    pub fn values_not_null(column: impl Into<String>) -> Result<Self> {
        Self::ValuesNotNull {
            column: column.into(),
        }
        .checked()
    }

    pub fn values_unique(column: impl Into<String>) -> Result<Self> {
        Self::ValuesUnique {
            column: column.into(),
        }
        .checked()
    }

    pub fn mean_between(column: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        Self::MeanBetween {
            column: column.into(),
            min,
            max,
        }
        .checked()
    }

    pub fn stdev_between(column: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        Self::StdevBetween {
            column: column.into(),
            min,
            max,
        }
        .checked()
    }

    pub fn row_count_between(min: usize, max: usize) -> Result<Self> {
        Self::RowCountBetween { min, max }.checked()
    }

    pub fn label_balance(column: impl Into<String>, min_ratio: f64) -> Result<Self> {
        Self::LabelBalance {
            column: column.into(),
            min_ratio,
        }
        .checked()
    }

    pub fn valid_emails(column: impl Into<String>) -> Result<Self> {
        Self::ValidEmails {
            column: column.into(),
        }
        .checked()
    }

    /// URLs restricted to the given schemes, e.g. `["http", "https"]`.
    pub fn valid_urls<I, S>(column: impl Into<String>, schemes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ValidUrls {
            column: column.into(),
            schemes: schemes.into_iter().map(Into::into).collect(),
        }
        .checked()
    }

    pub fn valid_timestamps(column: impl Into<String>) -> Result<Self> {
        Self::ValidTimestamps {
            column: column.into(),
        }
        .checked()
    }

    pub fn timestamps_chronological(column: impl Into<String>) -> Result<Self> {
        Self::TimestampsChronological {
            column: column.into(),
        }
        .checked()
    }

    /// Bounds must lie within `[-1, 1]` and the columns must differ.
    pub fn correlation_between(
        column_a: impl Into<String>,
        column_b: impl Into<String>,
        method: CorrelationMethod,
        min: f64,
        max: f64,
    ) -> Result<Self> {
        Self::CorrelationBetween {
            column_a: column_a.into(),
            column_b: column_b.into(),
            method,
            min,
            max,
        }
        .checked()
    }

    /// Loads and validates a JSON array of expectations.
    ///
    /// Column names are normalized the same way the constructors normalize
    /// them, and every entry is validated before the list is returned.
    pub fn list_from_json(json: &serde_json::Value) -> Result<Vec<Self>> {
        let raw: Vec<Expectation> = serde_json::from_value(json.clone())?;
        raw.into_iter().map(Expectation::checked).collect()
    }

    /// Returns the snake_case name of this kind, as used in the `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ColumnExists { .. } => "column_exists",
            Self::ColumnType { .. } => "column_type",
            Self::ColumnCountEquals { .. } => "column_count_equals",
            Self::ValuesBetween { .. } => "values_between",
            Self::ValuesNotNull { .. } => "values_not_null",
            Self::ValuesUnique { .. } => "values_unique",
            Self::MeanBetween { .. } => "mean_between",
            Self::StdevBetween { .. } => "stdev_between",
            Self::RowCountBetween { .. } => "row_count_between",
            Self::LabelBalance { .. } => "label_balance",
            Self::ValidEmails { .. } => "valid_emails",
            Self::ValidUrls { .. } => "valid_urls",
            Self::ValidTimestamps { .. } => "valid_timestamps",
            Self::TimestampsChronological { .. } => "timestamps_chronological",
            Self::CorrelationBetween { .. } => "correlation_between",
        }
    }

    /// Columns this expectation reads. Empty for dataset-level kinds.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::ColumnCountEquals { .. } | Self::RowCountBetween { .. } => Vec::new(),
            Self::CorrelationBetween {
                column_a, column_b, ..
            } => vec![column_a.as_str(), column_b.as_str()],
            Self::ColumnExists { column }
            | Self::ColumnType { column, .. }
            | Self::ValuesBetween { column, .. }
            | Self::ValuesNotNull { column }
            | Self::ValuesUnique { column }
            | Self::MeanBetween { column, .. }
            | Self::StdevBetween { column, .. }
            | Self::LabelBalance { column, .. }
            | Self::ValidEmails { column }
            | Self::ValidUrls { column, .. }
            | Self::ValidTimestamps { column }
            | Self::TimestampsChronological { column } => vec![column.as_str()],
        }
    }

    /// The inclusive float bounds of range kinds.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::ValuesBetween { min, max, .. }
            | Self::MeanBetween { min, max, .. }
            | Self::StdevBetween { min, max, .. }
            | Self::CorrelationBetween { min, max, .. } => Some(Bounds {
                min: *min,
                max: *max,
            }),
            _ => None,
        }
    }

    /// Returns a human-readable description of the expectation.
    pub fn description(&self) -> String {
        match self {
            Self::ColumnExists { column } => format!("column '{column}' exists"),
            Self::ColumnType { column, expected } => {
                format!("values of '{column}' have type {expected}")
            }
            Self::ColumnCountEquals { count } => format!("dataset has {count} column(s)"),
            Self::ValuesBetween { column, min, max } => {
                format!("values of '{column}' between {min} and {max}")
            }
            Self::ValuesNotNull { column } => format!("values of '{column}' are not null"),
            Self::ValuesUnique { column } => format!("values of '{column}' are unique"),
            Self::MeanBetween { column, min, max } => {
                format!("mean of '{column}' between {min} and {max}")
            }
            Self::StdevBetween { column, min, max } => {
                format!("standard deviation of '{column}' between {min} and {max}")
            }
            Self::RowCountBetween { min, max } => format!("row count between {min} and {max}"),
            Self::LabelBalance { column, min_ratio } => {
                format!("every label of '{column}' covers at least {min_ratio} of rows")
            }
            Self::ValidEmails { column } => format!("values of '{column}' are valid emails"),
            Self::ValidUrls { column, schemes } => format!(
                "values of '{column}' are valid URLs ({})",
                schemes.join(", ")
            ),
            Self::ValidTimestamps { column } => {
                format!("values of '{column}' are valid timestamps")
            }
            Self::TimestampsChronological { column } => {
                format!("timestamps in '{column}' are chronological")
            }
            Self::CorrelationBetween {
                column_a,
                column_b,
                method,
                min,
                max,
            } => format!(
                "{method} correlation of '{column_a}' and '{column_b}' between {min} and {max}"
            ),
        }
    }

    /// Checks the parameters of an already-built expectation.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind_name();
        let invalid = |message: String| ExpectError::invalid_expectation(kind, message);

        for column in self.columns() {
            if column.trim().is_empty() {
                return Err(invalid("column name must not be empty".to_string()));
            }
        }

        match self {
            Self::ValuesBetween { min, max, .. }
            | Self::MeanBetween { min, max, .. }
            | Self::StdevBetween { min, max, .. } => {
                Bounds::new(*min, *max).map_err(invalid)?;
            }
            Self::CorrelationBetween {
                column_a,
                column_b,
                min,
                max,
                ..
            } => {
                Bounds::within(*min, *max, -1.0, 1.0).map_err(invalid)?;
                if column_a == column_b {
                    return Err(invalid(format!(
                        "columns must differ, got '{column_a}' twice"
                    )));
                }
            }
            Self::RowCountBetween { min, max } if min > max => {
                return Err(invalid(format!("min ({min}) must be <= max ({max})")));
            }
            Self::LabelBalance { min_ratio, .. } if !(0.0..=1.0).contains(min_ratio) => {
                return Err(invalid(format!(
                    "min_ratio must be within [0, 1], got {min_ratio}"
                )));
            }
            Self::ColumnType {
                expected: ValueType::Null,
                ..
            } => {
                return Err(invalid("null is not a declarable column type".to_string()));
            }
            Self::ValidUrls { schemes, .. } => {
                if schemes.is_empty() {
                    return Err(invalid("at least one URL scheme is required".to_string()));
                }
                if let Some(bad) = schemes
                    .iter()
                    .find(|s| s.is_empty() || s.to_lowercase() != **s)
                {
                    return Err(invalid(format!(
                        "URL schemes must be non-empty and lowercase, got '{bad}'"
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Normalizes column names and validates.
    pub(crate) fn checked(mut self) -> Result<Self> {
        match &mut self {
            Self::ColumnCountEquals { .. } | Self::RowCountBetween { .. } => {}
            Self::CorrelationBetween {
                column_a, column_b, ..
            } => {
                *column_a = normalize_column(column_a);
                *column_b = normalize_column(column_b);
            }
            Self::ColumnExists { column }
            | Self::ColumnType { column, .. }
            | Self::ValuesBetween { column, .. }
            | Self::ValuesNotNull { column }
            | Self::ValuesUnique { column }
            | Self::MeanBetween { column, .. }
            | Self::StdevBetween { column, .. }
            | Self::LabelBalance { column, .. }
            | Self::ValidEmails { column }
            | Self::ValidUrls { column, .. }
            | Self::ValidTimestamps { column }
            | Self::TimestampsChronological { column } => {
                *column = normalize_column(column);
            }
        }
        self.validate()?;
        Ok(self)
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Deserializes a list of expectations, normalizing and validating each one.
///
/// For use with `#[serde(deserialize_with = "...")]` on configuration structs.
pub fn deserialize_expectations<'de, D>(deserializer: D) -> std::result::Result<Vec<Expectation>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Expectation>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|e| e.checked().map_err(serde::de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_normalize_columns() {
        let e = Expectation::column_exists(":age").unwrap();
        assert_eq!(e.columns(), vec!["age"]);

        let e = Expectation::values_not_null("  email ").unwrap();
        assert_eq!(e.columns(), vec!["email"]);
    }

    #[test]
    fn test_empty_column_rejected() {
        let err = Expectation::values_unique("").unwrap_err();
        assert!(matches!(
            err,
            ExpectError::InvalidExpectation { ref kind, .. } if kind == "values_unique"
        ));
        assert!(Expectation::column_exists(":").is_err());
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Expectation::values_between("x", 0.0, 100.0).is_ok());
        assert!(Expectation::values_between("x", 5.0, 5.0).is_ok());
        assert!(Expectation::values_between("x", 100.0, 0.0).is_err());
        assert!(Expectation::mean_between("x", f64::NAN, 1.0).is_err());
        assert!(Expectation::stdev_between("x", 0.0, f64::INFINITY).is_err());
        assert!(Expectation::row_count_between(10, 1).is_err());
        assert!(Expectation::row_count_between(0, 0).is_ok());
    }

    #[test]
    fn test_label_balance_ratio_domain() {
        assert!(Expectation::label_balance("label", 0.0).is_ok());
        assert!(Expectation::label_balance("label", 1.0).is_ok());
        assert!(Expectation::label_balance("label", 1.5).is_err());
        assert!(Expectation::label_balance("label", -0.1).is_err());
        assert!(Expectation::label_balance("label", f64::NAN).is_err());
    }

    #[test]
    fn test_url_schemes() {
        assert!(Expectation::valid_urls("site", ["http", "https"]).is_ok());
        assert!(Expectation::valid_urls("site", Vec::<String>::new()).is_err());
        assert!(Expectation::valid_urls("site", ["HTTP"]).is_err());
        assert!(Expectation::valid_urls("site", [""]).is_err());
    }

    #[test]
    fn test_column_type_rejects_null() {
        assert!(Expectation::column_type("x", ValueType::Numeric).is_ok());
        assert!(Expectation::column_type("x", ValueType::Null).is_err());
    }

    #[test]
    fn test_correlation_validation() {
        let ok = Expectation::correlation_between("x", "y", CorrelationMethod::Pearson, 0.5, 1.0);
        assert!(ok.is_ok());
        assert!(
            Expectation::correlation_between("x", "y", CorrelationMethod::Pearson, 0.5, 1.5)
                .is_err()
        );
        assert!(
            Expectation::correlation_between("x", ":x", CorrelationMethod::Spearman, 0.0, 1.0)
                .is_err()
        );
    }

    #[test]
    fn test_kind_names_match_serde_tags() {
        let expectations = vec![
            Expectation::column_exists("a").unwrap(),
            Expectation::column_count_equals(3).unwrap(),
            Expectation::label_balance("a", 0.1).unwrap(),
            Expectation::timestamps_chronological("a").unwrap(),
            Expectation::correlation_between("a", "b", CorrelationMethod::Spearman, -1.0, 1.0)
                .unwrap(),
        ];
        for expectation in expectations {
            let json = serde_json::to_value(&expectation).unwrap();
            assert_eq!(json["kind"], expectation.kind_name());
        }
    }

    #[test]
    fn test_list_from_json() {
        let json = serde_json::json!([
            {"kind": "column_type", "column": ":age", "type": "integer"},
            {"kind": "valid_urls", "column": "homepage"},
            {"kind": "correlation_between", "column_a": "x", "column_b": "y", "min": 0.0, "max": 1.0}
        ]);
        let expectations = Expectation::list_from_json(&json).unwrap();
        assert_eq!(
            expectations[0],
            Expectation::column_type("age", ValueType::Integer).unwrap()
        );
        assert_eq!(
            expectations[1],
            Expectation::valid_urls("homepage", ["http", "https"]).unwrap()
        );
        assert!(matches!(
            expectations[2],
            Expectation::CorrelationBetween {
                method: CorrelationMethod::Pearson,
                ..
            }
        ));
    }

    #[test]
    fn test_list_from_json_rejects_invalid() {
        let json = serde_json::json!([{"kind": "values_between", "column": "x", "min": 5, "max": 1}]);
        let err = Expectation::list_from_json(&json).unwrap_err();
        assert!(err.is_configuration());

        let json = serde_json::json!([{"kind": "no_such_kind"}]);
        let err = Expectation::list_from_json(&json).unwrap_err();
        assert!(matches!(err, ExpectError::Serialization(_)));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            Expectation::column_exists("age").unwrap().to_string(),
            "column 'age' exists"
        );
        assert_eq!(
            Expectation::row_count_between(1, 10).unwrap().description(),
            "row count between 1 and 10"
        );
        assert_eq!(
            Expectation::correlation_between("x", "y", CorrelationMethod::Spearman, 0.8, 1.0)
                .unwrap()
                .description(),
            "Spearman correlation of 'x' and 'y' between 0.8 and 1"
        );
    }
}
