//! Profile data structures produced by the [`Profiler`](super::Profiler).

use super::correlation::CorrelationMatrix;
use crate::data::{Value, ValueType};
use serde::Serialize;
use std::collections::BTreeMap;

/// Descriptive statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub inferred_type: ValueType,
    /// Records where the column is null or missing
    pub null_count: usize,
    /// Distinct non-null values
    pub unique_count: usize,
    pub min: Option<Value>,
    pub max: Option<Value>,
    /// Only populated for numeric columns
    pub mean: Option<f64>,
    /// Sample standard deviation, only populated for numeric columns
    pub stdev: Option<f64>,
}

impl ColumnProfile {
    /// Fraction of records where the column is null or missing.
    pub fn null_ratio(&self, row_count: usize) -> f64 {
        if row_count == 0 {
            0.0
        } else {
            self.null_count as f64 / row_count as f64
        }
    }
}

/// Dataset-level summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    /// Number of distinct column names across all records
    pub column_count: usize,
    pub columns: BTreeMap<String, ColumnProfile>,
    /// Correlations between numeric columns, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<CorrelationMatrix>,
}

impl DatasetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.get(name)
    }

    /// Names of columns whose inferred type is numeric.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, p)| p.inferred_type.is_numeric())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
