//! Dataset profiling.
//!
//! The profiler makes one pass over the records per column and reports, for
//! every column observed anywhere in the dataset:
//!
//! - null count (explicit nulls and missing keys)
//! - distinct non-null count
//! - inferred type (see [`inference`](super::inference))
//! - min/max in the natural order of the inferred type
//! - mean and sample standard deviation for numeric columns
//!
//! # Example
//!
//! ```rust
//! use data_expect::analyzers::profiler::profile;
//! use data_expect::data::{Dataset, Record, ValueType};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new().with("age", 25).with("name", "Alice"),
//!     Record::new().with("age", 30).with("name", "Bob"),
//!     Record::new().with("age", 35).with("name", "Charlie"),
//! ]);
//!
//! let profile = profile(&dataset);
//! assert_eq!(profile.row_count, 3);
//! assert_eq!(profile.column_count, 2);
//! assert_eq!(profile.columns["age"].inferred_type, ValueType::Integer);
//! assert_eq!(profile.columns["age"].mean, Some(30.0));
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, instrument};

use super::correlation::{correlation_matrix_with, CorrelationMethod};
use super::inference::TypeTally;
use super::profile_types::{ColumnProfile, DatasetProfile};
use super::statistics;
use crate::data::{Dataset, Value, ValueType};

/// Configuration for the profiler.
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfig {
    /// Attach a correlation matrix over numeric columns to the profile
    pub compute_correlations: bool,
    /// Method used when correlations are computed
    pub correlation_method: CorrelationMethod,
}

/// Builder for [`Profiler`].
#[derive(Debug, Default)]
pub struct ProfilerBuilder {
    config: ProfilerConfig,
}

impl ProfilerBuilder {
    /// Enable or disable the correlation matrix.
    pub fn compute_correlations(mut self, enable: bool) -> Self {
        self.config.compute_correlations = enable;
        self
    }

    /// Set the correlation method.
    pub fn correlation_method(mut self, method: CorrelationMethod) -> Self {
        self.config.correlation_method = method;
        self
    }

    pub fn build(self) -> Profiler {
        Profiler {
            config: self.config,
        }
    }
}

/// Computes [`DatasetProfile`]s.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles every column of the dataset.
    #[instrument(skip_all, fields(rows = dataset.len(), correlations = self.config.compute_correlations))]
    pub fn profile(&self, dataset: &Dataset) -> DatasetProfile {
        let columns: BTreeMap<String, ColumnProfile> = dataset
            .columns()
            .into_iter()
            .map(|column| (column.to_string(), profile_column(dataset, column)))
            .collect();

        let correlations = if self.config.compute_correlations {
            let numeric: Vec<&str> = columns
                .iter()
                .filter(|(_, p)| p.inferred_type.is_numeric())
                .map(|(name, _)| name.as_str())
                .collect();
            Some(correlation_matrix_with(
                dataset,
                &numeric,
                self.config.correlation_method,
            ))
        } else {
            None
        };

        info!(
            profile.rows = dataset.len(),
            profile.columns = columns.len(),
            "Dataset profiled"
        );

        DatasetProfile {
            row_count: dataset.len(),
            column_count: columns.len(),
            columns,
            correlations,
        }
    }
}

/// Profiles a dataset with the default configuration.
pub fn profile(dataset: &Dataset) -> DatasetProfile {
    Profiler::default().profile(dataset)
}

/// Profiles a single column. Columns absent from every record profile as
/// all-null.
pub fn profile_column(dataset: &Dataset, column: &str) -> ColumnProfile {
    let mut null_count = 0;
    let mut distinct: HashSet<&Value> = HashSet::new();
    let mut tally = TypeTally::new();
    let mut numbers = Vec::new();

    for value in dataset.column_values(column) {
        match value {
            None => null_count += 1,
            Some(value) => {
                distinct.insert(value);
                tally.observe(value);
                if let Some(x) = value.as_f64() {
                    numbers.push(x);
                }
            }
        }
    }

    let inferred_type = tally.inferred();
    let (min, max) = extremes(dataset.column_values(column).flatten(), inferred_type);
    let (mean, stdev) = if inferred_type.is_numeric() {
        (statistics::mean(&numbers), statistics::stdev(&numbers))
    } else {
        (None, None)
    };

    debug!(
        column = %column,
        inferred_type = %inferred_type,
        null_count,
        unique_count = distinct.len(),
        "Column profiled"
    );

    ColumnProfile {
        inferred_type,
        null_count,
        unique_count: distinct.len(),
        min,
        max,
        mean,
        stdev,
    }
}

/// Min and max among values that belong to `inferred_type`.
fn extremes<'a>(
    values: impl Iterator<Item = &'a Value>,
    inferred_type: ValueType,
) -> (Option<Value>, Option<Value>) {
    let accepts = |v: &Value| match inferred_type {
        ValueType::List | ValueType::Null => false,
        t if t.is_numeric() => v.is_numeric(),
        t => v.value_type() == t,
    };

    let mut min: Option<&Value> = None;
    let mut max: Option<&Value> = None;
    // NaN is not comparable, even with itself
    for value in values.filter(|v| accepts(v) && v.compare(v).is_some()) {
        if min.map_or(true, |m| value.compare(m) == Some(Ordering::Less)) {
            min = Some(value);
        }
        if max.map_or(true, |m| value.compare(m) == Some(Ordering::Greater)) {
            max = Some(value);
        }
    }
    (min.cloned(), max.cloned())
}
