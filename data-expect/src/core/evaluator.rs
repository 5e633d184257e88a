//! Expectation evaluation.
//!
//! [`evaluate`] runs an ordered list of expectations against a dataset and
//! folds the outcomes into a [`ValidationResult`]. Every kind is dispatched by
//! the single exhaustive `match` in [`check`]; the check logic itself lives in
//! [`constraints`](crate::constraints).
//!
//! # Example
//!
//! ```rust
//! use data_expect::core::{evaluate, EvaluationOptions, Expectation};
//! use data_expect::data::{Dataset, Record};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new().with("age", 25).with("name", "Alice"),
//!     Record::new().with("age", 30).with("name", "Bob"),
//! ]);
//!
//! let expectations = vec![
//!     Expectation::column_exists("age").unwrap(),
//!     Expectation::values_between("age", 0.0, 100.0).unwrap(),
//! ];
//!
//! let result = evaluate(&dataset, &expectations, &EvaluationOptions::default()).unwrap();
//! assert!(result.success());
//! assert_eq!(result.expectations_met(), 2);
//! ```

use super::{Bounds, Expectation, ExpectationResult, ValidationResult};
use crate::constraints;
use crate::data::Dataset;
use crate::error::{ExpectError, Result};
use crate::logging::{truncate_field, LogConfig};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Options for a single evaluation.
#[derive(Debug, Clone, Default)]
pub struct EvaluationOptions {
    /// Stop after the first failing expectation. The result then describes
    /// only the expectations that were evaluated.
    pub short_circuit: bool,
    /// Logging behaviour for this evaluation
    pub log: LogConfig,
}

impl EvaluationOptions {
    /// Options that stop at the first failure.
    pub fn short_circuit() -> Self {
        Self {
            short_circuit: true,
            ..Self::default()
        }
    }

    pub fn with_short_circuit(mut self, enabled: bool) -> Self {
        self.short_circuit = enabled;
        self
    }

    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

/// Evaluates one expectation.
///
/// Pure and total: data-shape problems become a failed result, never an
/// error.
pub fn check(dataset: &Dataset, expectation: &Expectation) -> ExpectationResult {
    let outcome = match expectation {
        Expectation::ColumnExists { column } => constraints::column_exists(dataset, column),
        Expectation::ColumnType { column, expected } => {
            constraints::column_type(dataset, column, *expected)
        }
        Expectation::ColumnCountEquals { count } => {
            constraints::column_count_equals(dataset, *count)
        }
        Expectation::ValuesBetween { column, min, max } => {
            constraints::values_between(dataset, column, bounds(*min, *max))
        }
        Expectation::ValuesNotNull { column } => constraints::values_not_null(dataset, column),
        Expectation::ValuesUnique { column } => constraints::values_unique(dataset, column),
        Expectation::MeanBetween { column, min, max } => {
            constraints::mean_between(dataset, column, bounds(*min, *max))
        }
        Expectation::StdevBetween { column, min, max } => {
            constraints::stdev_between(dataset, column, bounds(*min, *max))
        }
        Expectation::RowCountBetween { min, max } => {
            constraints::row_count_between(dataset, *min, *max)
        }
        Expectation::LabelBalance { column, min_ratio } => {
            constraints::label_balance(dataset, column, *min_ratio)
        }
        Expectation::ValidEmails { column } => constraints::valid_emails(dataset, column),
        Expectation::ValidUrls { column, schemes } => {
            constraints::valid_urls(dataset, column, schemes)
        }
        Expectation::ValidTimestamps { column } => constraints::valid_timestamps(dataset, column),
        Expectation::TimestampsChronological { column } => {
            constraints::timestamps_chronological(dataset, column)
        }
        Expectation::CorrelationBetween {
            column_a,
            column_b,
            method,
            min,
            max,
        } => constraints::correlation_between(
            dataset,
            column_a,
            column_b,
            *method,
            bounds(*min, *max),
        ),
    };
    outcome.into_result(expectation.clone())
}

// Unchecked for expectations built by hand; `contains` then fails closed.
fn bounds(min: f64, max: f64) -> Bounds {
    Bounds { min, max }
}

/// Normalizes and validates every expectation before any of them runs.
///
/// Expectations built through the enum variants or a plain `Deserialize`
/// skip the constructors, so they are checked again here.
fn prepare(expectations: &[Expectation]) -> Result<Vec<Expectation>> {
    if expectations.is_empty() {
        return Err(ExpectError::NoExpectations);
    }
    expectations.iter().cloned().map(Expectation::checked).collect()
}

/// Evaluates `expectations` in order against `dataset`.
///
/// # Errors
///
/// Returns [`ExpectError::NoExpectations`] when `expectations` is empty and
/// [`ExpectError::InvalidExpectation`] when one has invalid parameters, in
/// both cases before anything is evaluated.
pub fn evaluate(
    dataset: &Dataset,
    expectations: &[Expectation],
    options: &EvaluationOptions,
) -> Result<ValidationResult> {
    Evaluator::new(options.clone()).evaluate(dataset, expectations)
}

/// Runs expectations with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvaluationOptions,
}

impl Evaluator {
    pub fn new(options: EvaluationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    /// Sequential evaluation in input order.
    #[instrument(skip_all, fields(
        evaluation.expectations = expectations.len(),
        evaluation.rows = dataset.len(),
        evaluation.short_circuit = self.options.short_circuit
    ))]
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        expectations: &[Expectation],
    ) -> Result<ValidationResult> {
        let expectations = prepare(expectations)?;
        let start = Instant::now();

        let mut results = Vec::with_capacity(expectations.len());
        for expectation in &expectations {
            let check_start = Instant::now();
            let result = check(dataset, expectation);
            crate::perf_debug!(
                self.options.log,
                expectation.kind = expectation.kind_name(),
                elapsed_us = check_start.elapsed().as_micros() as u64,
                "Expectation checked"
            );
            self.log_result(&result);
            let failed = !result.success();
            results.push(result);
            if failed && self.options.short_circuit {
                break;
            }
        }

        let summary = ValidationResult::from_results(results);
        self.log_summary(&summary, expectations.len(), start);
        Ok(summary)
    }

    /// Evaluates every expectation on the blocking thread pool and reassembles
    /// the results in input order.
    ///
    /// With short-circuit enabled all expectations still run, but the result
    /// is truncated after the first failure so it equals the sequential one.
    ///
    /// # Errors
    ///
    /// [`ExpectError::NoExpectations`] for an empty list, and
    /// [`ExpectError::Internal`] if a blocking task panics.
    #[instrument(skip_all, fields(
        evaluation.expectations = expectations.len(),
        evaluation.rows = dataset.len(),
        evaluation.short_circuit = self.options.short_circuit
    ))]
    pub async fn evaluate_concurrent(
        &self,
        dataset: Arc<Dataset>,
        expectations: &[Expectation],
    ) -> Result<ValidationResult> {
        let expectations = prepare(expectations)?;
        let start = Instant::now();

        let tasks = expectations.iter().cloned().map(|expectation| {
            let dataset = Arc::clone(&dataset);
            tokio::task::spawn_blocking(move || check(&dataset, &expectation))
        });

        let mut results = futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|joined| {
                joined.map_err(|e| ExpectError::Internal(format!("evaluation task failed: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        if self.options.short_circuit {
            if let Some(first_failure) = results.iter().position(|r| !r.success()) {
                results.truncate(first_failure + 1);
            }
        }
        for result in &results {
            self.log_result(result);
        }

        let summary = ValidationResult::from_results(results);
        self.log_summary(&summary, expectations.len(), start);
        Ok(summary)
    }

    fn log_result(&self, result: &ExpectationResult) {
        let config = &self.options.log;
        let expectation = result.expectation();
        if result.success() {
            crate::log_expectation!(
                config,
                expectation.kind = expectation.kind_name(),
                expectation.columns = ?expectation.columns(),
                result.message = %truncate_field(result.message(), config.max_field_length),
                "Expectation met"
            );
        } else {
            warn!(
                expectation.kind = expectation.kind_name(),
                expectation.columns = ?expectation.columns(),
                result.message = %truncate_field(result.message(), config.max_field_length),
                "Expectation failed"
            );
            crate::log_expectation!(
                config,
                expectation.kind = expectation.kind_name(),
                result.details = ?result.details(),
                "Failure details"
            );
        }
    }

    fn log_summary(&self, summary: &ValidationResult, supplied: usize, start: Instant) {
        if !self.options.log.log_summary {
            return;
        }
        info!(
            evaluation.supplied = supplied,
            evaluation.total = summary.total_expectations(),
            evaluation.met = summary.expectations_met(),
            evaluation.failed = summary.expectations_failed(),
            evaluation.success_rate = %format!("{:.2}%", summary.success_rate() * 100.0),
            evaluation.duration_ms = start.elapsed().as_millis() as u64,
            evaluation.result = if summary.success() { "passed" } else { "failed" },
            "Evaluation completed"
        );
    }
}
