//! Named, reusable groups of expectations.

use super::{EvaluationOptions, Evaluator, Expectation, ValidationResult};
use crate::data::Dataset;
use crate::error::Result;
use crate::logging::LogConfig;
use std::sync::Arc;
use tracing::{info, instrument};

/// A named collection of expectations evaluated together.
///
/// # Examples
///
/// ```rust
/// use data_expect::core::{Expectation, ValidationSuite};
/// use data_expect::data::{Dataset, Record};
///
/// # fn example() -> data_expect::Result<()> {
/// let suite = ValidationSuite::builder("customers")
///     .description("Customer table quality")
///     .expectation(Expectation::values_not_null("id")?)
///     .expectation(Expectation::values_unique("id")?)
///     .expectation(Expectation::valid_emails("email")?)
///     .build();
///
/// let dataset = Dataset::new(vec![
///     Record::new().with("id", 1).with("email", "a@example.com"),
///     Record::new().with("id", 2).with("email", "b@example.com"),
/// ]);
///
/// let result = suite.run(&dataset)?;
/// assert!(result.success());
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ValidationSuite {
    name: String,
    description: Option<String>,
    expectations: Vec<Expectation>,
    evaluator: Evaluator,
}

impl ValidationSuite {
    pub fn builder(name: impl Into<String>) -> ValidationSuiteBuilder {
        ValidationSuiteBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    pub fn options(&self) -> &EvaluationOptions {
        self.evaluator.options()
    }

    /// Runs the suite sequentially.
    ///
    /// Fails with [`NoExpectations`](crate::ExpectError::NoExpectations) when
    /// the suite is empty.
    #[instrument(skip(self, dataset), fields(suite.name = %self.name, suite.expectations = self.expectations.len()))]
    pub fn run(&self, dataset: &Dataset) -> Result<ValidationResult> {
        info!(
            suite.name = %self.name,
            suite.description = ?self.description,
            "Starting validation suite"
        );
        self.evaluator.evaluate(dataset, &self.expectations)
    }

    /// Runs the suite with one blocking task per expectation.
    #[instrument(skip(self, dataset), fields(suite.name = %self.name, suite.expectations = self.expectations.len()))]
    pub async fn run_concurrent(&self, dataset: Arc<Dataset>) -> Result<ValidationResult> {
        info!(
            suite.name = %self.name,
            suite.description = ?self.description,
            "Starting concurrent validation suite"
        );
        self.evaluator
            .evaluate_concurrent(dataset, &self.expectations)
            .await
    }
}

/// Builder for [`ValidationSuite`].
#[derive(Debug)]
pub struct ValidationSuiteBuilder {
    name: String,
    description: Option<String>,
    expectations: Vec<Expectation>,
    options: EvaluationOptions,
}

impl ValidationSuiteBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            expectations: Vec::new(),
            options: EvaluationOptions::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends one expectation; order is preserved in the result.
    pub fn expectation(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn expectations<I>(mut self, expectations: I) -> Self
    where
        I: IntoIterator<Item = Expectation>,
    {
        self.expectations.extend(expectations);
        self
    }

    pub fn short_circuit(mut self, enabled: bool) -> Self {
        self.options.short_circuit = enabled;
        self
    }

    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.options.log = log;
        self
    }

    pub fn options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ValidationSuite {
        ValidationSuite {
            name: self.name,
            description: self.description,
            expectations: self.expectations,
            evaluator: Evaluator::new(self.options),
        }
    }
}
