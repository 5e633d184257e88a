//! Pipeline stage adapter.
//!
//! A [`ValidationStage`] reads a dataset out of a JSON context map, evaluates
//! its expectations and writes a [`StageOutcome`] back under
//! [`RESULT_KEY`]. All other context entries pass through untouched.
//!
//! # Example
//!
//! ```rust
//! use data_expect::stage::{PipelineStage, StageConfig, StageContext, ValidationStage};
//! use serde_json::json;
//!
//! # async fn example() -> data_expect::Result<()> {
//! let config: StageConfig = serde_json::from_value(json!({
//!     "expectations": [
//!         {"kind": "values_not_null", "column": "id"},
//!         {"kind": "row_count_between", "min": 1, "max": 100}
//!     ],
//!     "profile": true
//! }))?;
//! let stage = ValidationStage::new(config)?;
//!
//! let mut context = StageContext::new();
//! context.insert("data".into(), json!([{"id": 1}, {"id": 2}]));
//! context.insert("run_id".into(), json!("abc"));
//!
//! let context = stage.call(context).await?;
//! assert_eq!(context["validation"]["success"], true);
//! assert_eq!(context["run_id"], "abc");
//! # Ok(())
//! # }
//! ```

use crate::analyzers::{DatasetProfile, Profiler};
use crate::core::{
    deserialize_expectations, EvaluationOptions, Evaluator, Expectation, ValidationResult,
};
use crate::data::Dataset;
use crate::error::{ExpectError, Result};
use crate::log_dataset_op;
use crate::logging::LogConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Context passed between pipeline stages.
pub type StageContext = serde_json::Map<String, serde_json::Value>;

/// Context keys searched for the dataset, in lookup order.
pub const DATASET_KEYS: [&str; 2] = ["data", "dataset"];

/// Context key the stage writes its outcome to.
pub const RESULT_KEY: &str = "validation";

/// A unit of work in a data pipeline.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// Short identifier of the stage.
    fn name(&self) -> &str;

    /// One-line summary of what the stage does.
    fn describe(&self) -> String;

    /// Transforms the context.
    ///
    /// # Errors
    ///
    /// Returns an error when the context is unusable or the stage decides the
    /// pipeline must stop.
    async fn call(&self, context: StageContext) -> Result<StageContext>;
}

/// Configuration of a [`ValidationStage`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageConfig {
    /// Expectations, validated while deserializing
    #[serde(deserialize_with = "deserialize_expectations")]
    pub expectations: Vec<Expectation>,
    /// Raise [`ExpectError::ValidationFailed`] instead of writing a failed outcome
    #[serde(default)]
    pub fail_fast: bool,
    /// Attach a dataset profile to the outcome
    #[serde(default)]
    pub profile: bool,
    /// Stop evaluating after the first failure
    #[serde(default)]
    pub short_circuit: bool,
    /// Evaluate expectations on blocking tasks
    #[serde(default)]
    pub concurrent: bool,
}

impl StageConfig {
    pub fn new(expectations: Vec<Expectation>) -> Self {
        Self {
            expectations,
            ..Self::default()
        }
    }

    pub fn with_fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    pub fn with_profile(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }

    pub fn with_short_circuit(mut self, enabled: bool) -> Self {
        self.short_circuit = enabled;
        self
    }

    pub fn with_concurrent(mut self, enabled: bool) -> Self {
        self.concurrent = enabled;
        self
    }
}

/// What the stage writes under [`RESULT_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOutcome {
    pub validation: ValidationResult,
    /// `null` unless profiling is enabled
    pub profile: Option<DatasetProfile>,
    pub success: bool,
    pub total_expectations: usize,
    pub expectations_met: usize,
    pub expectations_failed: usize,
}

impl StageOutcome {
    fn new(validation: ValidationResult, profile: Option<DatasetProfile>) -> Self {
        Self {
            success: validation.success(),
            total_expectations: validation.total_expectations(),
            expectations_met: validation.expectations_met(),
            expectations_failed: validation.expectations_failed(),
            validation,
            profile,
        }
    }
}

/// Validates the dataset found in the pipeline context.
#[derive(Debug, Clone)]
pub struct ValidationStage {
    config: StageConfig,
    evaluator: Evaluator,
    log: LogConfig,
}

impl ValidationStage {
    /// Creates a stage.
    ///
    /// # Errors
    ///
    /// [`ExpectError::NoExpectations`] when the configuration lists none, and
    /// [`ExpectError::InvalidExpectation`] when one has invalid parameters.
    pub fn new(config: StageConfig) -> Result<Self> {
        Self::with_log_config(config, LogConfig::default())
    }

    pub fn with_log_config(mut config: StageConfig, log: LogConfig) -> Result<Self> {
        if config.expectations.is_empty() {
            return Err(ExpectError::NoExpectations);
        }
        config.expectations = config
            .expectations
            .into_iter()
            .map(Expectation::checked)
            .collect::<Result<_>>()?;
        let options = EvaluationOptions::default()
            .with_short_circuit(config.short_circuit)
            .with_log_config(log.clone());
        Ok(Self {
            config,
            evaluator: Evaluator::new(options),
            log,
        })
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Finds and decodes the dataset. The first present key wins.
    pub fn extract_dataset(context: &StageContext) -> Result<Dataset> {
        let value = DATASET_KEYS
            .iter()
            .find_map(|key| context.get(*key))
            .ok_or_else(|| ExpectError::missing_dataset(DATASET_KEYS))?;
        Dataset::from_json(value)
    }

    /// Evaluates the dataset and builds the outcome without touching a context.
    pub async fn run(&self, dataset: Dataset) -> Result<StageOutcome> {
        let dataset = Arc::new(dataset);
        let validation = if self.config.concurrent {
            self.evaluator
                .evaluate_concurrent(Arc::clone(&dataset), &self.config.expectations)
                .await?
        } else {
            self.evaluator
                .evaluate(&dataset, &self.config.expectations)?
        };

        if self.config.fail_fast && !validation.success() {
            warn!(
                expectations.failed = validation.expectations_failed(),
                "Validation failed in fail-fast mode"
            );
            return Err(ExpectError::validation_failed(validation));
        }

        let profile = if self.config.profile {
            log_dataset_op!(self.log, dataset.rows = dataset.len(), "Profiling dataset");
            Some(Profiler::default().profile(&dataset))
        } else {
            None
        };

        Ok(StageOutcome::new(validation, profile))
    }
}

#[async_trait]
impl PipelineStage for ValidationStage {
    fn name(&self) -> &str {
        "validation"
    }

    fn describe(&self) -> String {
        let count = self.config.expectations.len();
        let mut description = format!("validate {count} expectation(s)");

        let mut flags = Vec::new();
        if self.config.fail_fast {
            flags.push("fail-fast");
        }
        if self.config.profile {
            flags.push("profiling");
        }
        if self.config.short_circuit {
            flags.push("short-circuit");
        }
        if self.config.concurrent {
            flags.push("concurrent");
        }
        if !flags.is_empty() {
            description.push_str(&format!(" [{}]", flags.join(", ")));
        }
        description
    }

    #[instrument(skip(self, context), fields(stage.expectations = self.config.expectations.len()))]
    async fn call(&self, mut context: StageContext) -> Result<StageContext> {
        let dataset = Self::extract_dataset(&context)?;
        log_dataset_op!(
            self.log,
            dataset.rows = dataset.len(),
            dataset.columns = dataset.columns().len(),
            "Extracted dataset from context"
        );

        let outcome = self.run(dataset).await?;
        info!(
            validation.success = outcome.success,
            expectations.met = outcome.expectations_met,
            expectations.failed = outcome.expectations_failed,
            "Validation stage completed"
        );

        context.insert(RESULT_KEY.to_string(), serde_json::to_value(&outcome)?);
        Ok(context)
    }
}
