//! Prelude for commonly used types and traits in data-expect.

pub use crate::analyzers::{profile, CorrelationMethod, DatasetProfile, Profiler};
pub use crate::core::{
    evaluate, EvaluationOptions, Expectation, ExpectationResult, ValidationResult,
    ValidationSuite,
};
pub use crate::data::{Dataset, Record, Value, ValueType};
pub use crate::error::{ExpectError, Result};
pub use crate::formatters::{FormatterConfig, ResultFormatter};
pub use crate::logging::LogConfig;
pub use crate::stage::{PipelineStage, StageConfig, ValidationStage};
