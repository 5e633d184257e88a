//! Error types for the data-expect library.
//!
//! Errors fall into two classes. Configuration errors (malformed expectations,
//! an empty expectation list, a missing or malformed dataset) are raised before
//! any evaluation begins. Validation failures are normally data, carried by
//! [`ValidationResult`](crate::core::ValidationResult); they only become an
//! error when a pipeline stage runs in fail-fast mode.

use crate::core::ValidationResult;
use thiserror::Error;

/// The main error type for the data-expect library.
#[derive(Error, Debug)]
pub enum ExpectError {
    /// An expectation was constructed with invalid parameters.
    #[error("Invalid {kind} expectation: {message}")]
    InvalidExpectation {
        /// Kind of the expectation being constructed (e.g. "values_between")
        kind: String,
        /// What was wrong with the parameters
        message: String,
    },

    /// Evaluation was requested without any expectations.
    #[error("At least one expectation is required")]
    NoExpectations,

    /// None of the accepted dataset keys were present in a stage context.
    #[error("Dataset not found in context; expected one of: {}", .keys.join(", "))]
    MissingDataset {
        /// The keys that were searched, in lookup order
        keys: Vec<String>,
    },

    /// The dataset could not be converted into records.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation failed while the caller opted into fail-fast behaviour.
    #[error(
        "Validation failed: {} of {} expectations failed",
        .result.expectations_failed(),
        .result.total_expectations()
    )]
    ValidationFailed {
        /// The full validation result, kept for diagnostics
        result: Box<ValidationResult>,
    },

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ExpectError>`.
pub type Result<T> = std::result::Result<T, ExpectError>;

impl ExpectError {
    /// Creates a new invalid expectation error.
    pub fn invalid_expectation(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidExpectation {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a missing dataset error for the given lookup keys.
    pub fn missing_dataset<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingDataset {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a validation failed error carrying the result.
    pub fn validation_failed(result: ValidationResult) -> Self {
        Self::ValidationFailed {
            result: Box::new(result),
        }
    }

    /// Returns true for errors raised because of misconfiguration, before
    /// any expectation was evaluated.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidExpectation { .. }
                | Self::NoExpectations
                | Self::MissingDataset { .. }
                | Self::InvalidDataset(_)
                | Self::Configuration(_)
        )
    }

    /// Returns the validation result carried by a fail-fast error.
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            Self::ValidationFailed { result } => Some(result),
            _ => None,
        }
    }
}
