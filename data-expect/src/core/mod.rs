//! Core validation types for data-expect.
//!
//! ## Overview
//!
//! - **[`Expectation`]**: a declarative, validated check against a dataset
//! - **[`evaluate`]** / **[`Evaluator`]**: run expectations in order
//! - **[`ValidationSuite`]**: a named, reusable list of expectations
//! - **[`ExpectationResult`]** / **[`ValidationResult`]**: per-expectation
//!   outcomes and their aggregate
//!
//! ## Architecture
//!
//! ```text
//! ValidationSuite
//!     └── Evaluator (EvaluationOptions)
//!         ├── Expectation 1 ──► constraints::* ──► ExpectationResult
//!         ├── Expectation 2 ──► constraints::* ──► ExpectationResult
//!         └── ...
//!                                   └──► ValidationResult::from_results
//! ```

mod bounds;
pub mod evaluator;
mod expectation;
mod result;
mod suite;

pub use bounds::Bounds;
pub use evaluator::{check, evaluate, EvaluationOptions, Evaluator};
pub use expectation::{deserialize_expectations, Expectation};
pub use result::{ExpectationResult, ValidationResult};
pub use suite::{ValidationSuite, ValidationSuiteBuilder};
