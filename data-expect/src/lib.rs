//! # data-expect - Declarative Data Expectations for Rust
//!
//! data-expect checks in-memory tabular datasets against declarative
//! expectations and profiles their columns. A dataset is an ordered list of
//! records mapping column names to scalar values; nothing is read from disk
//! and no query engine is involved.
//!
//! ## Quick Start
//!
//! ```rust
//! use data_expect::prelude::*;
//!
//! # fn example() -> data_expect::Result<()> {
//! let dataset = Dataset::new(vec![
//!     Record::new().with("id", 1).with("age", 25).with("email", "alice@example.com"),
//!     Record::new().with("id", 2).with("age", 150).with("email", "bob.example.com"),
//! ]);
//!
//! let suite = ValidationSuite::builder("users")
//!     .expectation(Expectation::values_unique("id")?)
//!     .expectation(Expectation::values_between("age", 0.0, 120.0)?)
//!     .expectation(Expectation::valid_emails("email")?)
//!     .build();
//!
//! let result = suite.run(&dataset)?;
//! assert!(!result.success());
//! assert_eq!(result.expectations_met(), 1);
//!
//! for failure in result.failures() {
//!     println!("{}: {}", failure.expectation(), failure.message());
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Key Features
//!
//! ### Expectations
//!
//! - **Schema**: column existence, value types, column count
//! - **Values**: numeric ranges, non-null, uniqueness
//! - **Statistics**: mean and sample standard deviation ranges
//! - **Shape**: row count ranges, label balance
//! - **Formats**: email addresses, URLs, timestamps, chronological order
//! - **Relationships**: Pearson or Spearman correlation between two columns
//!
//! Expectations are validated when they are built or deserialized, so an
//! impossible range never reaches evaluation. Data that fails an expectation
//! is a failed [`ExpectationResult`](core::ExpectationResult), never an error.
//!
//! ### Profiling
//!
//! [`analyzers::profile`] infers each column's type and reports null and
//! distinct counts, extremes, mean, standard deviation, and optionally a
//! correlation matrix over the numeric columns.
//!
//! ### Pipelines
//!
//! The [`stage`] module adapts evaluation to JSON context maps passed between
//! pipeline stages.
//!
//! ### Observability
//!
//! Evaluation, profiling and stage calls emit `tracing` spans and events. See
//! [`logging`] for the knobs and for subscriber setup.
//!
//! ## Architecture
//!
//! - **`data`**: `Value`, `Record` and `Dataset`
//! - **`core`**: `Expectation`, the evaluator, results and suites
//! - **`constraints`**: one check function per expectation kind
//! - **`analyzers`**: statistics, correlation, type inference and profiling
//! - **`formatters`**: JSON, console and Markdown renderings of results
//! - **`stage`**: pipeline-stage adapter

pub mod analyzers;
pub mod constraints;
pub mod core;
pub mod data;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod stage;

pub use error::{ExpectError, Result};
