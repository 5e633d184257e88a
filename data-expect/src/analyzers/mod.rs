//! Statistics and profiling over in-memory datasets.
//!
//! Analyzers compute metrics independently of expectations. The expectation
//! checks in [`constraints`](crate::constraints) reuse them so that a profile
//! and a check never disagree about what the data looks like.
//!
//! ## Available Analyzers
//!
//! - **Statistics** (`statistics`): mean, sample standard deviation, ranks
//! - **Correlation** (`correlation`): Pearson, Spearman and pairwise matrices
//! - **Type Inference** (`inference`): deterministic column type detection
//! - **Profiler** (`profiler`): per-column summaries for a whole dataset
//!
//! ## Example Usage
//!
//! ```rust
//! use data_expect::analyzers::{CorrelationMethod, Profiler};
//! use data_expect::data::{Dataset, Record};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new().with("x", 1).with("y", 10),
//!     Record::new().with("x", 2).with("y", 20),
//!     Record::new().with("x", 3).with("y", 31),
//! ]);
//!
//! let profiler = Profiler::builder()
//!     .compute_correlations(true)
//!     .correlation_method(CorrelationMethod::Spearman)
//!     .build();
//!
//! let profile = profiler.profile(&dataset);
//! let matrix = profile.correlations.as_ref().unwrap();
//! assert_eq!(matrix["x"]["y"], Some(1.0));
//! ```

pub mod correlation;
pub mod inference;
pub mod profile_types;
pub mod profiler;
pub mod statistics;

pub use correlation::{
    correlation_matrix, correlation_matrix_with, pearson, spearman, CorrelationMatrix,
    CorrelationMethod,
};
pub use inference::{infer_type, TypeTally};
pub use profile_types::{ColumnProfile, DatasetProfile};
pub use profiler::{profile, Profiler, ProfilerBuilder, ProfilerConfig};
