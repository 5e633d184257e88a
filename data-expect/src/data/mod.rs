//! In-memory data model: values, records and datasets.
//!
//! Column names are normalized to plain strings at the boundary
//! ([`Dataset::from_json`], [`normalize_column`]); everything downstream works
//! with one canonical key type.

mod dataset;
mod value;

pub use dataset::{normalize_column, Dataset, Record};
pub use value::{parse_timestamp, Value, ValueType};
