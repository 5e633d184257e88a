//! Records and datasets.

use super::Value;
use crate::error::{ExpectError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A single row: a mapping from column name to value.
///
/// Records in one dataset need not share the same set of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the record.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use data_expect::data::{Record, Value};
    ///
    /// let record = Record::new().with("age", 25).with("name", "Alice");
    /// assert_eq!(record.get("age"), Some(&Value::Integer(25)));
    /// ```
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the value stored under `column`, including explicit nulls.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    /// Returns the value under `column` unless it is missing or null.
    pub fn non_null(&self, column: &str) -> Option<&Value> {
        self.get(column).filter(|v| !v.is_null())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts a JSON object into a record.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let object = json.as_object().ok_or_else(|| {
            ExpectError::InvalidDataset(format!("expected an object per record, found {json}"))
        })?;

        let mut record = Record::new();
        for (column, value) in object {
            let value = Value::from_json(value).map_err(|e| {
                ExpectError::InvalidDataset(format!("column '{column}': {e}"))
            })?;
            record.insert(normalize_column(column), value);
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Canonical form of a column name at the dataset boundary.
///
/// Names written in symbol style (`:age`) and plain style (`age`) refer to the
/// same column.
pub fn normalize_column(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix(':').unwrap_or(name).to_string()
}

/// An ordered sequence of records.
///
/// Order is significant for chronological expectations. Empty datasets are
/// valid input everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Union of the column names seen across all records, sorted.
    pub fn columns(&self) -> BTreeSet<&str> {
        self.records.iter().flat_map(Record::columns).collect()
    }

    /// Returns true if at least one record carries `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.contains(column))
    }

    /// The value of `column` for every record, in record order.
    ///
    /// Missing keys and explicit nulls both yield `None`.
    pub fn column_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.records.iter().map(move |r| r.non_null(column))
    }

    /// Non-null values of `column` with their row index.
    pub fn non_null_values<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Value)> + 'a {
        self.column_values(column)
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }

    /// Converts a JSON array of objects into a dataset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use data_expect::data::Dataset;
    ///
    /// let json = serde_json::json!([{"age": 25}, {"age": 30, "name": "Bob"}]);
    /// let dataset = Dataset::from_json(&json).unwrap();
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.columns().len(), 2);
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let rows = json.as_array().ok_or_else(|| {
            ExpectError::InvalidDataset("expected an array of records".to_string())
        })?;

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                Record::from_json(row).map_err(|e| match e {
                    ExpectError::InvalidDataset(msg) => {
                        ExpectError::InvalidDataset(format!("record {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Dataset::new)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
