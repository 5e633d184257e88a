//! Column type inference.
//!
//! The rule is deterministic and total:
//!
//! 1. A column whose non-null values are all integers or floats is `Float` if
//!    any float is present, otherwise `Integer`.
//! 2. Otherwise the most frequent type wins; ties go to the type observed first
//!    in record order.
//! 3. A column with no non-null values is `Null`.

use crate::data::{Value, ValueType};

/// Incremental type tally for one column.
#[derive(Debug, Clone, Default)]
pub struct TypeTally {
    /// (type, count) in first-observed order
    counts: Vec<(ValueType, usize)>,
}

impl TypeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one value. Nulls are ignored.
    pub fn observe(&mut self, value: &Value) {
        let value_type = value.value_type();
        if value_type == ValueType::Null {
            return;
        }
        match self.counts.iter_mut().find(|(t, _)| *t == value_type) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value_type, 1)),
        }
    }

    pub fn count(&self, value_type: ValueType) -> usize {
        self.counts
            .iter()
            .find(|(t, _)| *t == value_type)
            .map_or(0, |(_, c)| *c)
    }

    /// Returns the inferred type of everything observed so far.
    pub fn inferred(&self) -> ValueType {
        if self.counts.is_empty() {
            return ValueType::Null;
        }

        if self.counts.iter().all(|(t, _)| t.is_numeric()) {
            return if self.count(ValueType::Float) > 0 {
                ValueType::Float
            } else {
                ValueType::Integer
            };
        }

        // first maximum wins
        let mut best = self.counts[0];
        for &(value_type, count) in &self.counts[1..] {
            if count > best.1 {
                best = (value_type, count);
            }
        }
        best.0
    }
}

/// Infers the type of a sequence of values.
pub fn infer_type<'a, I>(values: I) -> ValueType
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut tally = TypeTally::new();
    for value in values {
        tally.observe(value);
    }
    tally.inferred()
}
