//! Dynamically typed cell values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single cell value in a [`Record`](super::Record).
///
/// The set of variants is closed so checks and the profiler can dispatch on
/// the type exhaustively.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    List(Vec<Value>),
    Timestamp(DateTime<Utc>),
}

/// The primitive type of a [`Value`].
///
/// `Numeric` never describes a concrete value; it is only meaningful as a
/// declared type and accepts both integers and floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Integer,
    Float,
    Numeric,
    String,
    Boolean,
    Timestamp,
    List,
    Null,
}

impl ValueType {
    /// Returns the string representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Numeric => "numeric",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Timestamp => "timestamp",
            ValueType::List => "list",
            ValueType::Null => "null",
        }
    }

    /// Returns true for integer, float and the numeric alias.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Integer | ValueType::Float | ValueType::Numeric
        )
    }

    /// Returns true if a value of type `actual` satisfies this declared type.
    pub fn accepts(&self, actual: ValueType) -> bool {
        match self {
            ValueType::Numeric => actual.is_numeric(),
            declared => *declared == actual,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the concrete type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::List(_) => ValueType::List,
            Value::Timestamp(_) => ValueType::Timestamp,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Returns the value as f64 if it is an integer or a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the value as a point in time.
    ///
    /// Timestamps are returned as-is and strings are parsed with
    /// [`parse_timestamp`]; every other type yields `None`.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            Value::String(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Orders two values of the same type.
    ///
    /// Integers and floats compare numerically with each other. Values of
    /// unrelated types, lists and nulls are not comparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (a, b) = (a.as_f64()?, b.as_f64()?);
                a.partial_cmp(&b)
            }
            _ => None,
        }
    }

    /// Converts a JSON value into a cell value.
    ///
    /// JSON integers become [`Value::Integer`], other numbers
    /// [`Value::Float`]. Strings are kept verbatim. Nested objects have no
    /// counterpart in the value model and are rejected.
    pub fn from_json(json: &serde_json::Value) -> std::result::Result<Self, String> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| format!("number {n} is out of range"))?,
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::from_json)
                    .collect::<std::result::Result<_, _>>()?,
            ),
            serde_json::Value::Object(_) => {
                return Err("nested objects are not supported as values".to_string())
            }
        })
    }

    /// Converts the value into JSON. Timestamps become RFC 3339 strings and
    /// non-finite floats become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Integer(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
        }
    }

    fn float_bits(v: f64) -> u64 {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else if v == 0.0 {
            0.0f64.to_bits()
        } else {
            v.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => Value::float_bits(*a) == Value::float_bits(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Integer(v) => v.hash(state),
            Value::Float(v) => Value::float_bits(*v).hash(state),
            Value::String(s) => s.hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Null => {}
            Value::List(items) => items.hash(state),
            Value::Timestamp(ts) => ts.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Formats accepted by [`parse_timestamp`] after RFC 3339, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a timestamp string.
///
/// Accepts RFC 3339 (with offset), naive date-times which are taken as UTC,
/// and plain dates at midnight UTC. Surrounding whitespace is ignored.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(input, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_value_types() {
        assert_eq!(Value::from(1).value_type(), ValueType::Integer);
        assert_eq!(Value::from(1.5).value_type(), ValueType::Float);
        assert_eq!(Value::from("a").value_type(), ValueType::String);
        assert_eq!(Value::from(true).value_type(), ValueType::Boolean);
        assert_eq!(Value::from(None::<i64>).value_type(), ValueType::Null);
        assert_eq!(Value::List(vec![]).value_type(), ValueType::List);
    }

    #[test]
    fn test_numeric_alias_accepts_both() {
        assert!(ValueType::Numeric.accepts(ValueType::Integer));
        assert!(ValueType::Numeric.accepts(ValueType::Float));
        assert!(!ValueType::Numeric.accepts(ValueType::String));
        assert!(!ValueType::Integer.accepts(ValueType::Float));
    }

    #[test]
    fn test_float_equality_and_hashing() {
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Integer(1), Value::Float(1.0));

        let set: HashSet<Value> = [Value::Float(0.0), Value::Float(-0.0), Value::Float(1.0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Value::Integer(1).compare(&Value::Float(1.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("b").compare(&Value::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from("a").compare(&Value::Integer(1)), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!([1, 2.5, "x", true, null]);
        let value = Value::from_json(&json).unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Boolean(true),
                Value::Null,
            ])
        );

        assert!(Value::from_json(&serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_some());
        assert!(parse_timestamp("2024-01-15").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());

        let with_offset = parse_timestamp("2024-01-15T12:00:00+02:00").unwrap();
        let utc = parse_timestamp("2024-01-15T10:00:00Z").unwrap();
        assert_eq!(with_offset, utc);
    }

    #[test]
    fn test_serialize_timestamp_as_rfc3339() {
        let ts = parse_timestamp("2024-01-15T10:30:00Z").unwrap();
        let json = serde_json::to_string(&Value::Timestamp(ts)).unwrap();
        assert_eq!(json, "\"2024-01-15T10:30:00+00:00\"");
    }
}
