//! Inclusive numeric bounds used by range expectations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive `[min, max]` range.
///
/// # Examples
///
/// ```rust
/// use data_expect::core::Bounds;
///
/// let bounds = Bounds::new(10.0, 20.0).unwrap();
/// assert!(bounds.contains(10.0));
/// assert!(bounds.contains(20.0));
/// assert!(!bounds.contains(20.1));
///
/// assert!(Bounds::new(5.0, 1.0).is_err());
/// assert!(Bounds::new(f64::NAN, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Creates bounds, rejecting non-finite endpoints and `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, String> {
        if !min.is_finite() || !max.is_finite() {
            return Err(format!("bounds must be finite, got [{min}, {max}]"));
        }
        if min > max {
            return Err(format!("min ({min}) must be <= max ({max})"));
        }
        Ok(Self { min, max })
    }

    /// Like [`Bounds::new`], additionally requiring both endpoints to lie in
    /// `[lower, upper]`.
    pub fn within(min: f64, max: f64, lower: f64, upper: f64) -> Result<Self, String> {
        let bounds = Self::new(min, max)?;
        if min < lower || max > upper {
            return Err(format!(
                "bounds [{min}, {max}] must lie within [{lower}, {upper}]"
            ));
        }
        Ok(bounds)
    }

    /// Returns true if `value` lies in the range, endpoints included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns a human-readable description of the range.
    pub fn description(&self) -> String {
        format!("between {} and {}", self.min, self.max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let bounds = Bounds::new(10.0, 20.0).unwrap();
        assert!(bounds.contains(15.0));
        assert!(bounds.contains(10.0));
        assert!(bounds.contains(20.0));
        assert!(!bounds.contains(9.9));
        assert!(!bounds.contains(20.1));
        assert!(!bounds.contains(f64::NAN));
    }

    #[test]
    fn test_degenerate_range() {
        let bounds = Bounds::new(3.0, 3.0).unwrap();
        assert!(bounds.contains(3.0));
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(Bounds::new(2.0, 1.0).is_err());
        assert!(Bounds::new(0.0, f64::INFINITY).is_err());
        assert!(Bounds::within(-1.5, 0.5, -1.0, 1.0).is_err());
        assert!(Bounds::within(-1.0, 1.0, -1.0, 1.0).is_ok());
    }

    #[test]
    fn test_description() {
        assert_eq!(
            Bounds::new(1.0, 10.0).unwrap().description(),
            "between 1 and 10"
        );
        assert_eq!(Bounds::new(0.5, 1.0).unwrap().to_string(), "between 0.5 and 1");
    }
}
