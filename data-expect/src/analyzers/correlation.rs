//! Correlation coefficients and pairwise correlation matrices.
//!
//! Undefined correlations (mismatched lengths, fewer than two points,
//! non-finite input, zero variance) are reported as `None`. Callers must treat
//! `None` as "not computable", which is different from a correlation of 0.

use super::statistics::ranks;
use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::instrument;

/// Types of correlation that can be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Pearson product-moment correlation (-1 to 1)
    #[default]
    Pearson,
    /// Spearman rank correlation with average ranks for ties
    Spearman,
}

impl CorrelationMethod {
    /// Returns a human-readable name for this correlation method.
    pub fn name(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "Pearson",
            CorrelationMethod::Spearman => "Spearman",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Symmetric matrix of pairwise correlations keyed by column name.
pub type CorrelationMatrix = BTreeMap<String, BTreeMap<String, Option<f64>>>;

fn has_variance(xs: &[f64]) -> bool {
    xs.first().is_some_and(|first| xs.iter().any(|x| x != first))
}

/// Deviations from the mean after dividing by the largest magnitude, so the
/// sums of squares neither overflow nor underflow at extreme scales.
/// Requires at least one nonzero value.
fn scaled_deviations(xs: &[f64]) -> Vec<f64> {
    let scale = xs.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let scaled: Vec<f64> = xs.iter().map(|v| v / scale).collect();
    let mean = scaled.iter().sum::<f64>() / scaled.len() as f64;
    scaled.iter().map(|v| v - mean).collect()
}

/// Pearson correlation coefficient.
///
/// Computed as `Σ(dx·dy) / (sqrt(Σdx²) · sqrt(Σdy²))` over deviations that
/// are first rescaled by each input's largest magnitude, so the scale of the
/// data cancels out. The result is clamped to `[-1, 1]` and is exactly
/// symmetric in its arguments.
///
/// # Examples
///
/// ```rust
/// use data_expect::analyzers::correlation::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
/// assert!((r - 1.0).abs() < 0.001);
///
/// // zero variance is undefined, not zero
/// assert_eq!(pearson(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]), None);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return None;
    }
    if !has_variance(x) || !has_variance(y) {
        return None;
    }

    let dx = scaled_deviations(x);
    let dy = scaled_deviations(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in dx.iter().zip(&dy) {
        sxy += a * b;
        sxx += a * a;
        syy += b * b;
    }

    let denominator = sxx.sqrt() * syy.sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some((sxy / denominator).clamp(-1.0, 1.0))
}

/// Spearman rank correlation: Pearson over average ranks.
///
/// Returns `None` under the same conditions as [`pearson`].
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return None;
    }
    pearson(&ranks(x), &ranks(y))
}

/// Computes the correlation of `x` and `y` with the given method.
pub fn correlation(method: CorrelationMethod, x: &[f64], y: &[f64]) -> Option<f64> {
    match method {
        CorrelationMethod::Pearson => pearson(x, y),
        CorrelationMethod::Spearman => spearman(x, y),
    }
}

/// Rows where both columns hold numeric values, as two aligned sequences.
///
/// Rows missing either value (or holding a non-numeric one) are dropped for
/// this pair only.
pub fn paired_values(dataset: &Dataset, a: &str, b: &str) -> (Vec<f64>, Vec<f64>) {
    dataset
        .records()
        .iter()
        .filter_map(|record| {
            let xa = record.get(a)?.as_f64()?;
            let xb = record.get(b)?.as_f64()?;
            Some((xa, xb))
        })
        .unzip()
}

/// Pearson correlation matrix with pairwise deletion.
///
/// See [`correlation_matrix_with`].
pub fn correlation_matrix(dataset: &Dataset, columns: &[&str]) -> CorrelationMatrix {
    correlation_matrix_with(dataset, columns, CorrelationMethod::Pearson)
}

/// Correlation matrix over `columns` using `method`.
///
/// Each unordered pair is computed once over the rows where both values are
/// numeric, then mirrored, so the matrix is exactly symmetric. The diagonal is
/// `Some(1.0)` when the column has nonzero variance among its numeric values
/// and `None` otherwise.
#[instrument(skip(dataset), fields(rows = dataset.len()))]
pub fn correlation_matrix_with(
    dataset: &Dataset,
    columns: &[&str],
    method: CorrelationMethod,
) -> CorrelationMatrix {
    let mut unique: Vec<&str> = Vec::with_capacity(columns.len());
    for column in columns {
        if !unique.contains(column) {
            unique.push(column);
        }
    }

    let mut matrix: CorrelationMatrix = unique
        .iter()
        .map(|c| (c.to_string(), BTreeMap::new()))
        .collect();

    for (i, a) in unique.iter().enumerate() {
        for b in &unique[i..] {
            let value = if a == b {
                let (xs, _) = paired_values(dataset, a, a);
                correlation(method, &xs, &xs).map(|_| 1.0)
            } else {
                let (xs, ys) = paired_values(dataset, a, b);
                correlation(method, &xs, &ys)
            };

            if let Some(row) = matrix.get_mut(*a) {
                row.insert(b.to_string(), value);
            }
            if let Some(row) = matrix.get_mut(*b) {
                row.insert(a.to_string(), value);
            }
        }
    }

    matrix
}
