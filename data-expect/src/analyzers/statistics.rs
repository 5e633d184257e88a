//! Descriptive statistics over numeric sequences.
//!
//! All functions are total: undefined results (empty input, too few points)
//! are `None`, never an error or a panic.

/// Arithmetic mean; `None` on empty input.
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Sample variance with Bessel's correction (`n - 1`); `None` below 2 points.
pub fn variance(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let sum_sq: f64 = xs.iter().map(|x| (x - m).powi(2)).sum();
    Some(sum_sq / (xs.len() - 1) as f64)
}

/// Sample standard deviation with Bessel's correction (`n - 1`).
///
/// This is the convention used everywhere in the crate, including the
/// `StdevBetween` expectation and the profiler.
///
/// # Examples
///
/// ```rust
/// use data_expect::analyzers::statistics::stdev;
///
/// let sd = stdev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - 2.138).abs() < 0.001);
/// assert_eq!(stdev(&[1.0]), None);
/// ```
pub fn stdev(xs: &[f64]) -> Option<f64> {
    variance(xs).map(f64::sqrt)
}

/// 1-based ranks with ties replaced by the average of the positions they
/// occupy: `[10, 20, 20, 30]` ranks as `[1, 2.5, 2.5, 4]`.
pub fn ranks(xs: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

    let mut ranks = vec![0.0; xs.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && xs[order[end]] == xs[order[start]] {
            end += 1;
        }
        // positions start..end (0-based) hold ranks start+1..=end
        let average = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = average;
        }
        start = end;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[5.0]), Some(5.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_stdev_uses_sample_convention() {
        assert_eq!(stdev(&[]), None);
        assert_eq!(stdev(&[3.0]), None);
        // population stdev would be 1.0, sample stdev is sqrt(2)
        let sd = stdev(&[1.0, 3.0]).unwrap();
        assert!((sd - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(stdev(&[4.0, 4.0, 4.0]), Some(0.0));
    }

    #[test]
    fn test_ranks_without_ties() {
        assert_eq!(ranks(&[30.0, 10.0, 20.0]), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_ranks_average_ties() {
        assert_eq!(ranks(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
        assert_eq!(ranks(&[5.0, 5.0, 5.0]), vec![2.0, 2.0, 2.0]);
        assert!(ranks(&[]).is_empty());
    }
}
