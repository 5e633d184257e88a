//! Property-based tests for the statistics and evaluation invariants.
//!
//! ## Test Categories
//!
//! ### 1. Correlation
//! - Pearson is symmetric, bounded to [-1, 1] and `pearson(x, x) == 1`
//! - Mismatched lengths are undefined
//! - Spearman is invariant under strictly increasing transforms
//!
//! ### 2. Correlation matrices
//! - Matrices are exactly symmetric, with a diagonal of 1 or `None`
//!
//! ### 3. Aggregation
//! - `met + failed == total` and `success == (failed == 0)`
//! - Range expectations agree with an independent computation
//!
//! Values are drawn from small integer ranges so that equal inputs produce
//! exactly equal means and variance checks stay exact.

use data_expect::analyzers::correlation::{correlation_matrix, pearson, spearman};
use data_expect::analyzers::CorrelationMethod;
use data_expect::analyzers::statistics::{mean, stdev};
use data_expect::core::{evaluate, EvaluationOptions, Expectation};
use data_expect::data::{Dataset, Record, Value};
use proptest::prelude::*;

// ============================================================================
// Test Data Generation Utilities
// ============================================================================

fn small_values(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000i32..1000, len).prop_map(|v| v.into_iter().map(f64::from).collect())
}

fn paired(len: std::ops::Range<usize>) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((-1000i32..1000, -1000i32..1000), len).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(a, b)| (f64::from(a), f64::from(b)))
            .unzip()
    })
}

fn optional_cell() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![
        1 => Just(None),
        4 => (-100i32..100).prop_map(Some),
    ]
}

/// Rows of three optional integer columns `a`, `b`, `c`.
fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((optional_cell(), optional_cell(), optional_cell()), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(a, b, c)| {
                    let cell = |v: Option<i32>| v.map_or(Value::Null, |v| Value::Integer(v.into()));
                    Record::new().with("a", cell(a)).with("b", cell(b)).with("c", cell(c))
                })
                .collect()
        },
    )
}

fn has_variance(xs: &[f64]) -> bool {
    xs.first().is_some_and(|first| xs.iter().any(|x| x != first))
}

// ============================================================================
// Correlation
// ============================================================================

proptest! {
    #[test]
    fn prop_pearson_symmetric_and_bounded((x, y) in paired(0..60)) {
        let xy = pearson(&x, &y);
        let yx = pearson(&y, &x);
        prop_assert_eq!(xy, yx);
        if let Some(r) = xy {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn prop_pearson_self_is_one(x in small_values(2..60)) {
        match pearson(&x, &x) {
            Some(r) => {
                prop_assert!(has_variance(&x));
                prop_assert!((r - 1.0).abs() < 1e-9);
            }
            None => prop_assert!(!has_variance(&x)),
        }
    }

    #[test]
    fn prop_mismatched_lengths_undefined(
        x in small_values(0..30),
        y in small_values(0..30),
    ) {
        prop_assume!(x.len() != y.len());
        prop_assert_eq!(pearson(&x, &y), None);
        prop_assert_eq!(spearman(&x, &y), None);
    }

    #[test]
    fn prop_spearman_monotone_invariant((x, y) in paired(2..50)) {
        let shifted: Vec<f64> = x.iter().map(|v| v * 2.0 + 5.0).collect();
        prop_assert_eq!(spearman(&x, &y), spearman(&shifted, &y));
    }

    #[test]
    fn prop_spearman_bounded((x, y) in paired(0..50)) {
        if let Some(r) = spearman(&x, &y) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }
}

// ============================================================================
// Correlation matrices
// ============================================================================

proptest! {
    #[test]
    fn prop_matrix_symmetric(dataset in dataset_strategy()) {
        let columns = ["a", "b", "c"];
        let matrix = correlation_matrix(&dataset, &columns);

        prop_assert_eq!(matrix.len(), 3);
        for a in columns {
            for b in columns {
                prop_assert_eq!(matrix[a][b], matrix[b][a]);
            }
            let diagonal = matrix[a][a];
            prop_assert!(diagonal.is_none() || diagonal == Some(1.0));
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

proptest! {
    #[test]
    fn prop_aggregation_counts(
        dataset in dataset_strategy(),
        min in 0usize..20,
        span in 0usize..20,
        lower in -100i32..0,
        upper in 0i32..100,
    ) {
        let expectations = vec![
            Expectation::row_count_between(min, min + span).unwrap(),
            Expectation::values_not_null("a").unwrap(),
            Expectation::values_unique("b").unwrap(),
            Expectation::values_between("c", f64::from(lower), f64::from(upper)).unwrap(),
            Expectation::mean_between("a", -50.0, 50.0).unwrap(),
            Expectation::correlation_between("a", "b", CorrelationMethod::Pearson, -1.0, 1.0).unwrap(),
        ];

        let result = evaluate(&dataset, &expectations, &EvaluationOptions::default()).unwrap();
        prop_assert_eq!(result.total_expectations(), expectations.len());
        prop_assert_eq!(
            result.expectations_met() + result.expectations_failed(),
            result.total_expectations()
        );
        prop_assert_eq!(result.success(), result.expectations_failed() == 0);
        prop_assert_eq!(result.failures().count(), result.expectations_failed());
        for (r, e) in result.results().iter().zip(&expectations) {
            prop_assert_eq!(r.expectation(), e);
        }

        let rows_ok = (min..=min + span).contains(&dataset.len());
        prop_assert_eq!(result.results()[0].success(), rows_ok);
    }

    #[test]
    fn prop_values_between_matches_manual(
        dataset in dataset_strategy(),
        lower in -100i32..0,
        upper in 0i32..100,
    ) {
        prop_assume!(dataset.has_column("c"));
        let expectation =
            Expectation::values_between("c", f64::from(lower), f64::from(upper)).unwrap();
        let result = evaluate(&dataset, &[expectation], &EvaluationOptions::default()).unwrap();

        let expected = dataset
            .records()
            .iter()
            .filter_map(|r| r.non_null("c").and_then(Value::as_f64))
            .all(|v| v >= f64::from(lower) && v <= f64::from(upper));
        prop_assert_eq!(result.success(), expected);
    }

    #[test]
    fn prop_stdev_is_non_negative(x in small_values(0..60)) {
        match stdev(&x) {
            Some(sd) => {
                prop_assert!(x.len() >= 2);
                prop_assert!(sd >= 0.0);
            }
            None => prop_assert!(x.len() < 2),
        }
        prop_assert_eq!(mean(&x).is_some(), !x.is_empty());
    }

    #[test]
    fn prop_short_circuit_is_prefix(dataset in dataset_strategy()) {
        let expectations = vec![
            Expectation::values_not_null("a").unwrap(),
            Expectation::values_unique("b").unwrap(),
            Expectation::row_count_between(1, 30).unwrap(),
        ];
        let full = evaluate(&dataset, &expectations, &EvaluationOptions::default()).unwrap();
        let short = evaluate(&dataset, &expectations, &EvaluationOptions::short_circuit()).unwrap();

        prop_assert!(short.total_expectations() <= full.total_expectations());
        prop_assert_eq!(short.results(), &full.results()[..short.total_expectations()]);
        prop_assert!(short.expectations_failed() <= 1);
    }
}
