//! Integration tests for dataset profiling and correlation analysis.

use data_expect::analyzers::correlation::{correlation_matrix, pearson, spearman};
use data_expect::analyzers::{profile, CorrelationMethod, Profiler};
use data_expect::data::{Dataset, Record, Value, ValueType};
use serde_json::json;

const EPS: f64 = 1e-3;

fn people() -> Dataset {
    Dataset::new(vec![
        Record::new().with("age", 25).with("name", "Alice"),
        Record::new().with("age", 30).with("name", "Bob"),
        Record::new().with("age", 35).with("name", "Charlie"),
    ])
}

#[test]
fn test_profile_people() {
    let profile = profile(&people());
    assert_eq!(profile.row_count, 3);
    assert_eq!(profile.column_count, 2);

    let age = profile.column("age").unwrap();
    assert_eq!(age.inferred_type, ValueType::Integer);
    assert_eq!(age.null_count, 0);
    assert_eq!(age.unique_count, 3);
    assert_eq!(age.min, Some(Value::Integer(25)));
    assert_eq!(age.max, Some(Value::Integer(35)));
    assert!((age.mean.unwrap() - 30.0).abs() < EPS);
    assert!((age.stdev.unwrap() - 5.0).abs() < EPS);

    let name = profile.column("name").unwrap();
    assert_eq!(name.inferred_type, ValueType::String);
    assert_eq!(name.min, Some(Value::from("Alice")));
    assert_eq!(name.max, Some(Value::from("Charlie")));
    assert_eq!(name.mean, None);

    assert!(profile.correlations.is_none());
}

#[test]
fn test_profile_sparse_json() {
    let dataset = Dataset::from_json(&json!([
        {"score": 1.5, "tag": "a"},
        {"score": 2, "extra": true},
        {"score": null, "tag": "a"}
    ]))
    .unwrap();
    let profile = profile(&dataset);

    assert_eq!(profile.column_count, 3);
    let score = profile.column("score").unwrap();
    assert_eq!(score.inferred_type, ValueType::Float);
    assert_eq!(score.null_count, 1);
    assert!((score.null_ratio(profile.row_count) - 1.0 / 3.0).abs() < EPS);

    let tag = profile.column("tag").unwrap();
    assert_eq!(tag.null_count, 1);
    assert_eq!(tag.unique_count, 1);

    assert_eq!(profile.column("extra").unwrap().inferred_type, ValueType::Boolean);
    assert_eq!(profile.numeric_columns(), vec!["score"]);
}

#[test]
fn test_correlation_reference_values() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap() - 1.0).abs() < EPS);
    assert!((pearson(&x, &[10.0, 8.0, 6.0, 4.0, 2.0]).unwrap() + 1.0).abs() < EPS);

    let squares = [1.0, 4.0, 9.0, 16.0, 25.0];
    assert!((spearman(&x, &squares).unwrap() - 1.0).abs() < EPS);
    assert!(pearson(&x, &squares).unwrap() < 1.0);

    assert_eq!(pearson(&x, &[1.0, 2.0]), None);
    assert_eq!(spearman(&x, &[1.0, 2.0]), None);
}

#[test]
fn test_profiler_with_correlations() {
    let dataset = Dataset::new(
        (1..=10)
            .map(|i| {
                Record::new()
                    .with("x", i)
                    .with("y", i * i)
                    .with("z", 100 - i)
                    .with("flat", 7)
                    .with("label", if i % 2 == 0 { "even" } else { "odd" })
            })
            .collect(),
    );

    let profile = Profiler::builder()
        .compute_correlations(true)
        .correlation_method(CorrelationMethod::Spearman)
        .build()
        .profile(&dataset);
    let matrix = profile.correlations.unwrap();

    assert_eq!(matrix.len(), 4);
    assert!(!matrix.contains_key("label"));
    assert_eq!(matrix["x"]["x"], Some(1.0));
    assert_eq!(matrix["flat"]["flat"], None);
    assert_eq!(matrix["x"]["flat"], None);
    assert!((matrix["x"]["y"].unwrap() - 1.0).abs() < EPS);
    assert!((matrix["x"]["z"].unwrap() + 1.0).abs() < EPS);
    assert_eq!(matrix["y"]["z"], matrix["z"]["y"]);
}

#[test]
fn test_matrix_pairwise_deletion() {
    let dataset = Dataset::from_json(&json!([
        {"a": 1, "b": 2, "c": 10},
        {"a": 2, "b": 4},
        {"a": 3, "b": 6, "c": 30},
        {"a": 4, "b": "n/a", "c": 40}
    ]))
    .unwrap();

    let matrix = correlation_matrix(&dataset, &["a", "b", "c"]);
    assert!((matrix["a"]["b"].unwrap() - 1.0).abs() < EPS);
    assert!((matrix["a"]["c"].unwrap() - 1.0).abs() < EPS);
    assert!((matrix["b"]["c"].unwrap() - 1.0).abs() < EPS);
    for row in matrix.values() {
        assert_eq!(row.len(), 3);
    }
}
