//! Format checks for emails, URLs and timestamps.

use super::{missing_column, CheckOutcome};
use crate::data::{Dataset, Value};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

/// Email pattern: a permissive local part, an `@`, and a domain made of
/// dot-separated labels of at most 63 characters each.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Returns true if `candidate` is a syntactically valid email address.
///
/// # Examples
///
/// ```rust
/// use data_expect::constraints::is_valid_email;
///
/// assert!(is_valid_email("alice@example.com"));
/// assert!(is_valid_email("first.last+tag@sub.example.org"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("a@-bad.com"));
/// ```
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_REGEX.is_match(candidate)
}

fn is_valid_url(candidate: &str, schemes: &[String]) -> bool {
    Url::parse(candidate).is_ok_and(|url| schemes.iter().any(|s| s == url.scheme()))
}

/// Passes when every non-null value of `column` is a string holding a valid
/// email address.
pub fn valid_emails(dataset: &Dataset, column: &str) -> CheckOutcome {
    check_format(dataset, column, "email addresses", |value| {
        value.as_str().is_some_and(is_valid_email)
    })
}

/// Passes when every non-null value of `column` parses as a URL whose scheme
/// is one of `schemes`.
pub fn valid_urls(dataset: &Dataset, column: &str, schemes: &[String]) -> CheckOutcome {
    check_format(dataset, column, "URLs", |value| {
        value.as_str().is_some_and(|s| is_valid_url(s, schemes))
    })
    .with_detail("schemes", schemes.to_vec())
}

/// Passes when every non-null value of `column` is a timestamp or a string
/// that parses as one.
pub fn valid_timestamps(dataset: &Dataset, column: &str) -> CheckOutcome {
    check_format(dataset, column, "timestamps", |value| {
        value.as_timestamp().is_some()
    })
}

fn check_format<F>(dataset: &Dataset, column: &str, format: &str, is_valid: F) -> CheckOutcome
where
    F: Fn(&Value) -> bool,
{
    if let Some(missing) = missing_column(dataset, column) {
        return missing;
    }

    let mut checked = 0usize;
    let mut invalid = Vec::new();
    let mut samples: Vec<String> = Vec::new();
    for (row, value) in dataset.non_null_values(column) {
        checked += 1;
        if !is_valid(value) {
            if samples.len() < 5 {
                samples.push(crate::logging::truncate_field(&value.to_string(), 64));
            }
            invalid.push(row);
        }
    }

    debug!(
        column = %column,
        format = %format,
        checked,
        invalid = invalid.len(),
        "Format evaluated"
    );

    if invalid.is_empty() {
        CheckOutcome::success(format!(
            "all {checked} non-null value(s) of '{column}' are valid {format}"
        ))
    } else {
        CheckOutcome::failure(format!(
            "{} of {checked} value(s) of '{column}' are not valid {format}",
            invalid.len()
        ))
        .with_detail("invalid_count", invalid.len())
        .with_detail("invalid_samples", samples)
        .with_rows("invalid_rows", &invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn column(values: Vec<Value>) -> Dataset {
        values
            .into_iter()
            .map(|v| Record::new().with("v", v))
            .collect()
    }

    #[test]
    fn test_valid_emails() {
        let dataset = column(vec![
            "alice@example.com".into(),
            Value::Null,
            "bob.smith+news@mail.example.co.uk".into(),
        ]);
        assert!(valid_emails(&dataset, "v").is_success());
    }

    #[test]
    fn test_invalid_emails() {
        let dataset = column(vec![
            "alice@example.com".into(),
            "alice@".into(),
            "@example.com".into(),
            42.into(),
        ]);
        let outcome = valid_emails(&dataset, "v");
        assert!(!outcome.is_success());
        assert_eq!(outcome.details()["invalid_rows"], serde_json::json!([1, 2, 3]));
        assert_eq!(
            outcome.message(),
            "3 of 4 value(s) of 'v' are not valid email addresses"
        );
    }

    #[test]
    fn test_urls_with_scheme_allowlist() {
        let schemes = vec!["http".to_string(), "https".to_string()];
        let dataset = column(vec![
            "https://example.com/path?q=1".into(),
            "http://localhost:8080".into(),
        ]);
        assert!(valid_urls(&dataset, "v", &schemes).is_success());

        let dataset = column(vec![
            "https://example.com".into(),
            "ftp://files.example.com".into(),
            "not a url".into(),
        ]);
        let outcome = valid_urls(&dataset, "v", &schemes);
        assert!(!outcome.is_success());
        assert_eq!(outcome.details()["invalid_rows"], serde_json::json!([1, 2]));
        assert_eq!(outcome.details()["schemes"], serde_json::json!(["http", "https"]));

        let ftp = vec!["ftp".to_string()];
        let dataset = column(vec!["ftp://files.example.com".into()]);
        assert!(valid_urls(&dataset, "v", &ftp).is_success());
    }

    #[test]
    fn test_timestamps() {
        let ts = crate::data::parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        let dataset = column(vec![
            ts.into(),
            "2024-02-01T10:00:00Z".into(),
            "2024-03-01".into(),
            Value::Null,
        ]);
        assert!(valid_timestamps(&dataset, "v").is_success());

        let dataset = column(vec!["2024-13-45".into(), 1_700_000_000.into()]);
        let outcome = valid_timestamps(&dataset, "v");
        assert!(!outcome.is_success());
        assert_eq!(outcome.details()["invalid_count"], 2);
    }

    #[test]
    fn test_missing_column() {
        assert!(!valid_emails(&Dataset::default(), "v").is_success());
    }
}
