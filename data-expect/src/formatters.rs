//! Result formatting for validation results.
//!
//! Formatters render a [`ValidationResult`] as JSON, human-readable console
//! text, or Markdown.
//!
//! # Examples
//!
//! ```rust
//! use data_expect::core::{evaluate, EvaluationOptions, Expectation};
//! use data_expect::data::{Dataset, Record};
//! use data_expect::formatters::{FormatterConfig, HumanFormatter, ResultFormatter};
//!
//! let dataset = Dataset::new(vec![Record::new().with("age", 150)]);
//! let expectations = vec![Expectation::values_between("age", 0.0, 100.0).unwrap()];
//! let result = evaluate(&dataset, &expectations, &EvaluationOptions::default()).unwrap();
//!
//! let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
//! let output = formatter.format(&result).unwrap();
//! assert!(output.contains("Validation FAILED"));
//! ```

use crate::core::{ExpectationResult, ValidationResult};
use crate::error::{ExpectError, Result};
use serde_json::json;
use std::fmt::Write;

/// Configuration options for formatting validation results.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the summary counts and success rate
    pub include_summary: bool,
    /// Include the evidence map of each listed result
    pub include_details: bool,
    /// List passing expectations as well as failing ones
    pub include_passed: bool,
    /// Maximum number of failures to list (`None` for all)
    pub max_failures: Option<usize>,
    /// Whether to use ANSI colors (human formatter only)
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_summary: true,
            include_details: true,
            include_passed: false,
            max_failures: None,
            use_colors: true,
        }
    }
}

impl FormatterConfig {
    /// Summary only.
    pub fn minimal() -> Self {
        Self {
            include_summary: true,
            include_details: false,
            include_passed: false,
            max_failures: Some(0),
            use_colors: false,
        }
    }

    /// Everything, including passing expectations.
    pub fn detailed() -> Self {
        Self {
            include_summary: true,
            include_details: true,
            include_passed: true,
            max_failures: None,
            use_colors: true,
        }
    }

    /// Configuration suitable for CI logs.
    pub fn ci() -> Self {
        Self {
            include_summary: true,
            include_details: true,
            include_passed: false,
            max_failures: Some(50),
            use_colors: false,
        }
    }

    pub fn with_details(mut self, include: bool) -> Self {
        self.include_details = include;
        self
    }

    pub fn with_passed(mut self, include: bool) -> Self {
        self.include_passed = include;
        self
    }

    pub fn with_max_failures(mut self, max: usize) -> Self {
        self.max_failures = Some(max);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn shown_failures<'a>(&self, result: &'a ValidationResult) -> Vec<&'a ExpectationResult> {
        let failures = result.failures();
        match self.max_failures {
            Some(max) => failures.take(max).collect(),
            None => failures.collect(),
        }
    }
}

/// Trait for formatting validation results into different output formats.
///
/// # Examples
///
/// ```rust
/// use data_expect::core::ValidationResult;
/// use data_expect::formatters::ResultFormatter;
///
/// struct OneLine;
///
/// impl ResultFormatter for OneLine {
///     fn format(&self, result: &ValidationResult) -> data_expect::Result<String> {
///         Ok(format!(
///             "{}/{} met",
///             result.expectations_met(),
///             result.total_expectations()
///         ))
///     }
/// }
/// ```
pub trait ResultFormatter {
    /// Formats a validation result into a string representation.
    fn format(&self, result: &ValidationResult) -> Result<String>;

    /// Formats with an explicit configuration. The default ignores it.
    fn format_with_config(
        &self,
        result: &ValidationResult,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(result)
    }
}

fn format_error(e: std::fmt::Error) -> ExpectError {
    ExpectError::Internal(format!("failed to format result: {e}"))
}

/// Formats validation results as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let value = filtered_json(result, config)?;
        let output = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(output)
    }
}

/// JSON view of a result, filtered by `config`.
fn filtered_json(result: &ValidationResult, config: &FormatterConfig) -> Result<serde_json::Value> {
    let mut listed: Vec<&ExpectationResult> = Vec::new();
    let failures = config.shown_failures(result);
    for r in result.results() {
        if r.success() {
            if config.include_passed {
                listed.push(r);
            }
        } else if failures.iter().any(|f| std::ptr::eq(*f, r)) {
            listed.push(r);
        }
    }

    let mut results = Vec::with_capacity(listed.len());
    for r in listed {
        let mut value = serde_json::to_value(r)?;
        if !config.include_details {
            if let Some(object) = value.as_object_mut() {
                object.remove("details");
            }
        }
        results.push(value);
    }

    let mut output = json!({
        "success": result.success(),
        "results": results,
    });
    if config.include_summary {
        if let Some(object) = output.as_object_mut() {
            object.insert("total_expectations".into(), result.total_expectations().into());
            object.insert("expectations_met".into(), result.expectations_met().into());
            object.insert("expectations_failed".into(), result.expectations_failed().into());
            object.insert("success_rate".into(), result.success_rate().into());
        }
    }
    Ok(output)
}

/// Formats validation results for console output.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for HumanFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        write_human(&mut output, result, config).map_err(format_error)?;
        Ok(output)
    }
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{color}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn write_human(
    out: &mut String,
    result: &ValidationResult,
    config: &FormatterConfig,
) -> std::fmt::Result {
    let colors = config.use_colors;

    writeln!(out)?;
    if result.success() {
        writeln!(out, "✅ {}", paint("Validation PASSED", "32", colors))?;
    } else {
        writeln!(out, "❌ {}", paint("Validation FAILED", "31", colors))?;
    }

    if config.include_summary {
        writeln!(out)?;
        writeln!(out, "📊 Summary Statistics:")?;
        writeln!(out, "   Total Expectations: {}", result.total_expectations())?;
        writeln!(
            out,
            "   ✅ Met: {}",
            paint(&result.expectations_met().to_string(), "32", colors)
        )?;
        writeln!(
            out,
            "   ❌ Failed: {}",
            paint(&result.expectations_failed().to_string(), "31", colors)
        )?;
        writeln!(out, "   Success Rate: {:.1}%", result.success_rate() * 100.0)?;
    }

    let failures = config.shown_failures(result);
    if !failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "🔍 Failed Expectations:")?;
        for (i, failure) in failures.iter().enumerate() {
            writeln!(out)?;
            writeln!(
                out,
                "   {} #{}: {}",
                paint("✗", "31", colors),
                i + 1,
                failure.expectation()
            )?;
            writeln!(out, "      Kind: {}", failure.expectation().kind_name())?;
            writeln!(out, "      Message: {}", failure.message())?;
            if config.include_details {
                for (key, value) in failure.details() {
                    writeln!(out, "      {key}: {value}")?;
                }
            }
        }
    }

    let hidden = result.expectations_failed() - failures.len();
    if hidden > 0 {
        writeln!(out)?;
        writeln!(out, "   ... and {hidden} more failures")?;
    }

    if config.include_passed && result.expectations_met() > 0 {
        writeln!(out)?;
        writeln!(out, "Met Expectations:")?;
        for passed in result.results().iter().filter(|r| r.success()) {
            writeln!(
                out,
                "   {} {}",
                paint("✓", "32", colors),
                passed.expectation()
            )?;
        }
    }

    writeln!(out)
}

/// Formats validation results as Markdown.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level, clamped to 1..=6.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for MarkdownFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        write_markdown(&mut output, result, config, self.heading_level).map_err(format_error)?;
        Ok(output)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn write_markdown(
    out: &mut String,
    result: &ValidationResult,
    config: &FormatterConfig,
    heading_level: u8,
) -> std::fmt::Result {
    let h = "#".repeat(heading_level as usize);

    if result.success() {
        writeln!(out, "{h} ✅ Validation Report - PASSED")?;
    } else {
        writeln!(out, "{h} ❌ Validation Report - FAILED")?;
    }

    if config.include_summary {
        writeln!(out)?;
        writeln!(out, "{h}# Summary")?;
        writeln!(out)?;
        writeln!(out, "| Metric | Value |")?;
        writeln!(out, "|--------|-------|")?;
        writeln!(out, "| Total Expectations | {} |", result.total_expectations())?;
        writeln!(out, "| Met | {} |", result.expectations_met())?;
        writeln!(out, "| Failed | {} |", result.expectations_failed())?;
        writeln!(out, "| Success Rate | {:.1}% |", result.success_rate() * 100.0)?;
    }

    let failures = config.shown_failures(result);
    if !failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "{h}# Failures")?;
        writeln!(out)?;
        for (i, failure) in failures.iter().enumerate() {
            writeln!(out, "{h}## ❌ #{}: {}", i + 1, failure.expectation())?;
            writeln!(out)?;
            writeln!(out, "- **Kind:** `{}`", failure.expectation().kind_name())?;
            writeln!(out, "- **Message:** {}", failure.message())?;
            if config.include_details && !failure.details().is_empty() {
                writeln!(out)?;
                writeln!(out, "| Detail | Value |")?;
                writeln!(out, "|--------|-------|")?;
                for (key, value) in failure.details() {
                    writeln!(out, "| {key} | {} |", escape_cell(&value.to_string()))?;
                }
            }
            writeln!(out)?;
        }

        let hidden = result.expectations_failed() - failures.len();
        if hidden > 0 {
            writeln!(
                out,
                "> **Note:** {hidden} additional failures not shown in this report."
            )?;
            writeln!(out)?;
        }
    }

    if config.include_passed && result.expectations_met() > 0 {
        writeln!(out)?;
        writeln!(out, "{h}# Met")?;
        writeln!(out)?;
        for passed in result.results().iter().filter(|r| r.success()) {
            writeln!(out, "- ✅ {}", passed.expectation())?;
        }
    }

    Ok(())
}

impl ValidationResult {
    /// Pretty JSON with the default formatter configuration.
    pub fn to_json(&self) -> Result<String> {
        JsonFormatter::new().format(self)
    }

    /// Console text without colors.
    pub fn to_human(&self) -> Result<String> {
        HumanFormatter::with_config(FormatterConfig::default().with_colors(false)).format(self)
    }

    pub fn to_markdown(&self) -> Result<String> {
        MarkdownFormatter::new().format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Expectation;
    use crate::data::{Dataset, Record};

    fn create_test_result() -> ValidationResult {
        let dataset = Dataset::new(vec![
            Record::new().with("id", 1).with("age", 150),
            Record::new().with("id", 1).with("age", 30),
        ]);
        let expectations = vec![
            Expectation::column_exists("id").unwrap(),
            Expectation::values_between("age", 0.0, 100.0).unwrap(),
            Expectation::values_unique("id").unwrap(),
        ];
        crate::core::evaluate(&dataset, &expectations, &Default::default()).unwrap()
    }

    #[test]
    fn test_formatter_config() {
        let config = FormatterConfig::default();
        assert!(config.include_summary);
        assert!(config.include_details);
        assert!(config.use_colors);

        let minimal = FormatterConfig::minimal();
        assert!(!minimal.include_details);
        assert_eq!(minimal.max_failures, Some(0));

        let ci = FormatterConfig::ci();
        assert!(!ci.use_colors);
        assert_eq!(ci.max_failures, Some(50));
    }

    #[test]
    fn test_json_formatter() {
        let result = create_test_result();
        let output = JsonFormatter::new().format(&result).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["total_expectations"], 3);
        assert_eq!(json["expectations_failed"], 2);
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["results"][0]["expectation"]["kind"], "values_between");
        assert!(json["results"][0]["details"].is_object());

        let output = JsonFormatter::new()
            .with_pretty(false)
            .format_with_config(&result, &FormatterConfig::detailed().with_details(false))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["results"].as_array().unwrap().len(), 3);
        assert!(json["results"][1].get("details").is_none());
    }

    #[test]
    fn test_human_formatter() {
        let result = create_test_result();
        let output = HumanFormatter::new().format(&result).unwrap();
        assert!(output.contains("Validation FAILED"));
        assert!(output.contains("Total Expectations: 3"));
        assert!(output.contains("values of 'age' between 0 and 100"));

        let output = result.to_human().unwrap();
        assert!(!output.contains("\x1b["));
        assert!(output.contains("out_of_range_rows: [0]"));
    }

    #[test]
    fn test_markdown_formatter() {
        let result = create_test_result();
        let output = result.to_markdown().unwrap();
        assert!(output.contains("## ❌ Validation Report - FAILED"));
        assert!(output.contains("| Total Expectations | 3 |"));
        assert!(output.contains("#### ❌ #1: values of 'age' between 0 and 100"));

        let output = MarkdownFormatter::new()
            .with_heading_level(1)
            .format(&result)
            .unwrap();
        assert!(output.starts_with("# ❌ Validation Report - FAILED"));
    }

    #[test]
    fn test_max_failures() {
        let result = create_test_result();
        let config = FormatterConfig::default()
            .with_colors(false)
            .with_max_failures(1);

        let output = HumanFormatter::new()
            .format_with_config(&result, &config)
            .unwrap();
        assert!(output.contains("#1:"));
        assert!(!output.contains("#2:"));
        assert!(output.contains("... and 1 more failures"));
    }

    #[test]
    fn test_to_json_round_trips_counts() {
        let result = create_test_result();
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["expectations_met"], 1);
    }
}
