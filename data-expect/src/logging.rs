//! Logging utilities and configuration for data-expect.
//!
//! Evaluation, profiling and stage calls emit `tracing` spans and events.
//! [`LogConfig`] gates the per-expectation detail events, which are the only
//! ones whose volume grows with the number of expectations.

use tracing::Level;

/// Logging configuration for evaluation.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for data-expect components
    pub base_level: Level,
    /// Whether to log every expectation outcome with its details
    pub log_expectation_details: bool,
    /// Whether to log dataset extraction and profiling
    pub log_dataset_operations: bool,
    /// Whether to log the met/failed summary of each evaluation
    pub log_summary: bool,
    /// Maximum length for logged field values
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_expectation_details: false,
            log_dataset_operations: true,
            log_summary: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_expectation_details: true,
            log_dataset_operations: true,
            log_summary: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_expectation_details: false,
            log_dataset_operations: false,
            log_summary: false,
            max_field_length: 128,
        }
    }

    /// True when the base level is DEBUG or more verbose.
    pub fn timing_enabled(&self) -> bool {
        self.base_level >= Level::DEBUG
    }
}

/// Per-check timing at DEBUG, skipped unless the base level is DEBUG or
/// more verbose.
#[macro_export]
macro_rules! perf_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.timing_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Per-expectation detail logging.
#[macro_export]
macro_rules! log_expectation {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_expectation_details {
            tracing::debug!($($arg)*);
        }
    };
}

/// Dataset operation logging.
#[macro_export]
macro_rules! log_dataset_op {
    ($config:expr, $($arg:tt)*) => {
        if $config.log_dataset_operations {
            tracing::info!($($arg)*);
        }
    };
}

/// Truncates a string to at most `max_length` bytes, on a char boundary.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Subscriber setup for binaries and tests that embed data-expect.
pub mod setup {
    use tracing::Level;

    /// Configuration for the global subscriber.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for data-expect components specifically
        pub crate_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                crate_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                crate_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                crate_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        pub fn with_crate_level(mut self, level: Level) -> Self {
            self.crate_level = level;
            self
        }

        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},data_expect={}",
                    self.level.as_str().to_lowercase(),
                    self.crate_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global subscriber: registry, `EnvFilter`, and a plain or
    /// JSON fmt layer. `RUST_LOG` takes precedence over the configured filter.
    ///
    /// Fails if a global subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use data_expect::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}
