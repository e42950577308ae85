//! Logging setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a plain or
//! JSON formatting layer. `RUST_LOG` takes precedence over the configured
//! filter.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives (e.g. "info", "tourguide=debug,reqwest=warn")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit one JSON object per event instead of human-readable lines
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "tourguide=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Check the filter directives parse
    pub fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.log_filter)
            .map(|_| ())
            .map_err(|e| format!("log_filter '{}' is invalid: {e}", self.log_filter))
    }

    /// Same settings with a different filter
    #[must_use]
    pub fn with_filter(&self, log_filter: impl Into<String>) -> Self {
        Self {
            log_filter: log_filter.into(),
            ..self.clone()
        }
    }
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Filter directives could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// Failed to install the global subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Build the filter, preferring `RUST_LOG` when it is set
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_filter)
            .map_err(|e| TelemetryError::Filter(e.to_string())),
    }
}

/// Install the global subscriber
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Example
///
/// ```ignore
/// use infrastructure::telemetry::{LoggingConfig, init_logging};
///
/// init_logging(&LoggingConfig::default())?;
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(filter = %config.log_filter, json = config.json, "Logging initialized");
    Ok(())
}
