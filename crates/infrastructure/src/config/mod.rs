//! Application configuration
//!
//! Split into focused sub-modules:
//! - `transport`: live transport-lookup service
//! - `geocoding`: Nominatim address resolution
//!
//! Logging settings live next to the subscriber setup in `telemetry`.
//!
//! Sources are layered: built-in defaults, then `config.toml` (or an explicit
//! file), then `TOURGUIDE_*` environment variables.

mod geocoding;
mod transport;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use geocoding::GeocodingAppConfig;
pub use transport::TransportAppConfig;

use crate::telemetry::LoggingConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "TOURGUIDE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Errors raised while loading or checking the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range or malformed
    #[error("Invalid [{section}] configuration: {message}")]
    Invalid {
        /// Config section holding the bad value
        section: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Live transport lookup
    #[serde(default)]
    pub transport: TransportAppConfig,

    /// Address geocoding
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// Environment variables use `__` between section and key, e.g.
    /// `TOURGUIDE_TRANSPORT__BASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, then environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration file");
        let builder = config::Config::builder().add_source(config::File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let app: Self = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Check every section for out-of-range values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transport
            .validate()
            .map_err(|message| ConfigError::Invalid {
                section: "transport",
                message,
            })?;
        self.geocoding
            .validate()
            .map_err(|message| ConfigError::Invalid {
                section: "geocoding",
                message,
            })?;
        self.logging.validate().map_err(|message| ConfigError::Invalid {
            section: "logging",
            message,
        })?;
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
