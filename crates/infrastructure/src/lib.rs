//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! transport-lookup and geocoding clients, and owns configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, GeocodingAppConfig, TransportAppConfig};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
