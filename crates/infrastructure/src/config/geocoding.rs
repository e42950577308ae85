//! Geocoding configuration

use integration_transport::NominatimConfig;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Nominatim settings for stops that come without coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Resolve missing coordinates (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Cache TTL in hours, 0 to disable (default: 24)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_hours: u64,

    /// Country codes to restrict results to, e.g. "fr"
    #[serde(default)]
    pub country_filter: String,

    /// Preferred languages for returned names
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_base_url() -> String {
    NominatimConfig::default().base_url
}

fn default_accept_language() -> String {
    NominatimConfig::default().accept_language
}

const fn default_timeout() -> u64 {
    5
}

const fn default_cache_ttl() -> u64 {
    24
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            cache_ttl_hours: default_cache_ttl(),
            country_filter: String::new(),
            accept_language: default_accept_language(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to `integration_transport::NominatimConfig`
    #[must_use]
    pub fn to_nominatim_config(&self) -> NominatimConfig {
        NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_hours: self.cache_ttl_hours,
            country_filter: self.country_filter.clone(),
            accept_language: self.accept_language.clone(),
        }
    }

    /// Validate the section
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            self.to_nominatim_config().validate()?;
        }
        Ok(())
    }
}
