//! Transport service configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the transport-information service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Base URL of the service exposing `/transport-options`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in minutes (0 to disable caching)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_cache_ttl_minutes() -> u32 {
    30
}

fn default_user_agent() -> String {
    concat!("Tourguide/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            user_agent: default_user_agent(),
        }
    }
}

impl TransportConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Full URL of the options endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn options_url(&self) -> Result<Url, url::ParseError> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)?.join("transport-options")
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url).map_err(|e| format!("base_url is invalid: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url must use http or https, got {}", url.scheme()));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}
