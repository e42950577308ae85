//! Transport lookup configuration

use integration_transport::TransportConfig;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Live transport lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportAppConfig {
    /// Ask the live service at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the service exposing `/transport-options`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout in seconds (default: 20)
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// Time to wait for an answer before estimating locally (default: 20)
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,

    /// Cache TTL in minutes, 0 to disable (default: 30)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_minutes: u32,

    /// User agent sent to the service
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Stop calling the service after repeated failures (default: true)
    #[serde(default = "default_true")]
    pub circuit_breaker: bool,
}

fn default_base_url() -> String {
    TransportConfig::default().base_url
}

fn default_user_agent() -> String {
    TransportConfig::default().user_agent
}

const fn default_http_timeout() -> u64 {
    20
}

const fn default_lookup_timeout() -> u64 {
    application::DEFAULT_LOOKUP_TIMEOUT_SECS
}

const fn default_cache_ttl() -> u32 {
    30
}

impl Default for TransportAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            timeout_secs: default_http_timeout(),
            lookup_timeout_secs: default_lookup_timeout(),
            cache_ttl_minutes: default_cache_ttl(),
            user_agent: default_user_agent(),
            circuit_breaker: true,
        }
    }
}

impl TransportAppConfig {
    /// Convert to `integration_transport::TransportConfig`
    #[must_use]
    pub fn to_transport_config(&self) -> TransportConfig {
        TransportConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            cache_ttl_minutes: self.cache_ttl_minutes,
            user_agent: self.user_agent.clone(),
        }
    }

    /// Validate the section
    pub fn validate(&self) -> Result<(), String> {
        if self.lookup_timeout_secs == 0 {
            return Err("lookup_timeout_secs must be greater than 0".to_string());
        }
        if self.enabled {
            self.to_transport_config().validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_client_defaults() {
        let config = TransportAppConfig::default();
        assert_eq!(config.to_transport_config(), TransportConfig::default());
    }

    #[test]
    fn test_disabled_section_skips_client_checks() {
        let config = TransportAppConfig {
            enabled: false,
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_section_checks_url() {
        let config = TransportAppConfig {
            base_url: "nonsense".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
