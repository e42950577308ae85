//! HTTP client for the transport-information service
//!
//! Posts origin/destination pairs to `/transport-options` and caches the
//! answers per address pair.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::models::{OptionsRequest, OptionsResponse};

/// Maximum number of cached address pairs
const CACHE_CAPACITY: u64 = 500;

/// Trait for transport service clients
#[async_trait]
pub trait TransportClient: Send + Sync {
    /// Fetch option descriptions for one origin/destination pair
    async fn request_options(
        &self,
        request: &OptionsRequest,
    ) -> Result<OptionsResponse, TransportError>;
}

/// Transport client speaking JSON over HTTP
#[derive(Debug)]
pub struct HttpTransportClient {
    client: Client,
    config: TransportConfig,
    options_url: Url,
    cache: Option<Cache<String, OptionsResponse>>,
}

impl HttpTransportClient {
    /// Create a new transport client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let options_url = config
            .options_url()
            .map_err(|e| TransportError::ConfigurationError(format!("base_url: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(Duration::from_secs(u64::from(config.cache_ttl_minutes) * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            options_url,
            cache,
        })
    }

    /// Configuration the client was built with
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn map_send_error(&self, e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            TransportError::ConnectionFailed(e.to_string())
        }
    }

    /// Parse a response body, accepting both the list and envelope shapes
    fn parse_options_response(body: &str) -> Result<OptionsResponse, TransportError> {
        serde_json::from_str(body).map_err(|e| TransportError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TransportClient for HttpTransportClient {
    #[instrument(skip(self, request), fields(step_id = request.step_id))]
    async fn request_options(
        &self,
        request: &OptionsRequest,
    ) -> Result<OptionsResponse, TransportError> {
        if request.origin.trim().is_empty() || request.destination.trim().is_empty() {
            return Err(TransportError::InvalidRequest(
                "origin and destination must not be empty".to_string(),
            ));
        }

        let cache_key = request.cache_key();
        let cached = match &self.cache {
            Some(cache) => cache.get(&cache_key).await,
            None => None,
        };
        if let Some(cached) = cached {
            debug!(%cache_key, "Transport options cache hit");
            return Ok(OptionsResponse {
                step_id: Some(request.step_id),
                ..cached
            });
        }

        debug!(url = %self.options_url, "Requesting transport options");

        let response = self
            .client
            .post(self.options_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransportError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::ParseError(e.to_string()))?;

        let mut result = Self::parse_options_response(&body)?;
        result.step_id.get_or_insert(request.step_id);

        if result.options.is_empty() {
            warn!("Transport service returned no options");
        }

        let cacheable = !result.is_error() && !result.fallback && !result.options.is_empty();
        if let (Some(cache), true) = (&self.cache, cacheable) {
            cache.insert(cache_key, result.clone()).await;
        }

        debug!(count = result.options.len(), "Transport options received");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_body() {
        let body = r#"["Adresse: A → B | Moyen: Bus 21 | Temps: 14min | Prix: 2€"]"#;
        let response = HttpTransportClient::parse_options_response(body).unwrap();
        assert_eq!(response.options.len(), 1);
    }

    #[test]
    fn test_parse_invalid_body() {
        let result = HttpTransportClient::parse_options_response("<html>oops</html>");
        assert!(matches!(result, Err(TransportError::ParseError(_))));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = TransportConfig {
            base_url: "::nope".to_string(),
            ..TransportConfig::for_testing()
        };
        assert!(matches!(
            HttpTransportClient::new(&config),
            Err(TransportError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_cache_disabled_for_testing_config() {
        let client = HttpTransportClient::new(&TransportConfig::for_testing()).unwrap();
        assert!(client.cache.is_none());
        assert_eq!(
            client.options_url.as_str(),
            "http://127.0.0.1:5000/transport-options"
        );
    }

    #[tokio::test]
    async fn test_blank_endpoint_is_rejected_before_sending() {
        let client = HttpTransportClient::new(&TransportConfig::for_testing()).unwrap();
        let result = client
            .request_options(&OptionsRequest::new("Louvre", " ", 1))
            .await;
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }
}
