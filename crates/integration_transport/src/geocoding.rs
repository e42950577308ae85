//! Nominatim geocoding client
//!
//! Resolves stop addresses to coordinates using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Requests are spaced at least 1.1 s apart, per the Nominatim usage policy,
//! and results are cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::GeoPoint;
use moka::future::Cache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Minimum spacing between two Nominatim requests
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1100);

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Comma-separated country codes to restrict results to (empty for none)
    #[serde(default)]
    pub country_filter: String,

    /// Preferred languages for returned names
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_accept_language() -> String {
    "fr,en".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: String::new(),
            accept_language: default_accept_language(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url).map_err(|e| format!("base_url is invalid: {e}"))?;
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to geographic coordinates
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, GeoPoint>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig, user_agent: &str) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce Nominatim's rate limit (max 1 request per second)
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                let wait = MIN_REQUEST_INTERVAL.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/{path}", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::AddressNotFound(
                "Address must not be empty".to_string(),
            ));
        }

        let cache_key = address.to_lowercase();
        let cached = match &self.cache {
            Some(cache) => cache.get(&cache_key).await,
            None => None,
        };
        if let Some(point) = cached {
            debug!(%address, "Geocoding cache hit");
            return Ok(point);
        }

        let mut params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%address, "Geocoding address");
        let results: Vec<NominatimResult> = self
            .fetch("search", &params)
            .await?
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let point = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?
            .to_point()?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, point).await;
        }
        debug!(%address, %point, "Geocoded address");
        Ok(point)
    }
}

/// Raw Nominatim API response
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl NominatimResult {
    fn to_point(&self) -> Result<GeoPoint, GeocodingError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;
        GeoPoint::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}
