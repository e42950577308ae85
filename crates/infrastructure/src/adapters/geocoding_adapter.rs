//! Geocoding adapter - Implements GeocodingPort using Nominatim

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::GeoPoint;
use integration_transport::{GeocodingClient, GeocodingError};
use tracing::{debug, instrument};

/// Adapter resolving stop addresses to coordinates
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter").finish_non_exhaustive()
    }
}

impl GeocodingAdapter {
    /// Create a new adapter around a geocoding client
    #[must_use]
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ApplicationError> {
        match self.client.geocode(address).await {
            Ok(point) => Ok(Some(point)),
            Err(GeocodingError::AddressNotFound(_)) => {
                debug!(%address, "No geocoding match");
                Ok(None)
            },
            Err(GeocodingError::RateLimitExceeded) => Err(ApplicationError::RateLimited),
            Err(e) => Err(ApplicationError::ExternalService(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGeocoder(fn() -> Result<GeoPoint, GeocodingError>);

    #[async_trait]
    impl GeocodingClient for FixedGeocoder {
        async fn geocode(&self, _address: &str) -> Result<GeoPoint, GeocodingError> {
            (self.0)()
        }
    }

    fn adapter(answer: fn() -> Result<GeoPoint, GeocodingError>) -> GeocodingAdapter {
        GeocodingAdapter::new(Arc::new(FixedGeocoder(answer)))
    }

    #[tokio::test]
    async fn test_found() {
        let adapter = adapter(|| Ok(GeoPoint::paris()));
        assert_eq!(adapter.geocode("Paris").await.unwrap(), Some(GeoPoint::paris()));
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let adapter = adapter(|| Err(GeocodingError::AddressNotFound("x".to_string())));
        assert_eq!(adapter.geocode("x").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failures_are_errors() {
        let adapter = adapter(|| Err(GeocodingError::Timeout));
        assert!(matches!(
            adapter.geocode("Paris").await,
            Err(ApplicationError::ExternalService(_))
        ));

        let adapter = self::adapter(|| Err(GeocodingError::RateLimitExceeded));
        assert!(matches!(
            adapter.geocode("Paris").await,
            Err(ApplicationError::RateLimited)
        ));
    }
}
