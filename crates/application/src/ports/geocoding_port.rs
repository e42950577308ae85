//! Geocoding port
//!
//! Resolves stop addresses to coordinates when an itinerary arrives without them.

use async_trait::async_trait;
use domain::GeoPoint;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address-to-coordinate resolution
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-form address
    ///
    /// Returns `Ok(None)` when the service answered but knows no such place.
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, ApplicationError>;
}
