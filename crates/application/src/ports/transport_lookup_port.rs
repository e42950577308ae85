//! Live transport lookup port
//!
//! The transport-information service answers each request for a leg with the
//! options for that leg. Adapters present that exchange as a single
//! request/response call; the caller enforces the timeout.

use async_trait::async_trait;
use domain::ItineraryLeg;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Ask for transport options between two addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportRequest {
    /// Departure address
    pub origin: String,
    /// Arrival address
    pub destination: String,
    /// Leg the answer belongs to
    pub step_id: u32,
}

impl TransportRequest {
    /// Create a new request
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, step_id: u32) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            step_id,
        }
    }

    /// Build the request for an itinerary leg
    #[must_use]
    pub fn for_leg(leg: &ItineraryLeg) -> Self {
        Self::new(
            leg.origin.location_label(),
            leg.destination.location_label(),
            leg.step_id,
        )
    }

    /// Check both endpoints are present
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidRequest` if origin or destination is blank.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(ApplicationError::InvalidRequest(format!(
                "step {} needs both an origin and a destination",
                self.step_id
            )));
        }
        Ok(())
    }
}

/// Answer from the transport service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// Leg the answer belongs to
    pub step_id: u32,
    /// Free-text option descriptions
    #[serde(default)]
    pub options: Vec<String>,
    /// Error reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Port for the live transport-information service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransportLookupPort: Send + Sync {
    /// Look up transport options for one leg
    async fn lookup(&self, request: &TransportRequest)
    -> Result<TransportResponse, ApplicationError>;
}
