//! Transport option service
//!
//! Requests live options for an itinerary leg and, when the live service
//! fails, times out or has nothing to offer, answers with the local
//! estimate computed from the leg's endpoint coordinates.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{
    GeoPoint, ItineraryLeg, Stop, TransportOption, compute_distance_km,
    generate_transport_options,
};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::option_parser::LiveOption;
use crate::ports::{GeocodingPort, TransportLookupPort, TransportRequest, TransportResponse};

/// Default time to wait for the live service, in seconds
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 20;

/// Why the estimate was used instead of live data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No live service configured
    Offline,
    /// Live service did not answer in time
    Timeout {
        /// The timeout that elapsed
        timeout_secs: u64,
    },
    /// Live service could not be reached or failed
    LookupFailed {
        /// Error description
        message: String,
    },
    /// Live service answered with an error
    ServiceError {
        /// Error reported by the service
        message: String,
    },
    /// Live service answered without any option
    NoOptions,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => write!(f, "live lookup disabled"),
            Self::Timeout { timeout_secs } => {
                write!(f, "live lookup timed out after {timeout_secs}s")
            },
            Self::LookupFailed { message } => write!(f, "live lookup failed: {message}"),
            Self::ServiceError { message } => write!(f, "transport service error: {message}"),
            Self::NoOptions => write!(f, "transport service returned no options"),
        }
    }
}

/// Where the options for a leg came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TransportOutcome {
    /// Options from the live service
    Live {
        /// Parsed option descriptions
        options: Vec<LiveOption>,
    },
    /// Local estimate from the leg's coordinates
    Estimated {
        /// Great-circle length of the leg
        distance_km: f64,
        /// Estimated options in presentation order
        options: Vec<TransportOption>,
        /// Why live data was not used
        reason: FallbackReason,
    },
    /// Neither live data nor an estimate could be produced
    Unavailable,
}

/// Transport options for one leg, as delivered to the itinerary page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResult {
    /// Leg the result belongs to
    pub step_id: u32,
    /// Options and their origin
    #[serde(flatten)]
    pub outcome: TransportOutcome,
    /// Error shown instead of options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransportResult {
    fn live(step_id: u32, options: Vec<LiveOption>) -> Self {
        Self {
            step_id,
            outcome: TransportOutcome::Live { options },
            error: None,
        }
    }

    fn estimated(step_id: u32, distance_km: f64, reason: FallbackReason) -> Self {
        Self {
            step_id,
            outcome: TransportOutcome::Estimated {
                distance_km,
                options: generate_transport_options(distance_km),
                reason,
            },
            error: None,
        }
    }

    fn unavailable(step_id: u32, error: impl Into<String>) -> Self {
        Self {
            step_id,
            outcome: TransportOutcome::Unavailable,
            error: Some(error.into()),
        }
    }

    /// Whether the options came from the live service
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self.outcome, TransportOutcome::Live { .. })
    }

    /// Whether the local estimate was used
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.outcome, TransportOutcome::Estimated { .. })
    }

    /// One display line per option
    #[must_use]
    pub fn option_lines(&self) -> Vec<String> {
        match &self.outcome {
            TransportOutcome::Live { options } => options.iter().map(ToString::to_string).collect(),
            TransportOutcome::Estimated { options, .. } => {
                options.iter().map(ToString::to_string).collect()
            },
            TransportOutcome::Unavailable => Vec::new(),
        }
    }
}

/// Service producing transport options per itinerary leg
#[derive(Clone)]
pub struct TransportService {
    lookup: Option<Arc<dyn TransportLookupPort>>,
    geocoder: Option<Arc<dyn GeocodingPort>>,
    lookup_timeout: Duration,
}

impl fmt::Debug for TransportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportService")
            .field("live_lookup", &self.lookup.is_some())
            .field("geocoding", &self.geocoder.is_some())
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl TransportService {
    /// Create a service backed by a live lookup
    #[must_use]
    pub fn new(lookup: Arc<dyn TransportLookupPort>) -> Self {
        Self {
            lookup: Some(lookup),
            geocoder: None,
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
        }
    }

    /// Create a service that only estimates
    #[must_use]
    pub fn offline() -> Self {
        Self {
            lookup: None,
            geocoder: None,
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
        }
    }

    /// Resolve missing stop coordinates through a geocoder
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: Arc<dyn GeocodingPort>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Set how long to wait for the live service
    #[must_use]
    pub const fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// Transport options for one leg, live when possible
    #[instrument(skip(self, leg), fields(step_id = leg.step_id))]
    pub async fn request_transport(&self, leg: &ItineraryLeg) -> TransportResult {
        let request = TransportRequest::for_leg(leg);
        if let Err(e) = request.validate() {
            warn!(error = %e, "Rejecting transport request");
            return TransportResult::unavailable(leg.step_id, e.to_string());
        }

        let reason = match &self.lookup {
            None => FallbackReason::Offline,
            Some(lookup) => match timeout(self.lookup_timeout, lookup.lookup(&request)).await {
                Ok(Ok(response)) => match Self::accept_response(&request, response) {
                    Ok(options) => {
                        debug!(count = options.len(), "Live transport options received");
                        return TransportResult::live(leg.step_id, options);
                    },
                    Err(reason) => reason,
                },
                Ok(Err(e)) => FallbackReason::LookupFailed {
                    message: e.to_string(),
                },
                Err(_) => FallbackReason::Timeout {
                    timeout_secs: self.lookup_timeout.as_secs(),
                },
            },
        };

        if reason != FallbackReason::Offline {
            warn!(%reason, "Falling back to estimated transport options");
        }
        self.estimate(leg, reason).await
    }

    /// Estimated options for one leg, without asking the live service
    pub async fn estimate_offline(&self, leg: &ItineraryLeg) -> TransportResult {
        self.estimate(leg, FallbackReason::Offline).await
    }

    /// Coordinates of a stop, geocoding the address if they are missing
    #[instrument(skip(self, stop), fields(stop = %stop.name))]
    pub async fn resolve_coordinates(&self, stop: &Stop) -> Option<GeoPoint> {
        if let Some(point) = stop.coordinates {
            return Some(point);
        }

        let geocoder = self.geocoder.as_ref()?;
        let address = stop.location_label();
        match geocoder.geocode(address).await {
            Ok(Some(point)) => {
                debug!(%address, %point, "Resolved stop coordinates");
                Some(point)
            },
            Ok(None) => {
                warn!(%address, "Address not found");
                None
            },
            Err(e) => {
                warn!(%address, error = %e, "Geocoding failed");
                None
            },
        }
    }

    async fn estimate(&self, leg: &ItineraryLeg, reason: FallbackReason) -> TransportResult {
        let (from, to) = tokio::join!(
            self.resolve_coordinates(&leg.origin),
            self.resolve_coordinates(&leg.destination)
        );

        match (from, to) {
            (Some(from), Some(to)) => {
                let distance_km = compute_distance_km(from, to);
                debug!(distance_km, "Estimated transport options");
                TransportResult::estimated(leg.step_id, distance_km, reason)
            },
            _ => TransportResult::unavailable(
                leg.step_id,
                format!("no coordinates to estimate step {} ({reason})", leg.step_id),
            ),
        }
    }

    /// Turn a live answer into parsed options, or the reason to fall back
    fn accept_response(
        request: &TransportRequest,
        response: TransportResponse,
    ) -> Result<Vec<LiveOption>, FallbackReason> {
        if response.step_id != request.step_id {
            return Err(FallbackReason::ServiceError {
                message: format!(
                    "answer for step {} while waiting for step {}",
                    response.step_id, request.step_id
                ),
            });
        }

        if let Some(message) = response.error.filter(|e| !e.trim().is_empty()) {
            return Err(FallbackReason::ServiceError { message });
        }

        let options: Vec<LiveOption> = response
            .options
            .iter()
            .filter(|o| !o.trim().is_empty())
            .map(|o| LiveOption::parse(o))
            .collect();

        if options.is_empty() {
            return Err(FallbackReason::NoOptions);
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use domain::TransportMode;

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{MockGeocodingPort, MockTransportLookupPort};

    fn leg() -> ItineraryLeg {
        ItineraryLeg {
            step_id: 1,
            origin: Stop::new("Hôtel de Ville", "Place de l'Hôtel de Ville, Paris")
                .with_coordinates(GeoPoint::new(48.8566, 2.3522).unwrap()),
            destination: Stop::new("Louvre", "Rue de Rivoli, Paris")
                .with_coordinates(GeoPoint::new(48.8606, 2.3376).unwrap()),
        }
    }

    fn estimated_modes(result: &TransportResult) -> Vec<TransportMode> {
        match &result.outcome {
            TransportOutcome::Estimated { options, .. } => options.iter().map(|o| o.mode).collect(),
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    fn reason(result: &TransportResult) -> FallbackReason {
        match &result.outcome {
            TransportOutcome::Estimated { reason, .. } => reason.clone(),
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_live_options_are_used() {
        let mut lookup = MockTransportLookupPort::new();
        lookup
            .expect_lookup()
            .withf(|r| r.step_id == 1 && r.origin.contains("Hôtel de Ville"))
            .returning(|r| {
                Ok(TransportResponse {
                    step_id: r.step_id,
                    options: vec!["Moyen: Métro 1 | Temps: 6min | Prix: 2,15€".to_string()],
                    error: None,
                })
            });

        let service = TransportService::new(Arc::new(lookup));
        let result = service.request_transport(&leg()).await;

        assert!(result.is_live());
        assert!(result.error.is_none());
        match result.outcome {
            TransportOutcome::Live { options } => {
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].duration_minutes, Some(6));
            },
            other => panic!("expected live options, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_falls_back_to_estimate() {
        let mut lookup = MockTransportLookupPort::new();
        lookup
            .expect_lookup()
            .returning(|_| Err(ApplicationError::ExternalService("connection refused".into())));

        let service = TransportService::new(Arc::new(lookup));
        let result = service.request_transport(&leg()).await;

        assert!(result.is_fallback());
        assert!(result.error.is_none());
        assert_eq!(
            estimated_modes(&result),
            vec![TransportMode::Walking, TransportMode::PublicTransit, TransportMode::Taxi]
        );
        assert!(matches!(reason(&result), FallbackReason::LookupFailed { .. }));
        if let TransportOutcome::Estimated { distance_km, .. } = result.outcome {
            assert!((distance_km - 1.157).abs() < 1e-3);
        }
    }

    #[tokio::test]
    async fn test_service_error_falls_back() {
        let mut lookup = MockTransportLookupPort::new();
        lookup.expect_lookup().returning(|r| {
            Ok(TransportResponse {
                step_id: r.step_id,
                options: vec![],
                error: Some("Données invalides".to_string()),
            })
        });

        let service = TransportService::new(Arc::new(lookup));
        let result = service.request_transport(&leg()).await;
        assert_eq!(
            reason(&result),
            FallbackReason::ServiceError {
                message: "Données invalides".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_answer_falls_back() {
        let mut lookup = MockTransportLookupPort::new();
        lookup.expect_lookup().returning(|r| {
            Ok(TransportResponse {
                step_id: r.step_id,
                options: vec!["   ".to_string()],
                error: None,
            })
        });

        let service = TransportService::new(Arc::new(lookup));
        let result = service.request_transport(&leg()).await;
        assert_eq!(reason(&result), FallbackReason::NoOptions);
    }

    #[tokio::test]
    async fn test_mismatched_step_falls_back() {
        let mut lookup = MockTransportLookupPort::new();
        lookup.expect_lookup().returning(|_| {
            Ok(TransportResponse {
                step_id: 9,
                options: vec!["Taxi 5 min".to_string()],
                error: None,
            })
        });

        let service = TransportService::new(Arc::new(lookup));
        let result = service.request_transport(&leg()).await;
        assert!(matches!(reason(&result), FallbackReason::ServiceError { .. }));
    }

    /// Lookup that never answers
    struct SilentLookup;

    #[async_trait::async_trait]
    impl TransportLookupPort for SilentLookup {
        async fn lookup(
            &self,
            _request: &TransportRequest,
        ) -> Result<TransportResponse, ApplicationError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let service = TransportService::new(Arc::new(SilentLookup))
            .with_lookup_timeout(Duration::from_secs(20));
        let result = service.request_transport(&leg()).await;
        assert_eq!(reason(&result), FallbackReason::Timeout { timeout_secs: 20 });
    }

    #[tokio::test]
    async fn test_offline_estimates_directly() {
        let service = TransportService::offline();
        let result = service.request_transport(&leg()).await;
        assert_eq!(reason(&result), FallbackReason::Offline);
        assert_eq!(result.option_lines().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_endpoint_is_rejected_without_lookup() {
        let mut lookup = MockTransportLookupPort::new();
        lookup.expect_lookup().never();

        let mut leg = leg();
        leg.destination = Stop::new("", "");

        let service = TransportService::new(Arc::new(lookup));
        let result = service.request_transport(&leg).await;
        assert_eq!(result.outcome, TransportOutcome::Unavailable);
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_missing_coordinates_are_geocoded() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_geocode()
            .withf(|a| a == "Rue de Rivoli, Paris")
            .times(1)
            .returning(|_| Ok(Some(GeoPoint::new(48.8606, 2.3376).unwrap())));

        let mut leg = leg();
        leg.destination.coordinates = None;

        let service = TransportService::offline().with_geocoder(Arc::new(geocoder));
        let result = service.request_transport(&leg).await;
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn test_unresolvable_coordinates_report_error() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder.expect_geocode().returning(|_| Ok(None));

        let mut leg = leg();
        leg.origin.coordinates = None;

        let service = TransportService::offline().with_geocoder(Arc::new(geocoder));
        let result = service.request_transport(&leg).await;
        assert_eq!(result.outcome, TransportOutcome::Unavailable);
        assert!(result.error.as_deref().is_some_and(|e| e.contains("step 1")));
    }

    #[test]
    fn test_result_serialization() {
        let result = TransportResult::estimated(2, 1.0, FallbackReason::NoOptions);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["step_id"], 2);
        assert_eq!(json["source"], "estimated");
        assert_eq!(json["reason"]["kind"], "no_options");
        assert_eq!(json["options"].as_array().map(Vec::len), Some(3));
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(
            FallbackReason::Timeout { timeout_secs: 20 }.to_string(),
            "live lookup timed out after 20s"
        );
        assert_eq!(FallbackReason::Offline.to_string(), "live lookup disabled");
    }
}
