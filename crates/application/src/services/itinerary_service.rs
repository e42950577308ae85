//! Itinerary planning service
//!
//! Fills in missing stop coordinates, then requests transport options for
//! every leg of the tour at once.

use domain::{Itinerary, ItinerarySummary};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::transport_service::{TransportResult, TransportService};

/// Transport options for a whole itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryPlan {
    /// The itinerary, with resolved coordinates
    pub itinerary: Itinerary,
    /// One result per leg, ordered by step id
    pub legs: Vec<TransportResult>,
    /// Distance and walking time for the tour
    pub summary: ItinerarySummary,
}

impl ItineraryPlan {
    /// Number of legs answered with the local estimate
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.legs.iter().filter(|l| l.is_fallback()).count()
    }

    /// Number of legs answered by the live service
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.legs.iter().filter(|l| l.is_live()).count()
    }
}

/// Plans transport for every leg of an itinerary
#[derive(Debug, Clone)]
pub struct ItineraryService {
    transport: TransportService,
    live: bool,
}

impl ItineraryService {
    /// Create a planner that asks the live service first
    #[must_use]
    pub const fn new(transport: TransportService) -> Self {
        Self {
            transport,
            live: true,
        }
    }

    /// Create a planner that only uses the local estimate
    #[must_use]
    pub const fn estimator_only(transport: TransportService) -> Self {
        Self {
            transport,
            live: false,
        }
    }

    /// Plan transport for all legs concurrently
    #[instrument(skip(self, itinerary), fields(stops = itinerary.stops.len()))]
    pub async fn plan(&self, mut itinerary: Itinerary) -> ItineraryPlan {
        let resolved = join_all(
            itinerary
                .stops
                .iter()
                .map(|stop| self.transport.resolve_coordinates(stop)),
        )
        .await;
        for (stop, point) in itinerary.stops.iter_mut().zip(resolved) {
            stop.coordinates = point;
        }

        let legs = itinerary.legs();
        let mut results = join_all(legs.iter().map(|leg| async move {
            if self.live {
                self.transport.request_transport(leg).await
            } else {
                self.transport.estimate_offline(leg).await
            }
        }))
        .await;
        results.sort_by_key(|r| r.step_id);

        let summary = itinerary.summary();
        let plan = ItineraryPlan {
            itinerary,
            legs: results,
            summary,
        };
        info!(
            legs = plan.legs.len(),
            live = plan.live_count(),
            fallback = plan.fallback_count(),
            total_km = plan.summary.total_distance_km,
            "Itinerary planned"
        );
        plan
    }
}
