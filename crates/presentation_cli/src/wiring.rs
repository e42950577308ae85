//! Builds application services from the loaded configuration

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{ItineraryService, TransportService};
use infrastructure::{AppConfig, GeocodingAdapter, TransportLookupAdapter};
use integration_transport::{HttpTransportClient, NominatimGeocodingClient};
use tracing::info;

/// Transport service with every enabled integration attached
pub fn transport_service(config: &AppConfig, offline: bool) -> anyhow::Result<TransportService> {
    let transport = &config.transport;

    let mut service = if offline || !transport.enabled {
        info!("Live transport lookup disabled, estimating only");
        TransportService::offline()
    } else {
        let client = HttpTransportClient::new(&transport.to_transport_config())
            .context("failed to create transport client")?;
        let mut adapter = TransportLookupAdapter::new(Arc::new(client));
        if transport.circuit_breaker {
            adapter = adapter.with_circuit_breaker();
        }
        info!(base_url = %transport.base_url, "Live transport lookup enabled");
        TransportService::new(Arc::new(adapter))
    };

    service = service.with_lookup_timeout(Duration::from_secs(transport.lookup_timeout_secs));

    if config.geocoding.enabled && !offline {
        let client = NominatimGeocodingClient::new(
            &config.geocoding.to_nominatim_config(),
            &transport.user_agent,
        )
        .context("failed to create geocoding client")?;
        service = service.with_geocoder(Arc::new(GeocodingAdapter::new(Arc::new(client))));
    }

    Ok(service)
}

/// Itinerary planner, live or estimate-only
pub fn itinerary_service(config: &AppConfig, offline: bool) -> anyhow::Result<ItineraryService> {
    let transport = transport_service(config, offline)?;
    Ok(if offline {
        ItineraryService::estimator_only(transport)
    } else {
        ItineraryService::new(transport)
    })
}
