//! Transport-lookup integration for Tourguide
//!
//! Talks to the external transport-information service, which answers
//! `POST /transport-options` with free-text option descriptions for a pair of
//! addresses, and resolves addresses to coordinates via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! [`TransportClient`] defines the interface for option lookups, implemented by
//! [`HttpTransportClient`]. [`GeocodingClient`] handles address-to-coordinate
//! conversion via [`NominatimGeocodingClient`]. Both keep a short-lived
//! response cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transport::{HttpTransportClient, OptionsRequest, TransportClient, TransportConfig};
//!
//! let client = HttpTransportClient::new(&TransportConfig::default())?;
//! let response = client
//!     .request_options(&OptionsRequest::new("Louvre, Paris", "Notre-Dame, Paris", 1))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{HttpTransportClient, TransportClient};
pub use config::TransportConfig;
pub use error::TransportError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
pub use models::{OptionsRequest, OptionsResponse};
