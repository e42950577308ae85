//! Geographic point value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Mean Earth radius used for great-circle distances
pub(crate) const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in decimal degrees
///
/// Deserializes from either `{"latitude": .., "longitude": ..}` or a
/// `[latitude, longitude]` pair; both forms are validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointRepr", into = "GeoPointRepr")]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum GeoPointRepr {
    Object { latitude: f64, longitude: f64 },
    Pair([f64; 2]),
}

impl TryFrom<GeoPointRepr> for GeoPoint {
    type Error = DomainError;

    fn try_from(repr: GeoPointRepr) -> Result<Self, Self::Error> {
        match repr {
            GeoPointRepr::Object {
                latitude,
                longitude,
            }
            | GeoPointRepr::Pair([latitude, longitude]) => Self::new(latitude, longitude),
        }
    }
}

impl From<GeoPoint> for GeoPointRepr {
    fn from(point: GeoPoint) -> Self {
        Self::Object {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if latitude is not in [-90, 90],
    /// longitude is not in [-180, 180], or either value is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinate(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without validation (for trusted constants)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another point in kilometers
    ///
    /// Uses the haversine formula with a fixed Earth radius of 6371 km.
    /// Always finite, including for antipodal points.
    #[must_use]
    #[allow(clippy::suboptimal_flops)] // Unfused to match the published web map distances
    pub fn distance_km(&self, other: &Self) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let half_dlat = (other.latitude - self.latitude).to_radians() / 2.0;
        let half_dlon = (other.longitude - self.longitude).to_radians() / 2.0;

        let h = half_dlat.sin() * half_dlat.sin()
            + lat1_rad.cos() * lat2_rad.cos() * half_dlon.sin() * half_dlon.sin();
        // Rounding can push h just past 1 near the antipode
        let h = h.clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = DomainError;

    /// Parse `"lat,lon"` (whitespace around either value is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| {
            DomainError::ValidationError(format!("expected 'lat,lon', got '{s}'"))
        })?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| DomainError::ValidationError(format!("not a number: '{}'", v.trim())))
        };
        Self::new(parse(lat)?, parse(lon)?)
    }
}

/// Default map center
impl GeoPoint {
    /// Paris, France (Hôtel de Ville)
    #[must_use]
    pub const fn paris() -> Self {
        Self::new_unchecked(48.8566, 2.3522)
    }
}
