//! OSRM wire models
//!
//! Raw shapes of the `/route/v1` response and their conversion into
//! [`RouteResult`].

use domain::{GeoPoint, RouteResult};
use serde::Deserialize;

use crate::error::RoutingError;
use crate::polyline::{self, OSRM_PRECISION};

/// Top-level `/route/v1` response
#[derive(Debug, Deserialize)]
pub(crate) struct RawRouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

/// Error body returned with non-success HTTP statuses
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// One route candidate
#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    pub geometry: RawGeometry,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

/// Route geometry in either supported encoding
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawGeometry {
    /// Encoded polyline string
    Encoded(String),
    /// GeoJSON `LineString`
    GeoJson { coordinates: Vec<[f64; 2]> },
}

impl RawGeometry {
    /// Decode into (latitude, longitude) points
    pub fn decode(self) -> Result<Vec<GeoPoint>, RoutingError> {
        match self {
            Self::Encoded(encoded) => polyline::decode(&encoded, OSRM_PRECISION)
                .map_err(|e| RoutingError::ParseError(e.to_string())),
            // GeoJSON is [lon, lat]
            Self::GeoJson { coordinates } => coordinates
                .into_iter()
                .map(|[lon, lat]| {
                    GeoPoint::new(lat, lon).map_err(|e| RoutingError::ParseError(e.to_string()))
                })
                .collect(),
        }
    }
}

impl RawRouteResponse {
    /// Pick the primary route and decode it
    pub fn into_route(self) -> Result<RouteResult, RoutingError> {
        if self.code != "Ok" {
            return Err(RoutingError::from_service_code(&self.code, self.message));
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRouteFound)?;

        let path = route.geometry.decode()?;
        if path.is_empty() {
            return Err(RoutingError::NoRouteFound);
        }

        Ok(RouteResult::new(path, route.distance, route.duration))
    }
}
