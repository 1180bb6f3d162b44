//! OSRM routing client
//!
//! Requests the primary route between two points from an
//! [OSRM](https://project-osrm.org) compatible `/route/v1` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoPoint, RouteResult, TravelProfile};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::RoutingError;
use crate::models::{RawErrorBody, RawRouteResponse};

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch the best route between two points for a travel profile
    async fn get_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<RouteResult, RoutingError>;
}

/// OSRM-based routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &OsrmConfig {
        &self.config
    }

    /// Build the route URL; OSRM expects `lon,lat` pairs
    fn route_url(&self, origin: GeoPoint, destination: GeoPoint, profile: TravelProfile) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            profile.as_str(),
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude(),
        )
    }

    /// Query parameters: full geometry, primary route only
    fn route_params(&self) -> [(&'static str, &'static str); 4] {
        [
            ("overview", "full"),
            ("geometries", self.config.geometry_format.as_query_value()),
            ("steps", "false"),
            ("alternatives", "false"),
        ]
    }

    /// Parse a successful response body
    fn parse_route_response(body: &str) -> Result<RouteResult, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;
        raw.into_route()
    }

    /// Classify a non-success response, using the OSRM code when the body carries one
    fn classify_error_status(status: reqwest::StatusCode, body: &str) -> RoutingError {
        serde_json::from_str::<RawErrorBody>(body).map_or_else(
            |_| RoutingError::RequestFailed(format!("HTTP {status}")),
            |raw| RoutingError::from_service_code(&raw.code, raw.message),
        )
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self))]
    async fn get_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<RouteResult, RoutingError> {
        let url = self.route_url(origin, destination, profile);

        debug!(?url, "Requesting route");

        let response = self
            .client
            .get(&url)
            .query(&self.route_params())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        if !status.is_success() {
            let err = Self::classify_error_status(status, &body);
            warn!(%status, error = %err, "Routing request failed");
            return Err(err);
        }

        let route = Self::parse_route_response(&body)?;
        debug!(
            points = route.path.len(),
            distance_m = route.distance_meters,
            duration_s = route.duration_seconds,
            "Route decoded"
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeometryFormat;

    #[test]
    fn test_route_url_uses_lon_lat_order() {
        let client = OsrmRoutingClient::new(&OsrmConfig::for_testing()).unwrap();
        let url = client.route_url(
            GeoPoint::bengaluru(),
            GeoPoint::mysuru(),
            TravelProfile::Driving,
        );
        assert_eq!(
            url,
            "https://router.project-osrm.org/route/v1/driving/77.5946,12.9716;76.6394,12.2958"
        );
    }

    #[test]
    fn test_route_url_trims_trailing_slash() {
        let config = OsrmConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..OsrmConfig::for_testing()
        };
        let client = OsrmRoutingClient::new(&config).unwrap();
        let url = client.route_url(
            GeoPoint::new_unchecked(1.0, 2.0),
            GeoPoint::new_unchecked(3.0, 4.0),
            TravelProfile::Cycling,
        );
        assert_eq!(url, "http://localhost:5000/route/v1/cycling/2,1;4,3");
    }

    #[test]
    fn test_route_params_follow_geometry_format() {
        let config = OsrmConfig {
            geometry_format: GeometryFormat::Polyline,
            ..OsrmConfig::for_testing()
        };
        let client = OsrmRoutingClient::new(&config).unwrap();
        let params = client.route_params();
        assert!(params.contains(&("geometries", "polyline")));
        assert!(params.contains(&("overview", "full")));
        assert!(params.contains(&("steps", "false")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OsrmConfig {
            timeout_secs: 0,
            ..OsrmConfig::for_testing()
        };
        assert!(matches!(
            OsrmRoutingClient::new(&config),
            Err(RoutingError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_classify_error_with_code() {
        let err = OsrmRoutingClient::classify_error_status(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"code": "NoRoute", "message": "Impossible route between points"}"#,
        );
        assert!(matches!(err, RoutingError::NoRouteFound));
    }

    #[test]
    fn test_classify_error_without_body() {
        let err = OsrmRoutingClient::classify_error_status(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>Bad Gateway</html>",
        );
        assert!(err.is_transport());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            OsrmRoutingClient::parse_route_response("not json"),
            Err(RoutingError::ParseError(_))
        ));
    }
}
