//! Routing adapter - Implements RoutingPort using integration_osm

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{GeoPoint, RouteResult, TravelProfile};
use integration_osm::{OsrmConfig, OsrmRoutingClient, RoutingClient, RoutingError};
use tracing::{debug, instrument};

/// Adapter for road routing using an OSRM server
pub struct OsrmRoutingAdapter {
    client: OsrmRoutingClient,
}

impl std::fmt::Debug for OsrmRoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmRoutingAdapter")
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}

impl OsrmRoutingAdapter {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: OsrmRoutingClient) -> Self {
        Self { client }
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn with_config(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        let client = OsrmRoutingClient::new(config).map_err(Self::map_error)?;
        Ok(Self::new(client))
    }

    /// Map integration routing error to application error
    fn map_error(err: RoutingError) -> ApplicationError {
        match err {
            RoutingError::ConnectionFailed(e) | RoutingError::RequestFailed(e) => {
                ApplicationError::RouteRequestFailed(e)
            },
            RoutingError::Timeout { .. } => ApplicationError::RouteRequestFailed(err.to_string()),
            RoutingError::NoRouteFound => ApplicationError::NoRouteFound,
            RoutingError::ServiceError { code, .. } => ApplicationError::RoutingServiceError(code),
            RoutingError::ParseError(e) => ApplicationError::InvalidResponse(e),
            RoutingError::ConfigurationError(e) => ApplicationError::Configuration(e),
        }
    }
}

#[async_trait]
impl RoutingPort for OsrmRoutingAdapter {
    #[instrument(skip(self))]
    async fn get_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<RouteResult, ApplicationError> {
        let result = self
            .client
            .get_route(origin, destination, profile)
            .await
            .map_err(Self::map_error);

        if let Err(e) = &result {
            debug!(error = %e, "Route lookup failed");
        }

        result
    }
}
