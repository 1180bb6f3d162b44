//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An endpoint could not be resolved to a coordinate
    #[error("Missing endpoint: select valid From and To")]
    MissingEndpoint,

    /// Geocoding service unreachable or failing
    #[error("Geocoding failed: {0}")]
    GeocodingFailed(String),

    /// Routing service unreachable or answered with an HTTP error
    #[error("Route request failed: {0}")]
    RouteRequestFailed(String),

    /// Routing service found no route between the endpoints
    #[error("No route found")]
    NoRouteFound,

    /// Routing service reported a non-success code
    #[error("Routing service error: {0}")]
    RoutingServiceError(String),

    /// The trip was cleared while a route search was running
    #[error("Route search cancelled")]
    Cancelled,

    /// Device location is not available
    #[error("Location permission denied")]
    LocationPermissionDenied,

    /// A service answered with a body that could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether this error is caused by the network or a remote HTTP failure
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::GeocodingFailed(_) | Self::RouteRequestFailed(_)
        )
    }

    /// Whether the operation was abandoned rather than failed
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
