//! Routing error types

use thiserror::Error;

/// Errors that can occur while requesting a route
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the routing service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Failed to parse the response from the routing service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The service found no route between the points
    #[error("No route found between the selected points")]
    NoRouteFound,

    /// The service answered with a status code other than `Ok`
    #[error("Routing service error {code}: {message}")]
    ServiceError {
        /// Service status code (e.g. `InvalidQuery`)
        code: String,
        /// Human-readable message from the service, if any
        message: String,
    },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RoutingError {
    /// Classify a non-`Ok` service status code
    #[must_use]
    pub fn from_service_code(code: &str, message: Option<String>) -> Self {
        if code == "NoRoute" {
            Self::NoRouteFound
        } else {
            Self::ServiceError {
                code: code.to_string(),
                message: message.unwrap_or_default(),
            }
        }
    }

    /// Returns true for transport-level failures (network, HTTP status, timeout)
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
