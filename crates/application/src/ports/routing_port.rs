//! Routing service port
//!
//! Defines the interface for fetching a route between two points.

use async_trait::async_trait;
use domain::{GeoPoint, RouteResult, TravelProfile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch the primary route between two points
    ///
    /// Fails with [`ApplicationError::NoRouteFound`] when the service
    /// finds none, [`ApplicationError::RoutingServiceError`] for other
    /// service codes and [`ApplicationError::RouteRequestFailed`] for
    /// transport failures.
    async fn get_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: TravelProfile,
    ) -> Result<RouteResult, ApplicationError>;
}
