//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod location_port;
mod map_view_port;
mod routing_port;
mod url_opener_port;

pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use location_port::LocationPort;
#[cfg(test)]
pub use location_port::MockLocationPort;
#[cfg(test)]
pub use map_view_port::MockMapViewPort;
pub use map_view_port::{DEFAULT_FIT_EDGE_INSET, FitOptions, MapViewPort};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::RoutingPort;
#[cfg(test)]
pub use url_opener_port::MockUrlOpenerPort;
pub use url_opener_port::UrlOpenerPort;
