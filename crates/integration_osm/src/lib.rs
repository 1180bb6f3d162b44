//! OpenStreetMap service integration for Wayfinder
//!
//! Provides place search via [Nominatim](https://nominatim.openstreetmap.org)
//! and road routing via an [OSRM](https://project-osrm.org) compatible server.
//!
//! # Architecture
//!
//! Each service sits behind a client trait so callers can swap implementations.
//! [`GeocodingClient`] defines place search, implemented by [`NominatimGeocodingClient`].
//! [`RoutingClient`] defines route lookup, implemented by [`OsrmRoutingClient`].
//! Neither client caches, rate-limits or retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::TravelProfile;
//! use integration_osm::{OsrmConfig, OsrmRoutingClient, RoutingClient};
//!
//! let client = OsrmRoutingClient::new(&OsrmConfig::default())?;
//! let route = client
//!     .get_route(origin, destination, TravelProfile::Driving)
//!     .await?;
//! println!("{} points, {} m", route.path.len(), route.distance_meters);
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;
pub mod polyline;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::{DEFAULT_USER_AGENT, GeometryFormat, OsrmConfig};
pub use error::RoutingError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
