//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod location_adapter;
mod map_view_adapter;
mod routing_adapter;
mod url_opener_adapter;

pub use geocoding_adapter::NominatimGeocodingAdapter;
pub use location_adapter::ConfiguredLocationProvider;
pub use map_view_adapter::HeadlessMapView;
pub use routing_adapter::OsrmRoutingAdapter;
pub use url_opener_adapter::CommandUrlOpener;
