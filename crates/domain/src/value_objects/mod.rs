//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod map_region;
mod place_candidate;
mod travel_profile;

pub use geo_point::GeoPoint;
pub use map_region::{EdgeInsets, MapRegion};
pub use place_candidate::PlaceCandidate;
pub use travel_profile::TravelProfile;
