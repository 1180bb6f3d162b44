//! Domain entities

mod route_result;
mod trip_state;

pub use route_result::RouteResult;
pub use trip_state::{Endpoint, TripState};
