//! Application services - Use case implementations

mod external_maps;
mod route_orchestrator;
mod search_controller;
mod trip_formatter;

pub use external_maps::{MapsPlatform, directions_link};
pub use route_orchestrator::{CURRENT_LOCATION_LABEL, RouteOrchestrator, RoutePhase, UserNotice};
pub use search_controller::{SearchConfig, SearchController, SearchState};
pub use trip_formatter::{format_km, format_mins, format_route_summary};
