//! Trip state entity
//!
//! Session-scoped state of a directions screen: what the user typed, which
//! endpoints are resolved, the current route and whether a search is running.

use serde::{Deserialize, Serialize};

use super::RouteResult;
use crate::value_objects::{GeoPoint, PlaceCandidate};

/// Which end of the trip an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Start of the trip
    Origin,
    /// End of the trip
    Destination,
}

impl Endpoint {
    /// Label used in messages
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Origin => "From",
            Self::Destination => "To",
        }
    }
}

/// Current state of a trip being planned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripState {
    /// Free text typed in the origin field
    pub from_text: String,
    /// Free text typed in the destination field
    pub to_text: String,
    /// Resolved origin
    pub origin: Option<GeoPoint>,
    /// Resolved destination
    pub destination: Option<GeoPoint>,
    /// Latest successful route
    pub route: Option<RouteResult>,
    /// A route search is in progress
    pub loading: bool,
}

impl TripState {
    /// Create an empty trip
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text typed for an endpoint
    #[must_use]
    pub fn text(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Origin => &self.from_text,
            Endpoint::Destination => &self.to_text,
        }
    }

    /// Resolved point for an endpoint
    #[must_use]
    pub const fn point(&self, endpoint: Endpoint) -> Option<GeoPoint> {
        match endpoint {
            Endpoint::Origin => self.origin,
            Endpoint::Destination => self.destination,
        }
    }

    /// Replace the text of an endpoint, leaving its point untouched
    pub fn set_text(&mut self, endpoint: Endpoint, text: impl Into<String>) {
        match endpoint {
            Endpoint::Origin => self.from_text = text.into(),
            Endpoint::Destination => self.to_text = text.into(),
        }
    }

    /// Set the resolved point of an endpoint
    pub fn set_point(&mut self, endpoint: Endpoint, point: GeoPoint) {
        match endpoint {
            Endpoint::Origin => self.origin = Some(point),
            Endpoint::Destination => self.destination = Some(point),
        }
    }

    /// Apply a picked suggestion: its point and its label
    pub fn pick(&mut self, endpoint: Endpoint, candidate: &PlaceCandidate) {
        self.set_point(endpoint, candidate.point());
        self.set_text(endpoint, candidate.label.clone());
    }

    /// Whether an endpoint has something to resolve (a point or non-blank text)
    #[must_use]
    pub fn has_input(&self, endpoint: Endpoint) -> bool {
        self.point(endpoint).is_some() || !self.text(endpoint).trim().is_empty()
    }

    /// Both endpoints are resolved
    #[must_use]
    pub const fn has_both_endpoints(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }

    /// A route search may be started
    #[must_use]
    pub fn can_find_route(&self) -> bool {
        !self.loading && self.has_input(Endpoint::Origin) && self.has_input(Endpoint::Destination)
    }

    /// The trip can be handed off to an external maps application
    #[must_use]
    pub const fn can_open_in_maps(&self) -> bool {
        self.has_both_endpoints()
    }

    /// There is anything to clear
    #[must_use]
    pub fn can_clear(&self) -> bool {
        !self.from_text.is_empty()
            || !self.to_text.is_empty()
            || self.origin.is_some()
            || self.destination.is_some()
            || self.route.as_ref().is_some_and(|r| !r.path.is_empty())
    }

    /// Reset everything to the initial values
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trip_is_empty() {
        let trip = TripState::new();
        assert!(!trip.can_find_route());
        assert!(!trip.can_open_in_maps());
        assert!(!trip.can_clear());
    }

    #[test]
    fn text_on_both_sides_allows_search() {
        let mut trip = TripState::new();
        trip.set_text(Endpoint::Origin, "Bangalore");
        assert!(!trip.can_find_route());
        trip.set_text(Endpoint::Destination, "Mysuru");
        assert!(trip.can_find_route());
    }

    #[test]
    fn blank_text_does_not_count() {
        let mut trip = TripState::new();
        trip.set_text(Endpoint::Origin, "   ");
        trip.set_point(Endpoint::Destination, GeoPoint::mysuru());
        assert!(!trip.can_find_route());
        assert!(trip.can_clear());
    }

    #[test]
    fn loading_blocks_search() {
        let mut trip = TripState::new();
        trip.set_point(Endpoint::Origin, GeoPoint::bengaluru());
        trip.set_point(Endpoint::Destination, GeoPoint::mysuru());
        trip.loading = true;
        assert!(!trip.can_find_route());
        assert!(trip.can_open_in_maps());
    }

    #[test]
    fn pick_sets_point_and_label() {
        let mut trip = TripState::new();
        let candidate = PlaceCandidate::new("Mysuru, Karnataka", 12.2958, 76.6394);
        trip.pick(Endpoint::Destination, &candidate);
        assert_eq!(trip.to_text, "Mysuru, Karnataka");
        assert_eq!(trip.destination, Some(candidate.point()));
        assert!(trip.origin.is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut trip = TripState::new();
        trip.set_text(Endpoint::Origin, "A");
        trip.set_point(Endpoint::Destination, GeoPoint::mysuru());
        trip.route = Some(RouteResult::new(vec![GeoPoint::mysuru()], 0.0, 0.0));
        trip.loading = true;

        trip.clear();
        assert_eq!(trip, TripState::default());
    }

    #[test]
    fn endpoint_labels() {
        assert_eq!(Endpoint::Origin.label(), "From");
        assert_eq!(Endpoint::Destination.label(), "To");
    }
}
