//! Route result entity

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// A decoded route between two points
///
/// Produced atomically per routing request and always replaced in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Ordered path in (latitude, longitude) order
    pub path: Vec<GeoPoint>,
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total travel time in seconds
    pub duration_seconds: f64,
}

impl RouteResult {
    /// Create a new route result
    #[must_use]
    pub const fn new(path: Vec<GeoPoint>, distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            path,
            distance_meters,
            duration_seconds,
        }
    }

    /// Whether the path can be drawn as a line (more than one point)
    #[must_use]
    pub fn has_drawable_path(&self) -> bool {
        self.path.len() > 1
    }

    /// First point of the path
    #[must_use]
    pub fn start(&self) -> Option<GeoPoint> {
        self.path.first().copied()
    }

    /// Last point of the path
    #[must_use]
    pub fn end(&self) -> Option<GeoPoint> {
        self.path.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawable_requires_two_points() {
        let single = RouteResult::new(vec![GeoPoint::bengaluru()], 0.0, 0.0);
        assert!(!single.has_drawable_path());

        let line = RouteResult::new(vec![GeoPoint::bengaluru(), GeoPoint::mysuru()], 1.0, 1.0);
        assert!(line.has_drawable_path());
        assert_eq!(line.start(), Some(GeoPoint::bengaluru()));
        assert_eq!(line.end(), Some(GeoPoint::mysuru()));
    }

    #[test]
    fn empty_path_has_no_endpoints() {
        let route = RouteResult::new(Vec::new(), 0.0, 0.0);
        assert!(route.start().is_none());
        assert!(route.end().is_none());
    }
}
