//! Geocoding candidate value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeoPoint;

/// A labelled place returned by a geocoding search
///
/// Candidates are ephemeral: they live in a suggestion list until the user
/// picks one or the query changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Human-readable label (e.g. Nominatim `display_name`)
    pub label: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl PlaceCandidate {
    /// Create a new candidate
    pub fn new(label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            latitude,
            longitude,
        }
    }

    /// The candidate's coordinates as a point
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.latitude, self.longitude)
    }
}

impl fmt::Display for PlaceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_carries_coordinates() {
        let candidate = PlaceCandidate::new("Mysuru, Karnataka, India", 12.2958, 76.6394);
        let point = candidate.point();
        assert!((point.latitude() - 12.2958).abs() < f64::EPSILON);
        assert!((point.longitude() - 76.6394).abs() < f64::EPSILON);
    }

    #[test]
    fn display_includes_label_and_point() {
        let candidate = PlaceCandidate::new("Bengaluru", 12.9716, 77.5946);
        let shown = candidate.to_string();
        assert!(shown.starts_with("Bengaluru ("));
        assert!(shown.contains("12.971600"));
    }
}
