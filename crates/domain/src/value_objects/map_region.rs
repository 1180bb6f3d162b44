//! Map viewport value objects

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Visible area of a map: a center plus latitude/longitude spans in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Center of the visible area
    pub center: GeoPoint,
    /// Vertical span in degrees
    pub latitude_delta: f64,
    /// Horizontal span in degrees
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Create a region around a center
    #[must_use]
    pub const fn new(center: GeoPoint, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            center,
            latitude_delta,
            longitude_delta,
        }
    }

    /// Tight bounding region around a path, `None` for an empty path
    #[must_use]
    pub fn bounding(path: &[GeoPoint]) -> Option<Self> {
        let first = path.first()?;
        let (mut min_lat, mut max_lat) = (first.latitude(), first.latitude());
        let (mut min_lon, mut max_lon) = (first.longitude(), first.longitude());

        for point in &path[1..] {
            min_lat = min_lat.min(point.latitude());
            max_lat = max_lat.max(point.latitude());
            min_lon = min_lon.min(point.longitude());
            max_lon = max_lon.max(point.longitude());
        }

        let center = GeoPoint::new_unchecked(
            f64::midpoint(min_lat, max_lat),
            f64::midpoint(min_lon, max_lon),
        );
        Some(Self::new(center, max_lat - min_lat, max_lon - min_lon))
    }

    /// Scale the spans, keeping the center
    #[must_use]
    pub fn padded(self, latitude_factor: f64, longitude_factor: f64) -> Self {
        Self {
            latitude_delta: self.latitude_delta * latitude_factor,
            longitude_delta: self.longitude_delta * longitude_factor,
            ..self
        }
    }

    /// Raise both spans to at least `min_delta` degrees
    #[must_use]
    pub fn with_minimum_delta(self, min_delta: f64) -> Self {
        Self {
            latitude_delta: self.latitude_delta.max(min_delta),
            longitude_delta: self.longitude_delta.max(min_delta),
            ..self
        }
    }

    /// Whether a point lies inside the region (edges inclusive, within rounding)
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        const TOLERANCE: f64 = 1e-9;
        let half_lat = self.latitude_delta / 2.0 + TOLERANCE;
        let half_lon = self.longitude_delta / 2.0 + TOLERANCE;
        (point.latitude() - self.center.latitude()).abs() <= half_lat
            && (point.longitude() - self.center.longitude()).abs() <= half_lon
    }
}

/// Screen-space margins kept free around fitted content, in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
}

impl EdgeInsets {
    /// Same margin on every side
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Sum of left and right margins
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom margins
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lat, lon)
    }

    #[test]
    fn bounding_empty_path_is_none() {
        assert!(MapRegion::bounding(&[]).is_none());
    }

    #[test]
    fn bounding_single_point_has_zero_span() {
        let region = MapRegion::bounding(&[point(12.0, 77.0)]).unwrap();
        assert_eq!(region.center, point(12.0, 77.0));
        assert!(region.latitude_delta.abs() < f64::EPSILON);
        assert!(region.longitude_delta.abs() < f64::EPSILON);
    }

    #[test]
    fn bounding_covers_all_points() {
        let path = [point(12.97, 77.59), point(12.5, 77.0), point(12.29, 76.63)];
        let region = MapRegion::bounding(&path).unwrap();
        assert!((region.latitude_delta - 0.68).abs() < 1e-9);
        assert!((region.longitude_delta - 0.96).abs() < 1e-9);
        assert!(path.iter().all(|p| region.contains(p)));
    }

    #[test]
    fn padded_scales_spans() {
        let region = MapRegion::new(point(0.0, 0.0), 1.0, 2.0).padded(1.5, 2.0);
        assert!((region.latitude_delta - 1.5).abs() < f64::EPSILON);
        assert!((region.longitude_delta - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn minimum_delta_applies() {
        let region = MapRegion::new(point(0.0, 0.0), 0.0, 0.5).with_minimum_delta(0.01);
        assert!((region.latitude_delta - 0.01).abs() < f64::EPSILON);
        assert!((region.longitude_delta - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn uniform_insets() {
        let insets = EdgeInsets::uniform(40.0);
        assert!((insets.horizontal() - 80.0).abs() < f64::EPSILON);
        assert!((insets.vertical() - 80.0).abs() < f64::EPSILON);
    }
}
