//! Geographic point value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A WGS84 coordinate in degrees, always in (latitude, longitude) order
///
/// Service payloads, configuration and command-line input go through
/// [`GeoPoint::new`] or [`FromStr`]; both reject anything outside
/// latitude [-90, 90] and longitude [-180, 180], including NaN and infinities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point from untrusted input
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCoordinates`] when either value is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(DomainError::invalid_coordinates(latitude, longitude))
        }
    }

    /// Build a point from values already known to be in range
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Bengaluru city center, the default map center
    #[must_use]
    pub const fn bengaluru() -> Self {
        Self::new_unchecked(12.9716, 77.5946)
    }

    /// Mysuru city center
    #[must_use]
    pub const fn mysuru() -> Self {
        Self::new_unchecked(12.2958, 76.6394)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"`, whitespace around either number allowed
impl FromStr for GeoPoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| DomainError::ValidationError(format!("expected \"lat,lon\", got '{s}'")))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::ValidationError(format!("invalid latitude '{}'", lat.trim())))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| DomainError::ValidationError(format!("invalid longitude '{}'", lon.trim())))?;
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        for (lat, lon) in [
            (91.0, 0.0),
            (0.0, -181.0),
            (f64::NAN, 0.0),
            (0.0, f64::INFINITY),
        ] {
            let err = GeoPoint::new(lat, lon).unwrap_err();
            assert!(matches!(err, DomainError::InvalidCoordinates { .. }), "{lat}, {lon}");
        }
    }

    #[test]
    fn displays_six_decimals() {
        assert_eq!(GeoPoint::bengaluru().to_string(), "12.971600, 77.594600");
    }

    #[test]
    fn parses_lat_lon_pair() {
        assert_eq!(
            " -33.8688 , 151.2093 ".parse::<GeoPoint>().unwrap(),
            GeoPoint::new_unchecked(-33.8688, 151.2093)
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(matches!(
            "12.97".parse::<GeoPoint>(),
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            "north,77.5".parse::<GeoPoint>(),
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            "95.0,10.0".parse::<GeoPoint>(),
            Err(DomainError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn serializes_named_fields() {
        let json = serde_json::to_string(&GeoPoint::mysuru()).unwrap();
        assert_eq!(json, r#"{"latitude":12.2958,"longitude":76.6394}"#);
    }
}
