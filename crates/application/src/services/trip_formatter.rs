//! Trip summary formatting
//!
//! Pure functions turning route metrics into the short strings shown next
//! to the map.

use domain::RouteResult;

/// Format a distance in meters as kilometers
///
/// Below 10 km two decimals are shown, one decimal above. Non-finite input
/// yields an empty string.
#[must_use]
pub fn format_km(meters: f64) -> String {
    if !meters.is_finite() {
        return String::new();
    }
    let km = meters / 1000.0;
    if km < 10.0 {
        format!("{km:.2} km")
    } else {
        format!("{km:.1} km")
    }
}

/// Format a duration in seconds as rounded minutes
#[must_use]
pub fn format_mins(seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    format!("{:.0} min", (seconds / 60.0).round())
}

/// One-line summary of a route: distance and estimated travel time
#[must_use]
pub fn format_route_summary(route: &RouteResult) -> String {
    format!(
        "Distance: {} • ETA: {}",
        format_km(route.distance_meters),
        format_mins(route.duration_seconds)
    )
}

#[cfg(test)]
mod tests {
    use domain::GeoPoint;

    use super::*;

    #[test]
    fn short_distances_use_two_decimals() {
        assert_eq!(format_km(0.0), "0.00 km");
        assert_eq!(format_km(1234.0), "1.23 km");
        assert_eq!(format_km(9_990.0), "9.99 km");
    }

    #[test]
    fn long_distances_use_one_decimal() {
        assert_eq!(format_km(10_000.0), "10.0 km");
        assert_eq!(format_km(143_512.3), "143.5 km");
    }

    #[test]
    fn minutes_are_rounded() {
        assert_eq!(format_mins(0.0), "0 min");
        assert_eq!(format_mins(29.0), "0 min");
        assert_eq!(format_mins(31.0), "1 min");
        assert_eq!(format_mins(11_040.7), "184 min");
    }

    #[test]
    fn non_finite_values_are_blank() {
        assert_eq!(format_km(f64::NAN), "");
        assert_eq!(format_mins(f64::INFINITY), "");
    }

    #[test]
    fn identical_points_summary() {
        let route = RouteResult::new(vec![GeoPoint::bengaluru(), GeoPoint::bengaluru()], 0.0, 0.0);
        assert_eq!(format_route_summary(&route), "Distance: 0.00 km • ETA: 0 min");
    }
}
