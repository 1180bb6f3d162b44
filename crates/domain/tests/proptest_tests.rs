//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{GeoPoint, MapRegion, TravelProfile};
use domain::{Endpoint, PlaceCandidate, TripState};
use proptest::prelude::*;

// ============================================================================
// GeoPoint Property Tests
// ============================================================================

mod geo_point_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_point(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoPoint::new(lat, lon);
            prop_assert!(result.is_ok());

            let point = result.unwrap();
            prop_assert!((point.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((point.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoPoint::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoPoint::new(lat, lon).is_err());
        }

        #[test]
        fn display_parses_back(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let point = GeoPoint::new(lat, lon).unwrap();
            let parsed: GeoPoint = point.to_string().parse().unwrap();
            prop_assert!((parsed.latitude() - lat).abs() < 1e-6);
            prop_assert!((parsed.longitude() - lon).abs() < 1e-6);
        }
    }
}

// ============================================================================
// MapRegion Property Tests
// ============================================================================

mod map_region_tests {
    use super::*;

    fn arb_path() -> impl Strategy<Value = Vec<GeoPoint>> {
        prop::collection::vec(
            (-80.0f64..80.0f64, -170.0f64..170.0f64)
                .prop_map(|(lat, lon)| GeoPoint::new_unchecked(lat, lon)),
            1..50,
        )
    }

    proptest! {
        #[test]
        fn bounding_region_contains_every_point(path in arb_path()) {
            let region = MapRegion::bounding(&path).unwrap();
            for point in &path {
                prop_assert!(region.contains(point));
            }
        }

        #[test]
        fn padding_never_shrinks(path in arb_path(), factor in 1.0f64..3.0f64) {
            let region = MapRegion::bounding(&path).unwrap();
            let padded = region.padded(factor, factor);
            prop_assert!(padded.latitude_delta >= region.latitude_delta);
            prop_assert!(padded.longitude_delta >= region.longitude_delta);
            prop_assert_eq!(padded.center, region.center);
        }
    }
}

// ============================================================================
// TripState Property Tests
// ============================================================================

mod trip_state_tests {
    use super::*;

    proptest! {
        #[test]
        fn clear_always_returns_to_default(
            from in ".{0,20}",
            to in ".{0,20}",
            loading in any::<bool>()
        ) {
            let mut trip = TripState::new();
            trip.set_text(Endpoint::Origin, from);
            trip.set_text(Endpoint::Destination, to);
            trip.pick(Endpoint::Origin, &PlaceCandidate::new("x", 1.0, 2.0));
            trip.loading = loading;

            trip.clear();
            prop_assert_eq!(trip, TripState::default());
        }

        #[test]
        fn picked_endpoints_always_allow_search(label in "[a-zA-Z ]{0,20}") {
            let mut trip = TripState::new();
            trip.pick(Endpoint::Origin, &PlaceCandidate::new(label.clone(), 1.0, 2.0));
            trip.pick(Endpoint::Destination, &PlaceCandidate::new(label, 3.0, 4.0));
            prop_assert!(trip.can_find_route());
        }
    }
}

#[test]
fn profile_round_trips_through_display() {
    for profile in TravelProfile::ALL {
        let parsed: TravelProfile = profile.to_string().parse().unwrap();
        assert_eq!(parsed, profile);
    }
}
