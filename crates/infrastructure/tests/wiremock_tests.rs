//! Adapter tests against mocked OpenStreetMap services

use std::sync::Arc;

use application::ports::{GeocodingPort, MapViewPort, RoutingPort};
use application::services::{RouteOrchestrator, RoutePhase, UserNotice, format_route_summary};
use application::ApplicationError;
use domain::{GeoPoint, TravelProfile};
use infrastructure::{HeadlessMapView, MapConfig, NominatimGeocodingAdapter, OsrmRoutingAdapter};
use integration_osm::{NominatimConfig, OsrmConfig};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoding_adapter(server: &MockServer) -> NominatimGeocodingAdapter {
    NominatimGeocodingAdapter::with_config(&NominatimConfig {
        base_url: server.uri(),
        ..NominatimConfig::for_testing()
    })
    .unwrap()
}

fn routing_adapter(server: &MockServer) -> OsrmRoutingAdapter {
    OsrmRoutingAdapter::with_config(&OsrmConfig {
        base_url: server.uri(),
        ..OsrmConfig::for_testing()
    })
    .unwrap()
}

async fn mount_place(server: &MockServer, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn geocoding_adapter_maps_results() {
    let server = MockServer::start().await;
    mount_place(
        &server,
        "Mysuru",
        serde_json::json!([
            {"lat": "12.2958", "lon": "76.6394", "display_name": "Mysuru, Karnataka, India"}
        ]),
    )
    .await;

    let adapter = geocoding_adapter(&server);
    let candidates = adapter.search("Mysuru").await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].point(), GeoPoint::mysuru());

    let best = adapter.resolve_one("Mysuru").await.unwrap().unwrap();
    assert_eq!(best.label, "Mysuru, Karnataka, India");
}

#[tokio::test]
async fn geocoding_http_error_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = geocoding_adapter(&server).search("Mysuru").await.unwrap_err();
    assert!(matches!(err, ApplicationError::GeocodingFailed(_)));
    assert_eq!(UserNotice::for_error(&err).title, "Network error");
}

#[tokio::test]
async fn routing_codes_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/walking/.+$"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"code": "NoRoute", "message": "Impossible route between points"}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/cycling/.+$"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#),
        )
        .mount(&server)
        .await;

    let adapter = routing_adapter(&server);
    let err = adapter
        .get_route(GeoPoint::bengaluru(), GeoPoint::mysuru(), TravelProfile::Walking)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NoRouteFound));

    let err = adapter
        .get_route(GeoPoint::bengaluru(), GeoPoint::mysuru(), TravelProfile::Cycling)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::RoutingServiceError(ref code) if code == "InvalidQuery"));
    assert_eq!(UserNotice::for_error(&err).title, "Route error");
}

#[tokio::test]
async fn bangalore_to_mysuru_through_real_adapters() {
    let server = MockServer::start().await;
    mount_place(
        &server,
        "Bangalore",
        serde_json::json!([
            {"lat": "12.9716", "lon": "77.5946", "display_name": "Bengaluru, Karnataka, India"}
        ]),
    )
    .await;
    mount_place(
        &server,
        "Mysuru",
        serde_json::json!([
            {"lat": "12.2958", "lon": "76.6394", "display_name": "Mysuru, Karnataka, India"}
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/route/v1/driving/77.5946,12.9716;76.6394,12.2958"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[77.5946, 12.9716], [77.1, 12.6], [76.6394, 12.2958]]
                },
                "distance": 143512.3,
                "duration": 11040.7
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let map_view = Arc::new(HeadlessMapView::from_config(&MapConfig::default()));
    let orchestrator = RouteOrchestrator::new(
        Arc::new(geocoding_adapter(&server)),
        Arc::new(routing_adapter(&server)),
        Arc::clone(&map_view) as Arc<dyn MapViewPort>,
    );

    orchestrator.set_from_text("Bangalore");
    orchestrator.set_to_text("Mysuru");
    let route = orchestrator.find_route().await.unwrap();

    assert_eq!(orchestrator.phase(), RoutePhase::Success);
    assert_eq!(route.start(), Some(GeoPoint::bengaluru()));
    assert_eq!(route.end(), Some(GeoPoint::mysuru()));
    assert_eq!(format_route_summary(&route), "Distance: 143.5 km • ETA: 184 min");

    assert_eq!(map_view.fit_count(), 1);
    let region = map_view.region();
    assert!(route.path.iter().all(|p| region.contains(p)));
}

#[tokio::test]
async fn unreachable_router_is_network_error() {
    let server = MockServer::start().await;
    let map_view = Arc::new(HeadlessMapView::from_config(&MapConfig::default()));
    let router = OsrmRoutingAdapter::with_config(&OsrmConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..OsrmConfig::for_testing()
    })
    .unwrap();

    let orchestrator = RouteOrchestrator::new(
        Arc::new(geocoding_adapter(&server)),
        Arc::new(router),
        Arc::clone(&map_view) as Arc<dyn MapViewPort>,
    );
    orchestrator.pick_origin(&domain::PlaceCandidate::new("A", 12.9716, 77.5946));
    orchestrator.pick_destination(&domain::PlaceCandidate::new("B", 12.2958, 76.6394));

    let err = orchestrator.find_route().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(orchestrator.phase(), RoutePhase::Failed);
    assert!(orchestrator.snapshot().route.is_none());
    assert_eq!(map_view.fit_count(), 0);
}
