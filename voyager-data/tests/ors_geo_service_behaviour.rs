//! Behavioural tests for [`OrsGeoService`].
//!
//! A local canned-response server stands in for OpenRouteService so the
//! client's HTTP handling is exercised end to end.

mod support;

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::{Canned, CannedServer};
use voyager_core::{
    Coordinate, GeoError, GeoService, GeocodeFocus, TravelProfile, TravelSegment,
};
use voyager_data::ors::{OrsConfig, OrsGeoService};

/// Outcome of a distance request.
type DistanceCell = RefCell<Option<Result<Vec<TravelSegment>, GeoError>>>;

/// Outcome of a geocoding request.
type GeocodeCell = RefCell<Option<Result<Vec<Coordinate>, GeoError>>>;

/// Server under test and whether the client gets an API key.
#[derive(Debug, Default)]
struct Backend {
    server: Option<CannedServer>,
    keyless: bool,
}

const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);

const LOUVRE_FEATURES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.3376, 48.8606]}}
    ]
}"#;

const MATRIX_WITH_NULL: &str = r#"{
    "distances": [[1500.0, null]],
    "durations": [[360.0, null]]
}"#;

#[fixture]
fn backend() -> RefCell<Backend> {
    RefCell::new(Backend::default())
}

#[fixture]
fn distances() -> DistanceCell {
    RefCell::new(None)
}

#[fixture]
fn geocoded() -> GeocodeCell {
    RefCell::new(None)
}

fn client(backend: &Backend) -> OrsGeoService {
    let base_url = backend
        .server
        .as_ref()
        .map_or("http://127.0.0.1:9", CannedServer::base_url);
    let config = OrsConfig::new(base_url).with_timeout(Duration::from_secs(5));
    let keyed = if backend.keyless {
        config
    } else {
        config.with_api_key("test-key")
    };
    OrsGeoService::with_config(keyed)
        .unwrap_or_else(|err| panic!("client should build: {err}"))
}

fn requests(backend: &RefCell<Backend>) -> Vec<support::Recorded> {
    backend
        .borrow()
        .server
        .as_ref()
        .map(CannedServer::requests)
        .unwrap_or_default()
}

// --- Given steps ---

#[given("an ORS server that knows the Louvre")]
fn server_knows_louvre(#[from(backend)] backend: &RefCell<Backend>) {
    backend.borrow_mut().server = Some(CannedServer::start(vec![Canned::ok(LOUVRE_FEATURES)]));
}

#[given("an ORS server whose matrix has a null cell")]
fn server_with_null_cell(#[from(backend)] backend: &RefCell<Backend>) {
    backend.borrow_mut().server = Some(CannedServer::start(vec![Canned::ok(MATRIX_WITH_NULL)]));
}

#[given("an ORS server that rate limits the first request")]
fn server_rate_limits(#[from(backend)] backend: &RefCell<Backend>) {
    backend.borrow_mut().server = Some(CannedServer::start(vec![
        Canned::status(429, "Too Many Requests", r#"{"error": "Rate limit exceeded"}"#),
        Canned::ok(MATRIX_WITH_NULL),
    ]));
}

#[given("an ORS server that fails with an internal error")]
fn server_fails(#[from(backend)] backend: &RefCell<Backend>) {
    backend.borrow_mut().server = Some(CannedServer::start(vec![Canned::status(
        500,
        "Internal Server Error",
        r#"{"error": {"code": 2099, "message": "Unknown internal error"}}"#,
    )]));
}

#[given("an ORS client without an API key")]
fn client_without_key(#[from(backend)] backend: &RefCell<Backend>) {
    backend.borrow_mut().keyless = true;
}

// --- When steps ---

#[when("I geocode \"Louvre, Paris\" near central Paris")]
fn geocode_louvre(
    #[from(backend)] backend: &RefCell<Backend>,
    #[from(geocoded)] geocoded: &GeocodeCell,
) {
    let service = client(&backend.borrow());
    let focus = GeocodeFocus {
        center: PARIS,
        radius_km: Some(50.0),
    };
    *geocoded.borrow_mut() = Some(service.geocode("Louvre, Paris", Some(&focus)));
}

#[when("I request distances to two destinations")]
fn request_two(
    #[from(backend)] backend: &RefCell<Backend>,
    #[from(distances)] distances: &DistanceCell,
) {
    let service = client(&backend.borrow());
    let destinations = [Coordinate::new(48.8606, 2.3376), Coordinate::new(48.8530, 2.3499)];
    *distances.borrow_mut() =
        Some(service.distance(PARIS, &destinations, TravelProfile::FootWalking));
}

// --- Then steps ---

#[then("the Louvre coordinate is returned in latitude-longitude order")]
fn then_louvre(#[from(geocoded)] geocoded: &GeocodeCell) {
    let borrowed = geocoded.borrow();
    let found = match borrowed.as_ref() {
        Some(Ok(found)) => found,
        other => panic!("expected geocoding success, got {other:?}"),
    };
    assert_eq!(found, &vec![Coordinate::new(48.8606, 2.3376)]);
}

#[then("the search was focused on central Paris")]
fn then_focused(#[from(backend)] backend: &RefCell<Backend>) {
    let sent = requests(backend);
    let line = sent.first().map(|r| r.request_line.clone()).unwrap_or_default();
    assert!(line.starts_with("GET /geocode/search?"), "unexpected request {line}");
    assert!(line.contains("focus.point.lat=48.8566"), "missing focus in {line}");
    assert!(line.contains("boundary.circle.radius=50"), "missing boundary in {line}");
    assert!(
        sent.iter()
            .flat_map(|r| r.headers.iter())
            .any(|h| h.eq_ignore_ascii_case("authorization: test-key")),
        "missing API key header"
    );
}

#[then("the first segment is available in kilometres and hours")]
fn then_first_available(#[from(distances)] distances: &DistanceCell) {
    let borrowed = distances.borrow();
    let segments = match borrowed.as_ref() {
        Some(Ok(segments)) => segments,
        other => panic!("expected distance success, got {other:?}"),
    };
    assert_eq!(segments.len(), 2, "segments must align with destinations");
    assert_eq!(segments.first(), Some(&TravelSegment::ok(1.5, 0.1)));
}

#[then("the second segment is unavailable")]
fn then_second_unavailable(#[from(distances)] distances: &DistanceCell) {
    let borrowed = distances.borrow();
    let second = borrowed
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .and_then(|segments| segments.get(1));
    assert_eq!(second, Some(&TravelSegment::unavailable()));
}

#[then("one matrix request was sent with the origin as source")]
fn then_one_matrix_request(#[from(backend)] backend: &RefCell<Backend>) {
    let sent = requests(backend);
    assert_eq!(sent.len(), 1);
    let request = sent.first().cloned().unwrap_or_default();
    assert_eq!(request.request_line, "POST /v2/matrix/foot-walking HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&request.body)
        .unwrap_or_else(|err| panic!("matrix body is not JSON: {err}"));
    assert_eq!(body["sources"], serde_json::json!([0]));
    assert_eq!(body["destinations"], serde_json::json!([1, 2]));
    assert_eq!(body["locations"][0], serde_json::json!([2.3522, 48.8566]));
}

#[then("two requests were sent")]
fn then_two_requests(#[from(backend)] backend: &RefCell<Backend>) {
    assert_eq!(requests(backend).len(), 2);
}

#[then("an HTTP error with status 500 and the server message is returned")]
fn then_http_error(#[from(distances)] distances: &DistanceCell) {
    let borrowed = distances.borrow();
    match borrowed.as_ref() {
        Some(Err(GeoError::HttpError {
            status, message, ..
        })) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Unknown internal error");
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[then("a missing API key error is returned")]
fn then_missing_key(#[from(distances)] distances: &DistanceCell) {
    let borrowed = distances.borrow();
    assert!(
        matches!(borrowed.as_ref(), Some(Err(GeoError::MissingApiKey))),
        "expected MissingApiKey, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/ors_geo_service.feature", name = $title)]
        fn $fn_name(backend: RefCell<Backend>, distances: DistanceCell, geocoded: GeocodeCell) {
            let _ = (backend, distances, geocoded);
        }
    };
}

register_scenario!(
    geocoding_a_landmark,
    "geocoding a landmark near the trip centre"
);
register_scenario!(
    measuring_distances_with_null_cell,
    "measuring distances with one unroutable destination"
);
register_scenario!(retrying_after_rate_limit, "retrying once after a rate limit");
register_scenario!(reporting_server_error, "reporting a server error");
register_scenario!(refusing_without_key, "refusing to call ORS without an API key");
