//! Behavioural tests for `GeoService` implementations.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voyager_core::test_support::StubGeoService;
use voyager_core::{Coordinate, GeoError, GeoService, TravelProfile, TravelSegment};

const ORIGIN: Coordinate = Coordinate::new(48.85, 2.35);
const NEAR: Coordinate = Coordinate::new(48.86, 2.35);
const MIDDLE: Coordinate = Coordinate::new(48.87, 2.35);
const BLOCKED: Coordinate = Coordinate::new(48.88, 2.35);
const LOUVRE: Coordinate = Coordinate::new(48.8606, 2.3376);

#[derive(Debug, Default)]
struct GeoWorld {
    service: RefCell<StubGeoService>,
    segments: RefCell<Option<Result<Vec<TravelSegment>, GeoError>>>,
    places: RefCell<Option<Result<Vec<Coordinate>, GeoError>>>,
}

impl GeoWorld {
    fn expect_segments(&self) -> Vec<TravelSegment> {
        self.segments
            .borrow()
            .clone()
            .expect("segments should be requested before assertions")
            .expect("distance lookup should succeed")
    }
}

#[fixture]
fn world() -> GeoWorld {
    GeoWorld::default()
}

#[given("a stub geo service with one unroutable destination")]
fn given_unroutable(world: &GeoWorld) {
    world.service.replace(
        StubGeoService::new()
            .with_default_segment(TravelSegment::ok(1.5, 0.1))
            .with_unroutable(BLOCKED),
    );
}

#[given("a stub geo service knowing the Louvre")]
fn given_louvre(world: &GeoWorld) {
    world
        .service
        .replace(StubGeoService::new().with_place("Louvre", LOUVRE));
}

#[when("I request distances to three destinations")]
fn request_three(world: &GeoWorld) {
    let outcome = world.service.borrow().distance(
        ORIGIN,
        &[NEAR, BLOCKED, MIDDLE],
        TravelProfile::FootWalking,
    );
    world.segments.replace(Some(outcome));
}

#[when("I request distances to no destinations")]
fn request_none(world: &GeoWorld) {
    let outcome = world
        .service
        .borrow()
        .distance(ORIGIN, &[], TravelProfile::DrivingCar);
    world.segments.replace(Some(outcome));
}

#[when("I geocode \"Louvre, Paris\"")]
fn geocode_louvre(world: &GeoWorld) {
    let outcome = world.service.borrow().geocode("Louvre, Paris", None);
    world.places.replace(Some(outcome));
}

#[then("three segments are returned")]
fn then_three(world: &GeoWorld) {
    assert_eq!(world.expect_segments().len(), 3);
}

#[then("only the unroutable destination is unavailable")]
fn then_only_blocked(world: &GeoWorld) {
    let available: Vec<bool> = world
        .expect_segments()
        .iter()
        .map(TravelSegment::is_available)
        .collect();
    assert_eq!(available, vec![true, false, true]);
}

#[then("no segments are returned")]
fn then_none(world: &GeoWorld) {
    assert!(world.expect_segments().is_empty());
}

#[then("the Louvre coordinate is returned")]
fn then_louvre(world: &GeoWorld) {
    let places = world
        .places
        .borrow()
        .clone()
        .expect("geocode should run before assertions")
        .expect("geocode should succeed");
    assert_eq!(places, vec![LOUVRE]);
}

#[scenario(path = "tests/features/geo_service.feature", index = 0)]
fn distances_align(world: GeoWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geo_service.feature", index = 1)]
fn empty_destinations(world: GeoWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geo_service.feature", index = 2)]
fn geocode_qualified_name(world: GeoWorld) {
    let _ = world;
}
