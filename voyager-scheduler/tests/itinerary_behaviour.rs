//! Behavioural tests for `ItineraryScheduler` using rstest-bdd.

use std::cell::RefCell;
use std::collections::HashSet;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voyager_core::{
    Coordinate, DiningOption, MealType, PointOfInterest, ScheduleError, ScheduleWarning,
    Scheduler, TripPlan, TripRequest, TripType,
};
use voyager_scheduler::ItineraryScheduler;
use voyager_scheduler::test_support::{StraightLineGeoService, offset_km};

const LISBON: Coordinate = Coordinate::new(38.7223, -9.1393);
const CITY_SPEED_KMH: f64 = 20.0;

#[derive(Debug)]
struct ItineraryWorld {
    request: RefCell<TripRequest>,
    geo: RefCell<StraightLineGeoService>,
    outcome: RefCell<Option<Result<TripPlan, ScheduleError>>>,
}

impl ItineraryWorld {
    fn new() -> Self {
        Self {
            request: RefCell::new(TripRequest::new("Lisbon", 1)),
            geo: RefCell::new(StraightLineGeoService::new(CITY_SPEED_KMH)),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<TripPlan, ScheduleError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_plan(&self) -> TripPlan {
        self.expect_outcome().expect("expected scheduling to succeed")
    }
}

#[fixture]
fn world() -> ItineraryWorld {
    ItineraryWorld::new()
}

fn stop(name: &str, north_km: f64, east_km: f64) -> PointOfInterest {
    PointOfInterest::new(name, "2 hours").with_coordinate(offset_km(LISBON, north_km, east_km))
}

fn row_stop(index: u8) -> PointOfInterest {
    stop(&format!("Stop {index}"), f64::from(index), 0.0)
}

#[given("a two-day foodie trip to Lisbon with four stops")]
fn given_two_day_trip(world: &ItineraryWorld) {
    let request = TripRequest::new("Lisbon", 2)
        .with_trip_type(TripType::Foodie)
        .with_center(LISBON)
        .with_poi(stop("Belem Tower", -1.0, -5.0))
        .with_poi(stop("Jeronimos Monastery", -0.8, -4.5))
        .with_poi(stop("Alfama", 0.5, 1.0))
        .with_poi(stop("Sao Jorge Castle", 0.7, 0.8));
    world.request.replace(request);
}

#[given("lunch and dinner options near the stops")]
fn given_dining(world: &ItineraryWorld) {
    let dining = [
        ("Pasteis de Belem", MealType::Lunch, -0.9, -4.8),
        ("Taberna da Rua das Flores", MealType::Lunch, 0.2, 0.3),
        ("Cervejaria Ramiro", MealType::Dinner, 0.4, 0.6),
        ("Solar dos Presuntos", MealType::Dinner, 0.1, 0.2),
    ];
    let request = dining.into_iter().fold(
        world.request.borrow().clone(),
        |request, (name, meal_type, north_km, east_km)| {
            request.with_dining(
                DiningOption::new(name, meal_type)
                    .with_coordinate(offset_km(LISBON, north_km, east_km)),
            )
        },
    );
    world.request.replace(request);
}

#[given("a straight-line geo service")]
fn given_straight_line_geo(world: &ItineraryWorld) {
    world
        .geo
        .replace(StraightLineGeoService::new(CITY_SPEED_KMH));
}

#[given("a one-day trip to Lisbon with three stops in a row")]
fn given_row_of_stops(world: &ItineraryWorld) {
    let request = (0..3).fold(
        TripRequest::new("Lisbon", 1).with_center(LISBON),
        |request, index| request.with_poi(row_stop(index)),
    );
    world.request.replace(request);
}

#[given("a geo service that cannot route to the middle stop")]
fn given_unroutable_middle(world: &ItineraryWorld) {
    let blocked = offset_km(LISBON, 1.0, 0.0);
    world
        .geo
        .replace(StraightLineGeoService::new(CITY_SPEED_KMH).with_unroutable(blocked));
}

#[given("a three-day trip to Lisbon with one stop")]
fn given_sparse_trip(world: &ItineraryWorld) {
    world.request.replace(
        TripRequest::new("Lisbon", 3)
            .with_center(LISBON)
            .with_poi(stop("Oceanario", 2.0, 6.0)),
    );
}

#[given("a zero-day trip to Lisbon")]
fn given_zero_day_trip(world: &ItineraryWorld) {
    world.request.replace(TripRequest::new("Lisbon", 0));
}

#[when("the itinerary is scheduled")]
fn when_scheduled(world: &ItineraryWorld) {
    let scheduler = ItineraryScheduler::new(world.geo.borrow().clone());
    let outcome = scheduler.schedule(&world.request.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("every stop is scheduled exactly once")]
fn then_every_stop_once(world: &ItineraryWorld) {
    let plan = world.expect_plan();
    let mut scheduled: Vec<String> = plan
        .activities()
        .filter(|a| !a.activity.is_meal())
        .map(|a| a.activity.name().to_owned())
        .collect();
    let mut requested: Vec<String> = world
        .request
        .borrow()
        .pois
        .iter()
        .map(|poi| poi.name.clone())
        .collect();
    scheduled.sort();
    requested.sort();
    assert_eq!(scheduled, requested);
}

#[then("no dining option is used twice")]
fn then_no_dining_reuse(world: &ItineraryWorld) {
    let plan = world.expect_plan();
    let meals: Vec<&str> = plan
        .activities()
        .filter(|a| a.activity.is_meal())
        .map(|a| a.activity.name())
        .collect();
    let unique: HashSet<&str> = meals.iter().copied().collect();
    assert!(!meals.is_empty(), "expected at least one meal");
    assert_eq!(unique.len(), meals.len());
}

#[then("each day starts at nine")]
fn then_days_start_at_nine(world: &ItineraryWorld) {
    let plan = world.expect_plan();
    for day in &plan.days {
        assert_eq!(
            day.start_time.map(|t| t.to_string()).as_deref(),
            Some("09:00"),
            "day {} starts late",
            day.day_number
        );
    }
}

#[then("the plan warns that travel data is unavailable")]
fn then_distance_warning(world: &ItineraryWorld) {
    let plan = world.expect_plan();
    let unavailable = plan
        .warnings
        .iter()
        .filter(|w| matches!(w, ScheduleWarning::DistanceUnavailable { .. }))
        .count();
    assert_eq!(unavailable, 1);
}

#[then("the last two days are free days")]
fn then_free_days(world: &ItineraryWorld) {
    let plan = world.expect_plan();
    let free: Vec<bool> = plan.days.iter().map(|day| day.free_day).collect();
    assert_eq!(free, [false, true, true]);
}

#[then("scheduling fails with an invalid request")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_invalid_request(world: &ItineraryWorld) {
    let err = world
        .expect_outcome()
        .expect_err("expected InvalidRequest error");
    assert!(matches!(err, ScheduleError::InvalidRequest(_)));
}

#[scenario(path = "tests/features/itinerary.feature", index = 0)]
fn two_day_city_break(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 1)]
fn unroutable_stop(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 2)]
fn more_days_than_stops(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 3)]
fn zero_days(world: ItineraryWorld) {
    let _ = world;
}
