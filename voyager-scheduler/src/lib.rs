//! Itinerary scheduling engine for Voyager.
//!
//! This crate provides [`ItineraryScheduler`], the default implementation of
//! the [`Scheduler`](voyager_core::Scheduler) trait. It turns recommender
//! candidates into a day-by-day plan in five steps:
//!
//! - geocode missing coordinates and drop implausible ones
//!   ([`validate_against_center`], [`filter_for_single_day_trip`]);
//! - split stops into day buckets ([`split_into_days`]);
//! - order each day's stops by greedy nearest neighbour ([`order_stops`]);
//! - walk each day on a clock, inserting meals as they fall due
//!   ([`TimeSimulator`], [`MealPlanner`]);
//! - assemble day and trip records with totals and warnings
//!   ([`format_day`], [`format_trip`]).
//!
//! All external lookups go through a [`GeoService`](voyager_core::GeoService);
//! failures degrade the plan with warnings instead of aborting it.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
mod config;
mod formatter;
mod geo_validator;
mod meals;
mod route;
mod scheduler;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use clock::{
    DEFAULT_DURATION_HOURS, DayClock, DayOutcome, LegBounds, TimeSimulator, format_time,
    parse_duration,
};
pub use config::SchedulerConfig;
pub use formatter::{day_theme, format_day, format_trip};
pub use geo_validator::{
    EARTH_RADIUS_KM, Located, filter_for_single_day_trip, haversine_distance_km, median_center,
    validate_against_center,
};
pub use meals::{
    DayMeals, MealChoice, MealPlanner, UsedDining, meal_candidates, meal_due, meal_start,
};
pub use route::order_stops;
pub use scheduler::{ItineraryScheduler, split_into_days};
