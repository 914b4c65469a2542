//! Core domain types for the Voyager itinerary engine.
//!
//! The crate defines the records exchanged between the scheduling engine and
//! its collaborators: candidate [`PointOfInterest`] and [`DiningOption`]
//! values coming from the content recommender, [`TravelSegment`] values
//! produced by a [`GeoService`], and the [`TripPlan`] document handed to front
//! ends. Non-fatal scheduling outcomes are modelled as [`ScheduleWarning`]
//! values rather than errors.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinate;
mod dining;
pub mod geo_service;
mod plan;
mod poi;
mod request;
mod scheduler;
mod travel;
mod warning;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use coordinate::Coordinate;
pub use dining::{DiningOption, MealType, ParseMealTypeError};
pub use geo_service::{GeoError, GeoService, GeocodeFocus};
pub use plan::{Activity, ClockTime, DaySchedule, ScheduledActivity, TripPlan, TripTotals};
pub use poi::PointOfInterest;
pub use request::{Accommodation, TripRequest, TripRequestValidationError, TripType};
pub use scheduler::{ScheduleError, Scheduler};
pub use travel::{ParseTravelProfileError, SegmentStatus, TravelProfile, TravelSegment};
pub use warning::ScheduleWarning;
