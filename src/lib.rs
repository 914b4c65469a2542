//! Facade crate for the Voyager itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the scheduling
//! engine and the OpenRouteService geo client behind feature flags.

#![forbid(unsafe_code)]

pub use voyager_core::{
    Accommodation, Activity, ClockTime, Coordinate, DaySchedule, DiningOption, GeoError,
    GeoService, GeocodeFocus, MealType, PointOfInterest, ScheduleError, ScheduleWarning,
    ScheduledActivity, Scheduler, SegmentStatus, TravelProfile, TravelSegment, TripPlan,
    TripRequest, TripRequestValidationError, TripTotals, TripType,
};

#[cfg(feature = "scheduler")]
pub use voyager_scheduler::{ItineraryScheduler, SchedulerConfig};

#[cfg(feature = "geo-ors")]
pub use voyager_data::ors::{OrsConfig, OrsGeoService, ProviderBuildError};
