//! Non-fatal scheduling outcomes.

use serde::Serialize;
use thiserror::Error;

use crate::ClockTime;

/// A degraded outcome recorded on a day or trip instead of failing it.
///
/// Every variant describes data that was missing, rejected or dropped; the
/// schedule is still produced.
///
/// # Examples
/// ```
/// use voyager_core::ScheduleWarning;
///
/// let warning = ScheduleWarning::EmptyDay { day: 3 };
/// assert_eq!(warning.to_string(), "day 3 has no scheduled activities (free day)");
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// No coordinate could be obtained for a stop or dining option.
    #[error("no coordinate for {name}; scheduling it without location data")]
    GeocodeUnavailable {
        /// Stop or dining option name.
        name: String,
    },

    /// A geocoded coordinate lay implausibly far from the trip centre.
    #[error("rejected coordinate for {name}: {distance_km:.1} km from centre exceeds {max_km:.0} km")]
    GeocodeRejected {
        /// Stop or dining option name.
        name: String,
        /// Distance from the trip centre.
        distance_km: f64,
        /// Permitted radius.
        max_km: f64,
    },

    /// A stop was dropped from a single-day trip.
    #[error("excluded {name} from the day trip: {reason}")]
    ExcludedFromDayTrip {
        /// Stop name.
        name: String,
        /// Why the stop was excluded.
        reason: String,
    },

    /// A stop without a coordinate was kept on a single-day trip.
    #[error("kept {name} on the day trip without a verified location")]
    KeptWithoutCoordinate {
        /// Stop name.
        name: String,
    },

    /// A travel segment lookup failed; the leg adds no travel time.
    #[error("no travel data from {from} to {to}: {reason}")]
    DistanceUnavailable {
        /// Origin name.
        from: String,
        /// Destination name.
        to: String,
        /// Failure description.
        reason: String,
    },

    /// A travel segment exceeded the sanity bounds and was discarded.
    #[error("discarded implausible leg from {from} to {to} ({distance_km:.1} km, {duration_hours:.2} h)")]
    ImplausibleDistance {
        /// Origin name.
        from: String,
        /// Destination name.
        to: String,
        /// Reported or straight-line distance.
        distance_km: f64,
        /// Reported travel time, zero when the leg was never requested.
        duration_hours: f64,
    },

    /// A day's schedule runs past midnight.
    #[error("day {day} overflows past midnight; schedule ends at {end_time}")]
    ScheduleOverflow {
        /// One-based day number.
        day: u32,
        /// End of the last activity.
        end_time: ClockTime,
    },

    /// No stops remained for a day.
    #[error("day {day} has no scheduled activities (free day)")]
    EmptyDay {
        /// One-based day number.
        day: u32,
    },
}
