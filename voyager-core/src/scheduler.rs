use thiserror::Error;

use crate::{TripPlan, TripRequest, TripRequestValidationError};

/// Errors returned by [`Scheduler::schedule`].
///
/// Missing coordinates, failed lookups and overflowing days are not errors;
/// they surface as [`ScheduleWarning`](crate::ScheduleWarning) values on the
/// plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Request parameters were invalid, e.g. zero days.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] TripRequestValidationError),
}

/// Turn a trip request into a day-by-day plan.
///
/// Implementations should return [`ScheduleError::InvalidRequest`] for
/// invalid parameters rather than panicking, and degrade gracefully when
/// geo data is missing.
pub trait Scheduler {
    /// Schedule a request, producing a plan or an error.
    fn schedule(&self, request: &TripRequest) -> Result<TripPlan, ScheduleError>;
}
