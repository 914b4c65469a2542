//! Trip plan documents produced by a [`Scheduler`](crate::Scheduler).

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{DiningOption, MealType, PointOfInterest, ScheduleWarning, TravelSegment, TripType};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// A time on a trip day, measured in hours from that day's midnight.
///
/// Values of 24 hours or more belong to following calendar days and render
/// with an explicit `Day+N` prefix instead of wrapping into a misleading
/// same-day time. Minutes are rounded to the nearest whole minute.
///
/// # Examples
/// ```
/// use voyager_core::ClockTime;
///
/// assert_eq!(ClockTime::from_hours(9.5).to_string(), "09:30");
/// assert_eq!(ClockTime::from_hours(24.5).to_string(), "Day+1 00:30");
/// assert_eq!(ClockTime::from_hours(49.0).to_string(), "Day+2 01:00");
/// assert!(ClockTime::from_hours(24.5).is_overflow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ClockTime(f64);

impl ClockTime {
    /// Build a clock time from hours since midnight.
    ///
    /// Negative and non-finite inputs clamp to midnight.
    pub fn from_hours(hours: f64) -> Self {
        if hours.is_finite() && hours > 0.0 {
            Self(hours)
        } else {
            Self(0.0)
        }
    }

    /// Hours since the trip day's midnight.
    pub const fn hours(self) -> f64 {
        self.0
    }

    fn total_minutes(self) -> u64 {
        (self.0 * 60.0).round() as u64
    }

    /// Number of whole days past the trip day, after minute rounding.
    pub fn day_offset(self) -> u64 {
        self.total_minutes() / MINUTES_PER_DAY
    }

    /// Whether the time falls on a later calendar day.
    pub fn is_overflow(self) -> bool {
        self.day_offset() > 0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_minutes();
        let offset = total / MINUTES_PER_DAY;
        let within_day = total % MINUTES_PER_DAY;
        let hh = within_day / MINUTES_PER_HOUR;
        let mm = within_day % MINUTES_PER_HOUR;
        if offset == 0 {
            write!(f, "{hh:02}:{mm:02}")
        } else {
            write!(f, "Day+{offset} {hh:02}:{mm:02}")
        }
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What happens at a scheduled slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activity {
    /// A visit to a point of interest.
    Attraction(PointOfInterest),
    /// A meal at a dining option.
    Meal {
        /// The meal the slot was scheduled as.
        meal_type: MealType,
        /// Where the meal takes place.
        option: DiningOption,
    },
}

impl Activity {
    /// Name of the attraction or restaurant.
    pub fn name(&self) -> &str {
        match self {
            Self::Attraction(poi) => &poi.name,
            Self::Meal { option, .. } => &option.name,
        }
    }

    /// Whether this slot is a meal.
    pub const fn is_meal(&self) -> bool {
        matches!(self, Self::Meal { .. })
    }
}

/// An activity placed on the day's clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledActivity {
    /// Start of the activity.
    pub scheduled_time: ClockTime,
    /// The attraction or meal.
    pub activity: Activity,
    /// Time spent at the activity, excluding buffers and travel.
    pub duration_hours: f64,
    /// Free-text notes, e.g. the preferred time of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Leg travelled to reach a meal from the previous stop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_in: Option<TravelSegment>,
    /// Leg travelled after this activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_to_next: Option<TravelSegment>,
}

impl ScheduledActivity {
    /// Time the activity ends, ignoring onward travel.
    pub fn end_time(&self) -> ClockTime {
        ClockTime::from_hours(self.scheduled_time.hours() + self.duration_hours)
    }
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    /// One-based day number.
    pub day_number: u32,
    /// Headline for the day.
    pub theme: String,
    /// Activities in chronological order.
    pub activities: Vec<ScheduledActivity>,
    /// Number of attraction slots.
    pub total_attractions: usize,
    /// Number of meal slots.
    pub total_meals: usize,
    /// Hours spent travelling between activities.
    pub total_travel_hours: f64,
    /// Start of the first activity.
    pub start_time: Option<ClockTime>,
    /// End of the last activity.
    pub end_time: Option<ClockTime>,
    /// Whether nothing could be scheduled.
    pub free_day: bool,
    /// Degraded outcomes for this day.
    pub warnings: Vec<ScheduleWarning>,
}

/// Aggregate figures across the trip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TripTotals {
    /// Attraction slots across all days.
    pub attractions: usize,
    /// Meal slots across all days.
    pub meals: usize,
    /// Travel hours across all days.
    pub travel_hours: f64,
}

/// The complete day-by-day itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    /// Destination the plan was built for.
    pub destination: String,
    /// Trip style.
    pub trip_type: TripType,
    /// Days in order.
    pub days: Vec<DaySchedule>,
    /// Aggregate figures.
    pub totals: TripTotals,
    /// Flat list of all warnings, trip-level first, then per day.
    pub warnings: Vec<ScheduleWarning>,
}

impl TripPlan {
    /// Iterate every scheduled activity across all days.
    pub fn activities(&self) -> impl Iterator<Item = &ScheduledActivity> {
        self.days.iter().flat_map(|day| day.activities.iter())
    }
}
