//! Day clock simulation.
//!
//! A [`DayClock`] carries the running time through a day's stops. Durations
//! arrive as free text from the recommender and are parsed leniently by
//! [`parse_duration`]; travel legs are checked against [`LegBounds`] before
//! they may move the clock.

#![expect(
    clippy::float_arithmetic,
    reason = "the day clock is measured in fractional hours"
)]

mod simulator;

pub use simulator::{DayOutcome, TimeSimulator};

use voyager_core::{ClockTime, TravelSegment};

/// Duration assumed when the text cannot be parsed.
pub const DEFAULT_DURATION_HOURS: f64 = 2.0;

const HALF_DAY_HOURS: f64 = 4.0;
const FULL_DAY_HOURS: f64 = 8.0;

/// Parse a free-text visit duration into hours.
///
/// Recognises `"half day"` (4 h), `"full day"` (8 h), and a leading number
/// optionally written as a range, of which the lower bound is used. A number
/// followed by a minute unit is converted to hours. Anything else yields
/// [`DEFAULT_DURATION_HOURS`]. Never fails.
///
/// # Examples
/// ```
/// use voyager_scheduler::parse_duration;
///
/// assert_eq!(parse_duration("half day"), 4.0);
/// assert_eq!(parse_duration("2-3 hours"), 2.0);
/// assert_eq!(parse_duration("45 minutes"), 0.75);
/// assert_eq!(parse_duration("garbage"), 2.0);
/// ```
#[must_use]
pub fn parse_duration(text: &str) -> f64 {
    let normalised = text.trim().to_lowercase();
    if normalised.contains("half day") || normalised.contains("half-day") {
        return HALF_DAY_HOURS;
    }
    if normalised.contains("full day") || normalised.contains("full-day") {
        return FULL_DAY_HOURS;
    }
    leading_quantity(&normalised).unwrap_or_else(|| {
        log::debug!("unparsable duration {text:?}; assuming {DEFAULT_DURATION_HOURS} hours");
        DEFAULT_DURATION_HOURS
    })
}

fn leading_quantity(text: &str) -> Option<f64> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next()?;
    let lower_bound = first.split(['-', '–']).next()?;
    let digits_end = lower_bound
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lower_bound.len());
    let (number, _) = lower_bound.split_at(digits_end);
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let upper_bound = first.rsplit(['-', '–']).next().unwrap_or(first);
    let unit = match upper_bound.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.') {
        "" => tokens.next().unwrap_or_default(),
        attached => attached,
    };
    if unit.starts_with("min") {
        Some(value / 60.0)
    } else {
        Some(value)
    }
}

/// Render hours since the day's midnight as `HH:MM` or `Day+N HH:MM`.
///
/// # Examples
/// ```
/// use voyager_scheduler::format_time;
///
/// assert_eq!(format_time(13.25), "13:15");
/// assert_eq!(format_time(23.5 + 1.0), "Day+1 00:30");
/// ```
#[must_use]
pub fn format_time(hours: f64) -> String {
    ClockTime::from_hours(hours).to_string()
}

/// Upper bounds a travel leg must respect before it advances the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegBounds {
    /// Longest plausible leg distance.
    pub max_km: f64,
    /// Longest plausible leg duration.
    pub max_hours: f64,
}

impl LegBounds {
    /// Whether `segment` is usable and within both bounds.
    #[must_use]
    pub fn admits(&self, segment: &TravelSegment) -> bool {
        segment.is_available()
            && segment.distance_km <= self.max_km
            && segment.duration_hours <= self.max_hours
    }
}

/// Running clock for one day.
///
/// # Examples
/// ```
/// use voyager_scheduler::DayClock;
///
/// let mut clock = DayClock::new(23.5, 0.0);
/// clock.spend(1.0);
/// assert_eq!(clock.now().to_string(), "Day+1 00:30");
/// assert!(clock.overflowed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayClock {
    cursor: f64,
    buffer_hours: f64,
    overflowed: bool,
}

impl DayClock {
    /// Start a clock at `start_hour` with `buffer_hours` after each activity.
    #[must_use]
    pub fn new(start_hour: f64, buffer_hours: f64) -> Self {
        let mut clock = Self {
            cursor: start_hour.max(0.0),
            buffer_hours: buffer_hours.max(0.0),
            overflowed: false,
        };
        clock.note_overflow();
        clock
    }

    /// Current time in hours since midnight.
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.cursor
    }

    /// Current time.
    #[must_use]
    pub fn now(&self) -> ClockTime {
        ClockTime::from_hours(self.cursor)
    }

    /// Whether the clock reads as a later calendar day.
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Spend `hours` at an activity, followed by the buffer.
    pub fn spend(&mut self, hours: f64) {
        self.advance(hours.max(0.0) + self.buffer_hours);
    }

    /// Travel along `segment`; unavailable segments leave the clock alone.
    pub fn travel(&mut self, segment: &TravelSegment) {
        if segment.is_available() {
            self.advance(segment.duration_hours.max(0.0));
        }
    }

    /// Idle until `hours`. Targets already passed leave the clock alone and
    /// no buffer is added.
    pub fn wait_until(&mut self, hours: f64) {
        if hours > self.cursor {
            self.advance(hours - self.cursor);
        }
    }

    fn advance(&mut self, hours: f64) {
        self.cursor += hours;
        self.note_overflow();
    }

    fn note_overflow(&mut self) {
        if !self.overflowed && self.now().is_overflow() {
            log::debug!("day clock passed midnight at {}", self.now());
            self.overflowed = true;
        }
    }
}
