//! Assemble day and trip records from simulated activities.

#![expect(clippy::float_arithmetic, reason = "travel totals sum fractional hours")]

use voyager_core::{
    ClockTime, DaySchedule, ScheduleWarning, ScheduledActivity, TravelSegment, TripPlan,
    TripTotals, TripType,
};

use crate::clock::DayOutcome;

/// Headline for a day, e.g. `Day 2 - Foodie Experience`.
#[must_use]
pub fn day_theme(day_number: u32, trip_type: TripType) -> String {
    format!("Day {day_number} - {trip_type} Experience")
}

/// Build the record for one day.
///
/// Counts attractions and meals, sums the hours of every leg travelled (each
/// leg is counted once, from the activity it departs), and derives start and
/// end times. A day whose clock ran past midnight gets one
/// [`ScheduleWarning::ScheduleOverflow`]; a day with no activities is marked
/// as a free day with [`ScheduleWarning::EmptyDay`].
///
/// # Examples
/// ```
/// use voyager_core::{ScheduleWarning, TripType};
/// use voyager_scheduler::{DayOutcome, format_day};
///
/// let day = format_day(3, TripType::Relaxation, DayOutcome::default());
/// assert!(day.free_day);
/// assert_eq!(day.theme, "Day 3 - Relaxation Experience");
/// assert_eq!(day.warnings, vec![ScheduleWarning::EmptyDay { day: 3 }]);
/// ```
#[must_use]
pub fn format_day(day_number: u32, trip_type: TripType, outcome: DayOutcome) -> DaySchedule {
    let DayOutcome {
        activities,
        mut warnings,
    } = outcome;
    let theme = day_theme(day_number, trip_type);

    if activities.is_empty() {
        log::info!("day {day_number} has no activities; marking as free day");
        warnings.push(ScheduleWarning::EmptyDay { day: day_number });
        return DaySchedule {
            day_number,
            theme,
            activities,
            total_attractions: 0,
            total_meals: 0,
            total_travel_hours: 0.0,
            start_time: None,
            end_time: None,
            free_day: true,
            warnings,
        };
    }

    let total_meals = activities.iter().filter(|a| a.activity.is_meal()).count();
    let total_travel_hours = activities
        .iter()
        .filter_map(|a| a.travel_to_next)
        .filter(TravelSegment::is_available)
        .map(|segment| segment.duration_hours)
        .sum();
    let start_time = activities.first().map(|a| a.scheduled_time);
    let end_time = activities.last().map(ScheduledActivity::end_time);

    let overflowed = end_time.is_some_and(ClockTime::is_overflow)
        || activities.iter().any(|a| a.scheduled_time.is_overflow());
    if let Some(end) = end_time.filter(|_| overflowed) {
        warnings.push(ScheduleWarning::ScheduleOverflow {
            day: day_number,
            end_time: end,
        });
    }

    DaySchedule {
        day_number,
        theme,
        total_attractions: activities.len() - total_meals,
        total_meals,
        total_travel_hours,
        start_time,
        end_time,
        free_day: false,
        activities,
        warnings,
    }
}

/// Build the trip record from formatted days.
///
/// `preparation` holds warnings raised before any day was simulated, such as
/// geocoding failures; they lead the flat warning list, followed by each
/// day's warnings in day order.
#[must_use]
pub fn format_trip(
    destination: &str,
    trip_type: TripType,
    days: Vec<DaySchedule>,
    preparation: Vec<ScheduleWarning>,
) -> TripPlan {
    let totals = days.iter().fold(TripTotals::default(), |acc, day| TripTotals {
        attractions: acc.attractions + day.total_attractions,
        meals: acc.meals + day.total_meals,
        travel_hours: acc.travel_hours + day.total_travel_hours,
    });
    let mut warnings = preparation;
    warnings.extend(days.iter().flat_map(|day| day.warnings.iter().cloned()));
    TripPlan {
        destination: destination.to_owned(),
        trip_type,
        days,
        totals,
        warnings,
    }
}
