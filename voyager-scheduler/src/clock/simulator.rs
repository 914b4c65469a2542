//! Walks one day's ordered stops, placing attractions and meals on the clock.

use voyager_core::{
    Activity, Coordinate, DiningOption, GeoService, PointOfInterest, ScheduleWarning,
    ScheduledActivity, TravelProfile, TravelSegment,
};

use super::{DayClock, LegBounds, parse_duration};
use crate::SchedulerConfig;
use crate::geo_validator::haversine_distance_km;
use crate::meals::{DayMeals, MealChoice, MealPlanner, UsedDining, meal_due, meal_start};

/// Activities and warnings produced for one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayOutcome {
    /// Activities in chronological order.
    pub activities: Vec<ScheduledActivity>,
    /// Travel warnings raised while walking the day.
    pub warnings: Vec<ScheduleWarning>,
}

/// A travel leg after sanity checks: the usable segment, or why there is none.
#[derive(Debug, Default)]
struct LegOutcome {
    segment: Option<TravelSegment>,
    warning: Option<ScheduleWarning>,
}

impl LegOutcome {
    const fn accepted(segment: TravelSegment) -> Self {
        Self {
            segment: Some(segment),
            warning: None,
        }
    }

    const fn rejected(warning: ScheduleWarning) -> Self {
        Self {
            segment: None,
            warning: Some(warning),
        }
    }

    fn hours(&self) -> f64 {
        self.segment.map_or(0.0, |segment| segment.duration_hours)
    }

    /// Apply the leg to the clock and keep its warning.
    fn commit(
        self,
        clock: &mut DayClock,
        warnings: &mut Vec<ScheduleWarning>,
    ) -> Option<TravelSegment> {
        if let Some(segment) = &self.segment {
            clock.travel(segment);
        }
        warnings.extend(self.warning);
        self.segment
    }
}

/// Simulates the clock through a day, inserting meals as they fall due.
///
/// Each stop is scheduled at the current time, then the clock advances by
/// its parsed duration and the buffer. Travel to the next stop is looked up
/// through the geo service and applied only when it passes the leg bounds.
/// Before moving on, the meal rules are evaluated at the expected arrival
/// time. A chosen meal replaces the direct leg with a detour through the
/// restaurant, starting when the diner gets there or when the meal window
/// opens, whichever is later. A detour that would miss the window keeps the
/// direct leg instead.
#[derive(Debug)]
pub struct TimeSimulator<'a, G: ?Sized> {
    geo: &'a G,
    config: &'a SchedulerConfig,
    profile: TravelProfile,
}

impl<'a, G> TimeSimulator<'a, G>
where
    G: GeoService + ?Sized,
{
    /// Build a simulator issuing lookups through `geo`.
    pub const fn new(geo: &'a G, config: &'a SchedulerConfig, profile: TravelProfile) -> Self {
        Self {
            geo,
            config,
            profile,
        }
    }

    const fn bounds(&self) -> LegBounds {
        LegBounds {
            max_km: self.config.max_leg_km,
            max_hours: self.config.max_leg_hours,
        }
    }

    /// Schedule `stops` in order for day `day_number`.
    ///
    /// `home` stands in for the current location when a stop has no
    /// coordinate. Dining options are drawn from `dining` and recorded in
    /// `used`, which is returned for the next day.
    pub fn simulate_day(
        &self,
        day_number: u32,
        stops: &[PointOfInterest],
        dining: &[DiningOption],
        home: Option<Coordinate>,
        mut used: UsedDining,
    ) -> (DayOutcome, UsedDining) {
        let mut clock = DayClock::new(self.config.day_start_hour, self.config.buffer_hours);
        let mut served = DayMeals::default();
        let mut outcome = DayOutcome::default();
        let planner = MealPlanner::new(self.geo, self.profile);

        for (index, stop) in stops.iter().enumerate() {
            let scheduled_time = clock.now();
            let duration_hours = parse_duration(&stop.duration);
            clock.spend(duration_hours);

            let next = index.checked_add(1).and_then(|i| stops.get(i));
            let outbound = next.map_or_else(LegOutcome::default, |following| {
                self.plan_leg(&stop.name, stop.coordinate, &following.name, following.coordinate)
            });
            let due_at = clock.hours() + outbound.hours();
            let meal_choice = meal_due(due_at, next.is_none(), served)
                .and_then(|meal_type| {
                    let from = stop.coordinate.or(home)?;
                    planner.choose(meal_type, from, dining, &used)
                });

            let mut attraction = ScheduledActivity {
                scheduled_time,
                activity: Activity::Attraction(stop.clone()),
                duration_hours,
                notes: Some(format!("Best time: {}", stop.best_time)),
                travel_in: None,
                travel_to_next: None,
            };
            let Some(choice) = meal_choice else {
                attraction.travel_to_next = outbound.commit(&mut clock, &mut outcome.warnings);
                outcome.activities.push(attraction);
                continue;
            };

            let approach = self.admit(&stop.name, &choice.option.name, choice.approach);
            let arrival = clock.hours() + approach.hours();
            let Some(start) =
                meal_start(choice.meal_type, arrival, due_at, next.is_none(), served)
            else {
                log::debug!(
                    "day {day_number}: {} at {} would fall outside its window; keeping the direct leg",
                    choice.meal_type,
                    choice.option.name
                );
                attraction.travel_to_next = outbound.commit(&mut clock, &mut outcome.warnings);
                outcome.activities.push(attraction);
                continue;
            };
            attraction.travel_to_next = approach.commit(&mut clock, &mut outcome.warnings);
            clock.wait_until(start);
            let travel_in = attraction.travel_to_next;
            outcome.activities.push(attraction);

            let meal = self.serve_meal(choice, next, travel_in, &mut clock, &mut outcome.warnings);
            if let Activity::Meal { meal_type, option } = &meal.activity {
                log::info!(
                    "day {day_number}: {meal_type} at {} ({})",
                    option.name,
                    meal.scheduled_time
                );
                used.mark(&option.name);
                served.serve(*meal_type);
            }
            outcome.activities.push(meal);
        }

        if clock.overflowed() {
            log::info!("day {day_number} runs past midnight; clock ends at {}", clock.now());
        }
        (outcome, used)
    }

    fn serve_meal(
        &self,
        choice: MealChoice,
        next: Option<&PointOfInterest>,
        travel_in: Option<TravelSegment>,
        clock: &mut DayClock,
        warnings: &mut Vec<ScheduleWarning>,
    ) -> ScheduledActivity {
        let scheduled_time = clock.now();
        clock.spend(self.config.meal_hours);
        let onward = next.map_or_else(LegOutcome::default, |following| {
            self.plan_leg(
                &choice.option.name,
                choice.option.coordinate,
                &following.name,
                following.coordinate,
            )
        });
        let travel_to_next = onward.commit(clock, warnings);
        ScheduledActivity {
            scheduled_time,
            duration_hours: self.config.meal_hours,
            notes: choice
                .option
                .must_try
                .as_ref()
                .map(|dish| format!("Must try: {dish}")),
            activity: Activity::Meal {
                meal_type: choice.meal_type,
                option: choice.option,
            },
            travel_in,
            travel_to_next,
        }
    }

    /// Look up the leg between two named points.
    ///
    /// Legs with a missing endpoint are silently skipped; the missing
    /// coordinate has been reported during geocoding.
    fn plan_leg(
        &self,
        from_name: &str,
        from: Option<Coordinate>,
        to_name: &str,
        to: Option<Coordinate>,
    ) -> LegOutcome {
        let (Some(origin), Some(destination)) = (from, to) else {
            return LegOutcome::default();
        };
        let straight_km = haversine_distance_km(origin, destination);
        if straight_km > self.config.max_leg_km {
            log::warn!(
                "not routing {from_name} -> {to_name}: {straight_km:.1} km apart exceeds {:.0} km",
                self.config.max_leg_km
            );
            return LegOutcome::rejected(ScheduleWarning::ImplausibleDistance {
                from: from_name.to_owned(),
                to: to_name.to_owned(),
                distance_km: straight_km,
                duration_hours: 0.0,
            });
        }
        match self.geo.distance(origin, &[destination], self.profile) {
            Ok(segments) => match segments.first() {
                Some(segment) if segment.is_available() => self.admit(from_name, to_name, *segment),
                _ => {
                    log::warn!("no route from {from_name} to {to_name}");
                    LegOutcome::rejected(ScheduleWarning::DistanceUnavailable {
                        from: from_name.to_owned(),
                        to: to_name.to_owned(),
                        reason: "no route found".to_owned(),
                    })
                }
            },
            Err(err) => {
                log::warn!("distance lookup {from_name} -> {to_name} failed: {err}");
                LegOutcome::rejected(ScheduleWarning::DistanceUnavailable {
                    from: from_name.to_owned(),
                    to: to_name.to_owned(),
                    reason: err.to_string(),
                })
            }
        }
    }

    fn admit(&self, from_name: &str, to_name: &str, segment: TravelSegment) -> LegOutcome {
        if self.bounds().admits(&segment) {
            return LegOutcome::accepted(segment);
        }
        log::warn!(
            "discarding leg {from_name} -> {to_name}: {:.1} km, {:.2} h exceeds bounds",
            segment.distance_km,
            segment.duration_hours
        );
        LegOutcome::rejected(ScheduleWarning::ImplausibleDistance {
            from: from_name.to_owned(),
            to: to_name.to_owned(),
            distance_km: segment.distance_km,
            duration_hours: segment.duration_hours,
        })
    }
}
