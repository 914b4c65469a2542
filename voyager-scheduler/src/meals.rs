//! Meal insertion rules and dining option selection.

#![expect(
    clippy::float_arithmetic,
    reason = "meal windows compare fractional clock hours"
)]

use std::collections::HashSet;

use voyager_core::{Coordinate, DiningOption, GeoService, MealType, TravelProfile, TravelSegment};

const LUNCH_OPENS: f64 = 11.5;
const LUNCH_CLOSES: f64 = 14.0;
const DINNER_OPENS: f64 = 17.5;
const DINNER_CLOSES: f64 = 20.0;
const DINNER_EARLIEST: f64 = 17.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Names of dining options already scheduled on this trip.
///
/// Threaded by value through the day fold so each option is used at most
/// once across the whole plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedDining(HashSet<String>);

impl UsedDining {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has been scheduled.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Record `name` as scheduled. Returns `false` if it already was.
    pub fn mark(&mut self, name: &str) -> bool {
        self.0.insert(name.to_owned())
    }

    /// Number of options scheduled so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Meals already placed on the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMeals {
    /// Lunch has been scheduled.
    pub lunch: bool,
    /// Dinner has been scheduled.
    pub dinner: bool,
}

impl DayMeals {
    /// Record `meal_type` as served.
    pub const fn serve(&mut self, meal_type: MealType) {
        match meal_type {
            MealType::Lunch => self.lunch = true,
            MealType::Dinner => self.dinner = true,
            MealType::Breakfast => {}
        }
    }
}

/// Decide which meal, if any, is due at `cursor`.
///
/// Lunch is due between 11:30 and 14:00. Dinner is due between 17:30 and
/// 20:00, or after the day's last stop once it is past 17:00. Each meal is
/// served at most once per day and lunch wins when both apply.
///
/// # Examples
/// ```
/// use voyager_core::MealType;
/// use voyager_scheduler::{DayMeals, meal_due};
///
/// assert_eq!(meal_due(12.25, false, DayMeals::default()), Some(MealType::Lunch));
/// assert_eq!(meal_due(16.0, false, DayMeals::default()), None);
/// assert_eq!(meal_due(21.0, true, DayMeals::default()), Some(MealType::Dinner));
/// ```
#[must_use]
pub fn meal_due(cursor: f64, is_last_stop: bool, served: DayMeals) -> Option<MealType> {
    let effective = cursor.rem_euclid(HOURS_PER_DAY);
    if !served.lunch && (LUNCH_OPENS..LUNCH_CLOSES).contains(&effective) {
        return Some(MealType::Lunch);
    }
    let in_window = (DINNER_OPENS..DINNER_CLOSES).contains(&effective);
    let dinner = !served.dinner && effective > DINNER_EARLIEST && (in_window || is_last_stop);
    dinner.then_some(MealType::Dinner)
}

const fn window_opens(meal_type: MealType) -> Option<f64> {
    match meal_type {
        MealType::Lunch => Some(LUNCH_OPENS),
        MealType::Dinner => Some(DINNER_OPENS),
        MealType::Breakfast => None,
    }
}

/// When a meal decided for `due_at` can actually be served.
///
/// `arrival` is when the diner reaches the restaurant. A meal already inside
/// its window starts on arrival. Arriving before the window opens means
/// waiting for the opening, provided that is no later than `due_at`.
/// Otherwise the window has been missed and `None` is returned.
///
/// # Examples
/// ```
/// use voyager_core::MealType;
/// use voyager_scheduler::{DayMeals, meal_start};
///
/// let served = DayMeals::default();
/// assert_eq!(meal_start(MealType::Lunch, 12.0, 12.5, false, served), Some(12.0));
/// assert_eq!(meal_start(MealType::Lunch, 11.3, 11.75, false, served), Some(11.5));
/// assert_eq!(meal_start(MealType::Lunch, 14.2, 13.5, false, served), None);
/// ```
#[must_use]
pub fn meal_start(
    meal_type: MealType,
    arrival: f64,
    due_at: f64,
    is_last_stop: bool,
    served: DayMeals,
) -> Option<f64> {
    if meal_due(arrival, is_last_stop, served) == Some(meal_type) {
        return Some(arrival);
    }
    let effective = arrival.rem_euclid(HOURS_PER_DAY);
    let opens = window_opens(meal_type)?;
    let opening = arrival - effective + opens;
    (effective < opens && opening <= due_at).then_some(opening)
}

/// Unused options suitable for `meal_type`, with their coordinates.
///
/// Falls back to any unused located option when none match the meal type.
#[must_use]
pub fn meal_candidates<'a>(
    meal_type: MealType,
    options: &'a [DiningOption],
    used: &UsedDining,
) -> Vec<(&'a DiningOption, Coordinate)> {
    let located = || {
        options
            .iter()
            .filter(|option| !used.contains(&option.name))
            .filter_map(|option| option.coordinate.map(|c| (option, c)))
    };
    let matching: Vec<_> = located()
        .filter(|(option, _)| option.meal_type == meal_type)
        .collect();
    if matching.is_empty() {
        located().collect()
    } else {
        matching
    }
}

/// The option picked for a meal and the leg to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct MealChoice {
    /// Selected dining option.
    pub option: DiningOption,
    /// Meal it is scheduled as.
    pub meal_type: MealType,
    /// Leg from the current location to the option.
    pub approach: TravelSegment,
}

/// Picks the nearest unused dining option for a meal.
#[derive(Debug)]
pub struct MealPlanner<'a, G: ?Sized> {
    geo: &'a G,
    profile: TravelProfile,
}

impl<'a, G> MealPlanner<'a, G>
where
    G: GeoService + ?Sized,
{
    /// Build a planner issuing lookups through `geo`.
    pub const fn new(geo: &'a G, profile: TravelProfile) -> Self {
        Self { geo, profile }
    }

    /// Choose the nearest routable candidate for `meal_type` from `from`.
    ///
    /// All candidates are measured with a single `distance` call. Options
    /// the service cannot route are skipped; ties go to the earlier option.
    /// Returns `None` when nothing is usable.
    pub fn choose(
        &self,
        meal_type: MealType,
        from: Coordinate,
        options: &[DiningOption],
        used: &UsedDining,
    ) -> Option<MealChoice> {
        let candidates = meal_candidates(meal_type, options, used);
        if candidates.is_empty() {
            log::debug!("no unused dining option with a location for {meal_type}");
            return None;
        }
        let destinations: Vec<Coordinate> = candidates.iter().map(|(_, c)| *c).collect();
        let segments = match self.geo.distance(from, &destinations, self.profile) {
            Ok(segments) => segments,
            Err(err) => {
                log::warn!("skipping {meal_type}: distance lookup failed: {err}");
                return None;
            }
        };
        let choice = candidates
            .into_iter()
            .zip(segments)
            .filter(|(_, segment)| segment.is_available())
            .min_by(|(_, lhs), (_, rhs)| lhs.distance_km.total_cmp(&rhs.distance_km))
            .map(|((option, _), approach)| MealChoice {
                option: option.clone(),
                meal_type,
                approach,
            });
        if choice.is_none() {
            log::debug!("skipping {meal_type}: no dining option is reachable");
        }
        choice
    }
}
