//! `ItineraryScheduler`: the end-to-end scheduling pipeline.
//!
//! Geocodes missing coordinates, validates them against the trip centre,
//! splits stops into day buckets and folds over the days in order, threading
//! the set of used dining options from one day to the next.

use voyager_core::{
    Coordinate, DiningOption, GeoService, GeocodeFocus, PointOfInterest, ScheduleError,
    ScheduleWarning, Scheduler, TripPlan, TripRequest,
};

use crate::SchedulerConfig;
use crate::clock::TimeSimulator;
use crate::formatter::{format_day, format_trip};
use crate::geo_validator::{
    Located, filter_for_single_day_trip, median_center, validate_against_center,
};
use crate::meals::UsedDining;
use crate::route::order_stops;

/// Split `pois` into `days` consecutive buckets.
///
/// Each day takes `max(1, len / days)` stops in input order and the last day
/// takes whatever remains. Days past the end of the list are empty.
///
/// # Examples
/// ```
/// use voyager_scheduler::split_into_days;
///
/// let buckets = split_into_days(vec![1, 2, 3, 4, 5], 2);
/// assert_eq!(buckets, vec![vec![1, 2], vec![3, 4, 5]]);
///
/// let sparse = split_into_days(vec![1], 3);
/// assert_eq!(sparse, vec![vec![1], vec![], vec![]]);
/// ```
#[must_use]
pub fn split_into_days<T>(pois: Vec<T>, days: u32) -> Vec<Vec<T>> {
    let day_count = usize::try_from(days).unwrap_or(usize::MAX);
    let per_day = pois.len().checked_div(day_count).unwrap_or(0).max(1);
    let mut remaining = pois.into_iter();
    let mut buckets: Vec<Vec<T>> = Vec::with_capacity(day_count);
    for day in 1..=day_count {
        if day == day_count {
            buckets.push(remaining.by_ref().collect());
        } else {
            buckets.push(remaining.by_ref().take(per_day).collect());
        }
    }
    buckets
}

/// Scheduler combining recommender candidates with geo data into a plan.
///
/// # Examples
/// ```
/// use voyager_core::test_support::StubGeoService;
/// use voyager_core::{Coordinate, PointOfInterest, Scheduler, TravelSegment, TripRequest};
/// use voyager_scheduler::ItineraryScheduler;
///
/// let geo = StubGeoService::new().with_default_segment(TravelSegment::ok(1.0, 0.25));
/// let scheduler = ItineraryScheduler::new(geo);
/// let request = TripRequest::new("Porto", 1)
///     .with_center(Coordinate::new(41.15, -8.61))
///     .with_poi(
///         PointOfInterest::new("Livraria Lello", "1 hour")
///             .with_coordinate(Coordinate::new(41.1469, -8.6149)),
///     );
/// let plan = scheduler.schedule(&request)?;
/// assert_eq!(plan.totals.attractions, 1);
/// # Ok::<(), voyager_core::ScheduleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryScheduler<G> {
    geo: G,
    config: SchedulerConfig,
}

impl<G> ItineraryScheduler<G>
where
    G: GeoService,
{
    /// Construct a scheduler using default configuration.
    pub fn new(geo: G) -> Self {
        Self::with_config(geo, SchedulerConfig::default())
    }

    /// Construct a scheduler with explicit configuration.
    pub const fn with_config(geo: G, config: SchedulerConfig) -> Self {
        Self { geo, config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Underlying geo service.
    pub const fn geo(&self) -> &G {
        &self.geo
    }

    /// Centre from the request, the accommodation or the geocoded
    /// destination, in that order of preference.
    fn anchor_center(&self, request: &TripRequest) -> Option<Coordinate> {
        if let Some(center) = request.center {
            return Some(center);
        }
        if let Some(accommodation) = &request.accommodation {
            return Some(accommodation.coordinate);
        }
        match self.geo.geocode(&request.destination, None) {
            Ok(found) => found.into_iter().find(Coordinate::is_valid),
            Err(err) => {
                log::warn!("could not geocode destination {}: {err}", request.destination);
                None
            }
        }
    }

    /// Attach coordinates to items lacking one, reporting those left without.
    fn geocode_missing<T: Located>(
        &self,
        items: &mut [T],
        destination: &str,
        focus: Option<&GeocodeFocus>,
        warnings: &mut Vec<ScheduleWarning>,
    ) {
        for item in items.iter_mut() {
            if item.coordinate().is_some_and(|c| !c.is_valid()) {
                log::warn!("discarding invalid coordinate for {}", item.label());
                item.reject_coordinate();
            }
            if item.coordinate().is_some() {
                continue;
            }
            let query = format!("{}, {destination}", item.label());
            let found = match self.geo.geocode(&query, focus) {
                Ok(found) => found.into_iter().find(Coordinate::is_valid),
                Err(err) => {
                    log::warn!("geocoding {query:?} failed: {err}");
                    None
                }
            };
            if let Some(coordinate) = found {
                log::debug!("geocoded {} to {coordinate:?}", item.label());
                item.set_coordinate(coordinate);
            } else {
                log::warn!("no coordinate for {}", item.label());
                warnings.push(ScheduleWarning::GeocodeUnavailable {
                    name: item.label().to_owned(),
                });
            }
        }
    }

    /// Geocode, validate and filter the request's candidates.
    fn prepare(
        &self,
        request: &TripRequest,
    ) -> (Vec<PointOfInterest>, Vec<DiningOption>, Vec<ScheduleWarning>) {
        let mut pois = request.pois.clone();
        let mut dining = request.dining.clone();
        let mut warnings = Vec::new();

        let anchor = self.anchor_center(request);
        let focus = anchor.map(|center| GeocodeFocus {
            center,
            radius_km: Some(self.config.center_radius_km),
        });
        self.geocode_missing(&mut pois, &request.destination, focus.as_ref(), &mut warnings);
        self.geocode_missing(&mut dining, &request.destination, focus.as_ref(), &mut warnings);

        let center = anchor.or_else(|| {
            let located: Vec<Coordinate> = pois.iter().filter_map(|p| p.coordinate).collect();
            median_center(&located)
        });
        if let Some(origin) = center {
            let radius = self.config.center_radius_km;
            warnings.extend(
                pois.iter_mut()
                    .filter_map(|poi| validate_against_center(poi, origin, radius)),
            );
            warnings.extend(
                dining
                    .iter_mut()
                    .filter_map(|option| validate_against_center(option, origin, radius)),
            );
        } else {
            log::info!("no trip centre available; skipping centre checks");
        }

        let (kept, excluded) = filter_for_single_day_trip(
            pois,
            request.days,
            center,
            self.config.day_trip_radius_km,
        );
        warnings.extend(excluded);
        (kept, dining, warnings)
    }
}

impl<G> Scheduler for ItineraryScheduler<G>
where
    G: GeoService,
{
    fn schedule(&self, request: &TripRequest) -> Result<TripPlan, ScheduleError> {
        request.validate()?;
        log::info!(
            "scheduling {}-day trip to {} with {} stops and {} dining options",
            request.days,
            request.destination,
            request.pois.len(),
            request.dining.len()
        );

        let (pois, dining, preparation) = self.prepare(request);
        let home = request.accommodation.as_ref().map(|a| a.coordinate);
        let simulator = TimeSimulator::new(&self.geo, &self.config, request.profile);

        let (days, used) = split_into_days(pois, request.days)
            .into_iter()
            .zip(1_u32..)
            .fold(
                (Vec::new(), UsedDining::new()),
                |(mut days, used), (bucket, day_number)| {
                    let ordered = order_stops(bucket, home);
                    let (outcome, still_used) =
                        simulator.simulate_day(day_number, &ordered, &dining, home, used);
                    days.push(format_day(day_number, request.trip_type, outcome));
                    (days, still_used)
                },
            );
        log::debug!("scheduled {} dining options across the trip", used.len());

        Ok(format_trip(
            &request.destination,
            request.trip_type,
            days,
            preparation,
        ))
    }
}
