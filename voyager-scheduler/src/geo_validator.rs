//! Sanity checks for geocoded coordinates.
//!
//! Geocoders happily resolve "Cathedral" to a cathedral in another country.
//! The helpers here measure great-circle distances and drop coordinates that
//! lie implausibly far from the trip centre.

#![expect(
    clippy::float_arithmetic,
    reason = "great-circle distances and medians are floating-point computations"
)]

use voyager_core::{Coordinate, DiningOption, PointOfInterest, ScheduleWarning};

/// Mean Earth radius used by [`haversine_distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// # Examples
/// ```
/// use voyager_core::Coordinate;
/// use voyager_scheduler::haversine_distance_km;
///
/// let paris = Coordinate::new(48.8566, 2.3522);
/// let london = Coordinate::new(51.5074, -0.1278);
/// let km = haversine_distance_km(paris, london);
/// assert!((km - 343.5).abs() < 1.0);
/// assert_eq!(haversine_distance_km(paris, paris), 0.0);
/// ```
#[must_use]
pub fn haversine_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let half_dlat = (b.lat - a.lat).to_radians() / 2.0;
    let half_dlng = (b.lng - a.lng).to_radians() / 2.0;
    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Anything carrying an optional, rejectable coordinate.
///
/// Implemented for [`PointOfInterest`] and [`DiningOption`] so validation and
/// routing can treat both uniformly.
pub trait Located {
    /// Name used in warnings and logs.
    fn label(&self) -> &str;

    /// Current coordinate, if any.
    fn coordinate(&self) -> Option<Coordinate>;

    /// Attach a geocoded coordinate.
    fn set_coordinate(&mut self, coordinate: Coordinate);

    /// Clear the coordinate after it failed validation.
    fn reject_coordinate(&mut self);

    /// Whether a previous coordinate was rejected.
    fn geocoding_failed(&self) -> bool;
}

impl Located for PointOfInterest {
    fn label(&self) -> &str {
        &self.name
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
    }

    fn reject_coordinate(&mut self) {
        self.coordinate = None;
        self.geocoding_error = true;
    }

    fn geocoding_failed(&self) -> bool {
        self.geocoding_error
    }
}

impl Located for DiningOption {
    fn label(&self) -> &str {
        &self.name
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
    }

    fn reject_coordinate(&mut self) {
        self.coordinate = None;
    }

    fn geocoding_failed(&self) -> bool {
        false
    }
}

/// Clear `item`'s coordinate when it lies more than `max_km` from `center`.
///
/// Returns the warning describing the rejection, or `None` when the
/// coordinate is absent or plausible.
///
/// # Examples
/// ```
/// use voyager_core::{Coordinate, PointOfInterest};
/// use voyager_scheduler::validate_against_center;
///
/// let center = Coordinate::new(48.8566, 2.3522);
/// let mut stray = PointOfInterest::new("Notre-Dame", "1 hour")
///     .with_coordinate(Coordinate::new(45.76, 4.83));
/// assert!(validate_against_center(&mut stray, center, 50.0).is_some());
/// assert!(stray.coordinate.is_none());
/// assert!(stray.geocoding_error);
/// ```
pub fn validate_against_center<T: Located>(
    item: &mut T,
    center: Coordinate,
    max_km: f64,
) -> Option<ScheduleWarning> {
    let coordinate = item.coordinate()?;
    let distance_km = haversine_distance_km(center, coordinate);
    if distance_km <= max_km {
        return None;
    }
    log::warn!(
        "rejecting coordinate for {}: {distance_km:.1} km from trip centre (limit {max_km:.0} km)",
        item.label()
    );
    item.reject_coordinate();
    Some(ScheduleWarning::GeocodeRejected {
        name: item.label().to_owned(),
        distance_km,
        max_km,
    })
}

/// Drop stops a single-day trip cannot reach.
///
/// Only applies when `days == 1`; longer trips pass through unchanged.
/// Stops farther than `max_km` from `center` are excluded. Stops without a
/// coordinate are kept with a warning, unless their coordinate was already
/// rejected, in which case they are excluded too. Without a centre only the
/// coordinate checks apply.
pub fn filter_for_single_day_trip(
    pois: Vec<PointOfInterest>,
    days: u32,
    center: Option<Coordinate>,
    max_km: f64,
) -> (Vec<PointOfInterest>, Vec<ScheduleWarning>) {
    if days != 1 {
        return (pois, Vec::new());
    }
    let mut kept = Vec::with_capacity(pois.len());
    let mut warnings = Vec::new();
    for poi in pois {
        match (poi.coordinate, center) {
            (Some(coordinate), Some(origin)) => {
                let distance_km = haversine_distance_km(origin, coordinate);
                if distance_km > max_km {
                    log::info!(
                        "excluding {} from day trip: {distance_km:.1} km from centre",
                        poi.name
                    );
                    warnings.push(ScheduleWarning::ExcludedFromDayTrip {
                        name: poi.name,
                        reason: format!("{distance_km:.1} km from centre exceeds {max_km:.0} km"),
                    });
                } else {
                    kept.push(poi);
                }
            }
            (Some(_), None) => kept.push(poi),
            (None, _) if poi.geocoding_error => {
                log::info!("excluding {} from day trip: location rejected", poi.name);
                warnings.push(ScheduleWarning::ExcludedFromDayTrip {
                    name: poi.name,
                    reason: "location could not be verified".to_owned(),
                });
            }
            (None, _) => {
                warnings.push(ScheduleWarning::KeptWithoutCoordinate {
                    name: poi.name.clone(),
                });
                kept.push(poi);
            }
        }
    }
    (kept, warnings)
}

/// Coordinate-wise median of `coordinates`.
///
/// Used as the trip centre of last resort; the median resists the odd
/// geocode landing on another continent. Returns `None` for an empty slice.
#[must_use]
pub fn median_center(coordinates: &[Coordinate]) -> Option<Coordinate> {
    let mut lats: Vec<f64> = coordinates.iter().map(|c| c.lat).collect();
    let mut lngs: Vec<f64> = coordinates.iter().map(|c| c.lng).collect();
    Some(Coordinate::new(median(&mut lats)?, median(&mut lngs)?))
}

fn median(values: &mut [f64]) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    let mid = values.len().div_euclid(2);
    let upper = *values.get(mid)?;
    if values.len().rem_euclid(2) == 1 {
        return Some(upper);
    }
    let lower = *values.get(mid.checked_sub(1)?)?;
    Some((lower + upper) / 2.0)
}
