//! Test-only utilities for `voyager-scheduler`.
//!
//! The helpers in this module are available to unit tests, behavioural tests
//! and benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use voyager_core::{
    Coordinate, DiningOption, GeoError, GeoService, GeocodeFocus, MealType, PointOfInterest,
    TravelProfile, TravelSegment,
};

use crate::geo_validator::{EARTH_RADIUS_KM, haversine_distance_km};

/// Construct a located `PointOfInterest` with a duration estimate.
///
/// # Examples
/// ```rust
/// use voyager_scheduler::test_support::poi;
///
/// let poi = poi("Prado", 40.4138, -3.6921, "3 hours");
/// assert_eq!(poi.name, "Prado");
/// assert!(poi.coordinate.is_some());
/// ```
#[must_use]
pub fn poi(name: &str, lat: f64, lng: f64, duration: &str) -> PointOfInterest {
    PointOfInterest::new(name, duration).with_coordinate(Coordinate::new(lat, lng))
}

/// Construct a located `DiningOption`.
#[must_use]
pub fn dining(name: &str, meal_type: MealType, lat: f64, lng: f64) -> DiningOption {
    DiningOption::new(name, meal_type).with_coordinate(Coordinate::new(lat, lng))
}

/// A coordinate `north_km` north and `east_km` east of `origin`.
///
/// Uses a local flat approximation, accurate to well under a percent for
/// the short offsets used in tests.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "offsets are converted from kilometres to degrees"
)]
pub fn offset_km(origin: Coordinate, north_km: f64, east_km: f64) -> Coordinate {
    let dlat = (north_km / EARTH_RADIUS_KM).to_degrees();
    let dlng = (east_km / (EARTH_RADIUS_KM * origin.lat.to_radians().cos())).to_degrees();
    Coordinate::new(origin.lat + dlat, origin.lng + dlng)
}

/// A [`GeoService`] measuring straight lines at a constant speed.
///
/// Travel time is the great-circle distance divided by `speed_kmh`.
/// Destinations registered with [`with_unroutable`](Self::with_unroutable)
/// yield unavailable segments, and geocoding answers from registered places,
/// matching either the full query or its part before the first `", "`.
///
/// # Examples
/// ```rust
/// use voyager_core::{Coordinate, GeoService, TravelProfile};
/// use voyager_scheduler::test_support::StraightLineGeoService;
///
/// let geo = StraightLineGeoService::new(30.0);
/// let legs = geo
///     .distance(
///         Coordinate::new(0.0, 0.0),
///         &[Coordinate::new(0.0, 0.0)],
///         TravelProfile::DrivingCar,
///     )
///     .expect("straight lines always route");
/// assert_eq!(legs.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StraightLineGeoService {
    speed_kmh: f64,
    unroutable: Vec<Coordinate>,
    places: Vec<(String, Coordinate)>,
}

impl StraightLineGeoService {
    /// Create a service travelling at `speed_kmh`.
    #[must_use]
    pub const fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            unroutable: Vec::new(),
            places: Vec::new(),
        }
    }

    /// Mark `destination` as unroutable.
    #[must_use]
    pub fn with_unroutable(mut self, destination: Coordinate) -> Self {
        self.unroutable.push(destination);
        self
    }

    /// Register a geocoding answer.
    #[must_use]
    pub fn with_place(mut self, name: &str, coordinate: Coordinate) -> Self {
        self.places.push((name.to_owned(), coordinate));
        self
    }

    #[expect(clippy::float_arithmetic, reason = "travel time from distance and speed")]
    fn segment(&self, origin: Coordinate, destination: Coordinate) -> TravelSegment {
        if self.unroutable.contains(&destination) {
            return TravelSegment::unavailable();
        }
        let km = haversine_distance_km(origin, destination);
        TravelSegment::ok(km, km / self.speed_kmh)
    }
}

impl GeoService for StraightLineGeoService {
    fn geocode(
        &self,
        query: &str,
        _focus: Option<&GeocodeFocus>,
    ) -> Result<Vec<Coordinate>, GeoError> {
        let leading = query.split(", ").next().unwrap_or(query);
        Ok(self
            .places
            .iter()
            .filter(|(name, _)| name == query || name == leading)
            .map(|(_, coordinate)| *coordinate)
            .collect())
    }

    fn distance(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        _profile: TravelProfile,
    ) -> Result<Vec<TravelSegment>, GeoError> {
        Ok(destinations
            .iter()
            .map(|destination| self.segment(origin, *destination))
            .collect())
    }
}
