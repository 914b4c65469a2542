//! Test-only, in-memory `GeoService` implementation used by unit and
//! behaviour tests across the workspace.

use std::cell::Cell;

use crate::{Coordinate, GeoError, GeoService, GeocodeFocus, TravelProfile, TravelSegment};

/// Deterministic `GeoService` returning pre-configured answers.
///
/// Geocoding matches either the full query or its leading segment before the
/// first `", "`, so `"Louvre, Paris"` resolves an entry registered as
/// `"Louvre"`. Distance lookups answer per destination: explicitly registered
/// segments first, then unroutable destinations, then the default segment
/// (unavailable unless configured).
#[derive(Debug, Clone, Default)]
pub struct StubGeoService {
    places: Vec<(String, Vec<Coordinate>)>,
    segments: Vec<(Coordinate, TravelSegment)>,
    unroutable: Vec<Coordinate>,
    default_segment: Option<TravelSegment>,
    geocode_error: Option<GeoError>,
    distance_error: Option<GeoError>,
    distance_calls: Cell<usize>,
}

impl StubGeoService {
    /// Create a stub that knows no places and routes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a geocoding answer.
    #[must_use]
    pub fn with_place(mut self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.places.push((name.into(), vec![coordinate]));
        self
    }

    /// Register the segment returned for `destination`.
    #[must_use]
    pub fn with_segment(mut self, destination: Coordinate, segment: TravelSegment) -> Self {
        self.segments.push((destination, segment));
        self
    }

    /// Mark `destination` as unroutable.
    #[must_use]
    pub fn with_unroutable(mut self, destination: Coordinate) -> Self {
        self.unroutable.push(destination);
        self
    }

    /// Segment returned for destinations without an explicit entry.
    #[must_use]
    pub fn with_default_segment(mut self, segment: TravelSegment) -> Self {
        self.default_segment = Some(segment);
        self
    }

    /// Fail every geocoding call with `error`.
    #[must_use]
    pub fn with_geocode_error(mut self, error: GeoError) -> Self {
        self.geocode_error = Some(error);
        self
    }

    /// Fail every distance call with `error`.
    #[must_use]
    pub fn with_distance_error(mut self, error: GeoError) -> Self {
        self.distance_error = Some(error);
        self
    }

    /// Number of `distance` calls served so far.
    pub fn distance_calls(&self) -> usize {
        self.distance_calls.get()
    }

    fn segment_for(&self, destination: Coordinate) -> TravelSegment {
        if let Some((_, segment)) = self.segments.iter().find(|(c, _)| *c == destination) {
            return *segment;
        }
        if self.unroutable.contains(&destination) {
            return TravelSegment::unavailable();
        }
        self.default_segment
            .unwrap_or_else(TravelSegment::unavailable)
    }
}

impl GeoService for StubGeoService {
    fn geocode(
        &self,
        query: &str,
        _focus: Option<&GeocodeFocus>,
    ) -> Result<Vec<Coordinate>, GeoError> {
        if let Some(error) = &self.geocode_error {
            return Err(error.clone());
        }
        let leading = query.split(", ").next().unwrap_or(query);
        Ok(self
            .places
            .iter()
            .find(|(name, _)| name == query || name == leading)
            .map(|(_, coordinates)| coordinates.clone())
            .unwrap_or_default())
    }

    fn distance(
        &self,
        _origin: Coordinate,
        destinations: &[Coordinate],
        _profile: TravelProfile,
    ) -> Result<Vec<TravelSegment>, GeoError> {
        self.distance_calls.set(self.distance_calls.get() + 1);
        if destinations.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(error) = &self.distance_error {
            return Err(error.clone());
        }
        Ok(destinations
            .iter()
            .map(|destination| self.segment_for(*destination))
            .collect())
    }
}
