//! Geo service trait and geocoding focus hints.

use crate::{Coordinate, TravelProfile, TravelSegment};

use super::error::GeoError;

/// Bias for geocoding queries towards a known area.
///
/// Services that support it prefer results near `center` and, when
/// `radius_km` is set, restrict results to that circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeFocus {
    /// Point to bias results towards.
    pub center: Coordinate,
    /// Optional hard boundary radius in kilometres.
    pub radius_km: Option<f64>,
}

/// Resolve place names and travel segments.
///
/// `distance` returns one segment per destination, in input order. A
/// destination the service cannot route yields a segment with
/// [`SegmentStatus::Unavailable`](crate::SegmentStatus::Unavailable) rather
/// than failing the whole batch; `Err` is reserved for failures affecting the
/// entire call.
///
/// # Examples
///
/// ```rust
/// use voyager_core::{
///     Coordinate, GeoError, GeoService, GeocodeFocus, TravelProfile, TravelSegment,
/// };
///
/// struct Nowhere;
///
/// impl GeoService for Nowhere {
///     fn geocode(
///         &self,
///         _query: &str,
///         _focus: Option<&GeocodeFocus>,
///     ) -> Result<Vec<Coordinate>, GeoError> {
///         Ok(Vec::new())
///     }
///
///     fn distance(
///         &self,
///         _origin: Coordinate,
///         destinations: &[Coordinate],
///         _profile: TravelProfile,
///     ) -> Result<Vec<TravelSegment>, GeoError> {
///         Ok(destinations.iter().map(|_| TravelSegment::unavailable()).collect())
///     }
/// }
///
/// let service = Nowhere;
/// assert!(service.geocode("Atlantis", None)?.is_empty());
/// let legs = service.distance(
///     Coordinate::new(0.0, 0.0),
///     &[Coordinate::new(1.0, 1.0)],
///     TravelProfile::default(),
/// )?;
/// assert!(!legs[0].is_available());
/// # Ok::<(), GeoError>(())
/// ```
pub trait GeoService {
    /// Resolve `query` to candidate coordinates, best match first.
    ///
    /// An empty vector means the place could not be found.
    fn geocode(
        &self,
        query: &str,
        focus: Option<&GeocodeFocus>,
    ) -> Result<Vec<Coordinate>, GeoError>;

    /// Compute segments from `origin` to each of `destinations`.
    ///
    /// Implementations must return `Ok(vec![])` for empty `destinations`.
    fn distance(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        profile: TravelProfile,
    ) -> Result<Vec<TravelSegment>, GeoError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::StubGeoService;

    #[rstest]
    fn stub_aligns_segments_with_destinations() {
        let near = Coordinate::new(0.0, 0.01);
        let far = Coordinate::new(0.0, 0.02);
        let service = StubGeoService::new()
            .with_segment(far, TravelSegment::ok(2.0, 0.1))
            .with_unroutable(near);
        let legs = service
            .distance(Coordinate::new(0.0, 0.0), &[near, far], TravelProfile::DrivingCar)
            .expect("stub distance should succeed");
        assert_eq!(legs, vec![TravelSegment::unavailable(), TravelSegment::ok(2.0, 0.1)]);
    }

    #[rstest]
    fn stub_returns_empty_for_empty_destinations() {
        let service = StubGeoService::new();
        let legs = service
            .distance(Coordinate::new(0.0, 0.0), &[], TravelProfile::DrivingCar)
            .expect("empty batch should succeed");
        assert!(legs.is_empty());
    }
}
