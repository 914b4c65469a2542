//! Geographic coordinates.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A WGS84 position expressed as latitude and longitude in degrees.
///
/// Coordinates are immutable once assigned to a stop. Conversions to and from
/// [`geo::Coord`] follow the `geo` convention of `x = longitude` and
/// `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voyager_core::Coordinate;
///
/// let eiffel = Coordinate::new(48.8584, 2.2945);
/// let coord: Coord<f64> = eiffel.into();
/// assert_eq!(coord.x, 2.2945);
/// assert_eq!(Coordinate::from(coord), eiffel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and within WGS84 bounds.
    ///
    /// # Examples
    /// ```
    /// use voyager_core::Coordinate;
    ///
    /// assert!(Coordinate::new(51.5, -0.1).is_valid());
    /// assert!(!Coordinate::new(91.0, 0.0).is_valid());
    /// assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn converts_to_geo_with_lng_as_x() {
        let coord: Coord<f64> = Coordinate::new(10.0, 20.0).into();
        assert_eq!(coord, Coord { x: 20.0, y: 10.0 });
    }

    #[rstest]
    fn deserialises_lat_lng_keys() {
        let parsed: Coordinate =
            serde_json::from_str(r#"{"lat": 48.85, "lng": 2.35}"#).expect("valid coordinate");
        assert_eq!(parsed, Coordinate::new(48.85, 2.35));
    }
}
