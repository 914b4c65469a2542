//! OpenRouteService request and response types.
//!
//! Covers the Pelias geocoding search and the matrix service. ORS encodes
//! positions as `[lng, lat]`; conversion to [`Coordinate`] happens here so
//! the rest of the crate never sees the swapped order.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs>

use serde::{Deserialize, Serialize};
use voyager_core::{Coordinate, GeoError, TravelSegment};

const METRES_PER_KM: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// GeoJSON feature collection returned by `/geocode/search`.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Matches, best first.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single geocoding match.
#[derive(Debug, Deserialize)]
pub struct Feature {
    /// Point geometry of the match.
    pub geometry: Geometry,
}

/// GeoJSON point geometry.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[lng, lat]`.
    pub coordinates: Vec<f64>,
}

impl GeocodeResponse {
    /// Valid coordinates of all features, best match first.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.features
            .iter()
            .filter_map(|feature| match feature.geometry.coordinates.as_slice() {
                [lng, lat, ..] => Some(Coordinate::new(*lat, *lng)),
                _ => None,
            })
            .filter(Coordinate::is_valid)
            .collect()
    }
}

/// Body of a one-to-many `/v2/matrix/{profile}` request.
#[derive(Debug, Serialize)]
pub struct MatrixRequest {
    /// `[lng, lat]` positions; the origin comes first.
    pub locations: Vec<[f64; 2]>,
    /// Index of the origin.
    pub sources: [usize; 1],
    /// Indices of the destinations.
    pub destinations: Vec<usize>,
    /// Requested metrics.
    pub metrics: [&'static str; 2],
}

impl MatrixRequest {
    /// Build a request from `origin` to each of `destinations`.
    pub fn one_to_many(origin: Coordinate, destinations: &[Coordinate]) -> Self {
        let locations: Vec<[f64; 2]> = std::iter::once(origin)
            .chain(destinations.iter().copied())
            .map(|c| [c.lng, c.lat])
            .collect();
        Self {
            destinations: (1..locations.len()).collect(),
            locations,
            sources: [0],
            metrics: ["distance", "duration"],
        }
    }
}

/// Matrix service response.
///
/// Each matrix has one row per source; cells are `null` when no route
/// exists between the pair.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Distances in metres.
    pub distances: Option<Vec<Vec<Option<f64>>>>,
    /// Durations in seconds.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl MatrixResponse {
    /// Convert the origin row into `expected` segments.
    ///
    /// Cells that are missing, `null`, negative or non-finite yield
    /// unavailable segments. A response carrying neither matrix is an error.
    pub fn into_segments(self, expected: usize) -> Result<Vec<TravelSegment>, GeoError> {
        if self.distances.is_none() && self.durations.is_none() {
            return Err(GeoError::ParseError {
                message: "matrix response has neither distances nor durations".to_owned(),
            });
        }
        let first_row = |matrix: Option<Vec<Vec<Option<f64>>>>| {
            matrix
                .and_then(|rows| rows.into_iter().next())
                .unwrap_or_default()
        };
        let distances = first_row(self.distances);
        let durations = first_row(self.durations);
        Ok((0..expected)
            .map(|index| {
                let metres = usable(distances.get(index));
                let seconds = usable(durations.get(index));
                match (metres, seconds) {
                    (Some(m), Some(s)) => {
                        TravelSegment::ok(m / METRES_PER_KM, s / SECONDS_PER_HOUR)
                    }
                    _ => TravelSegment::unavailable(),
                }
            })
            .collect())
    }
}

fn usable(cell: Option<&Option<f64>>) -> Option<f64> {
    cell.copied()
        .flatten()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Pull a human-readable message out of an ORS error body.
///
/// ORS reports errors as `{"error": {"message": ..}}`, `{"error": ".."}` or
/// `{"message": ..}` depending on the service; anything else falls back to
/// the raw body.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_owned();
    };
    let nested = value.pointer("/error/message").and_then(serde_json::Value::as_str);
    let flat = value.get("error").and_then(serde_json::Value::as_str);
    let top = value.get("message").and_then(serde_json::Value::as_str);
    nested
        .or(flat)
        .or(top)
        .map_or_else(|| body.trim().to_owned(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn geocode_swaps_longitude_and_latitude() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.3376, 48.8606]}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [500.0, 48.0]}}
            ]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(json).expect("should deserialise");
        assert_eq!(response.coordinates(), vec![Coordinate::new(48.8606, 2.3376)]);
    }

    #[rstest]
    fn geocode_without_features_is_empty() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"type": "FeatureCollection"}"#).expect("should deserialise");
        assert!(response.coordinates().is_empty());
    }

    #[rstest]
    fn matrix_request_puts_origin_first() {
        let request = MatrixRequest::one_to_many(
            Coordinate::new(51.5, -0.1),
            &[Coordinate::new(51.6, -0.2), Coordinate::new(51.7, -0.3)],
        );
        let json = serde_json::to_value(&request).expect("should serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "locations": [[-0.1, 51.5], [-0.2, 51.6], [-0.3, 51.7]],
                "sources": [0],
                "destinations": [1, 2],
                "metrics": ["distance", "duration"]
            })
        );
    }

    #[rstest]
    fn matrix_converts_units_and_nulls() {
        let json = r#"{
            "distances": [[2500.0, null, -1.0]],
            "durations": [[900.0, null, 60.0]]
        }"#;
        let response: MatrixResponse = serde_json::from_str(json).expect("should deserialise");
        let segments = response.into_segments(4).expect("should convert");
        assert_eq!(
            segments,
            vec![
                TravelSegment::ok(2.5, 0.25),
                TravelSegment::unavailable(),
                TravelSegment::unavailable(),
                TravelSegment::unavailable(),
            ]
        );
    }

    #[rstest]
    fn matrix_without_metrics_is_a_parse_error() {
        let response: MatrixResponse = serde_json::from_str("{}").expect("should deserialise");
        assert!(matches!(
            response.into_segments(1),
            Err(GeoError::ParseError { .. })
        ));
    }

    #[rstest]
    #[case(r#"{"error": {"code": 2010, "message": "Could not find routable point"}}"#, "Could not find routable point")]
    #[case(r#"{"error": "Access to this API has been disallowed"}"#, "Access to this API has been disallowed")]
    #[case(r#"{"message": "Rate limit exceeded"}"#, "Rate limit exceeded")]
    #[case("<html>Bad Gateway</html>\n", "<html>Bad Gateway</html>")]
    fn extracts_error_messages(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(error_message(body), expected);
    }
}
