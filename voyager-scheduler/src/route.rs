//! Greedy nearest-neighbour ordering of a day's stops.

use voyager_core::Coordinate;

use crate::geo_validator::{Located, haversine_distance_km};

/// Reorder `stops` to reduce travel between consecutive stops.
///
/// With two or fewer geocoded stops the input order is returned unchanged.
/// Otherwise the walk starts at `start` when given, else at the first
/// geocoded stop, and repeatedly moves to the nearest unvisited geocoded stop
/// by great-circle distance, preferring the earlier stop on ties. Stops
/// without a coordinate follow in their original relative order. The result
/// is always a permutation of the input.
///
/// # Examples
/// ```
/// use voyager_core::{Coordinate, PointOfInterest};
/// use voyager_scheduler::order_stops;
///
/// let at = |name: &str, lng: f64| {
///     PointOfInterest::new(name, "1 hour").with_coordinate(Coordinate::new(0.0, lng))
/// };
/// let ordered = order_stops(vec![at("far", 0.03), at("near", 0.01), at("mid", 0.02)], None);
/// let names: Vec<_> = ordered.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["far", "mid", "near"]);
/// ```
pub fn order_stops<T: Located>(stops: Vec<T>, start: Option<Coordinate>) -> Vec<T> {
    let geocoded_count = stops.iter().filter(|s| s.coordinate().is_some()).count();
    if geocoded_count <= 2 {
        return stops;
    }

    let total = stops.len();
    let mut remaining: Vec<(Coordinate, T)> = Vec::with_capacity(geocoded_count);
    let mut unlocated = Vec::with_capacity(total - geocoded_count);
    for stop in stops {
        match stop.coordinate() {
            Some(coordinate) => remaining.push((coordinate, stop)),
            None => unlocated.push(stop),
        }
    }

    let mut ordered = Vec::with_capacity(total);
    let mut current = match start {
        Some(origin) => origin,
        None => {
            let (origin, first) = remaining.remove(0);
            ordered.push(first);
            origin
        }
    };
    while let Some(index) = nearest(&remaining, current) {
        let (next, stop) = remaining.remove(index);
        log::trace!("route: next stop {} at {next:?}", stop.label());
        ordered.push(stop);
        current = next;
    }
    ordered.extend(unlocated);
    ordered
}

fn nearest<T>(candidates: &[(Coordinate, T)], from: Coordinate) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, (coordinate, _))| (index, haversine_distance_km(from, *coordinate)))
        .min_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs))
        .map(|(index, _)| index)
}
