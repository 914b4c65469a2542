use serde::{Deserialize, Serialize};

use crate::Coordinate;

fn default_duration() -> String {
    "2 hours".to_owned()
}

fn default_best_time() -> String {
    "anytime".to_owned()
}

/// An attraction or activity candidate for the itinerary.
///
/// Recommenders supply the descriptive fields; the coordinate is attached by
/// geocoding and may later be cleared by validation, in which case
/// `geocoding_error` is set. The `duration` is a free-text estimate such as
/// `"2-3 hours"` or `"half day"`.
///
/// # Examples
/// ```
/// use voyager_core::{Coordinate, PointOfInterest};
///
/// let poi = PointOfInterest::new("Louvre", "3 hours")
///     .with_category("museum")
///     .with_coordinate(Coordinate::new(48.8606, 2.3376));
///
/// assert_eq!(poi.name, "Louvre");
/// assert!(poi.coordinate.is_some());
/// assert!(!poi.geocoding_error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Display name, also used as the geocoding query.
    pub name: String,
    /// Free-form category such as `"museum"` or `"park"`.
    #[serde(default)]
    pub category: String,
    /// Short description from the recommender.
    #[serde(default)]
    pub description: String,
    /// Free-text visit duration estimate.
    #[serde(default = "default_duration")]
    pub duration: String,
    /// Preferred time of day tag, e.g. `"morning"`.
    #[serde(default = "default_best_time")]
    pub best_time: String,
    /// Geocoded position, if known and trusted.
    #[serde(default, alias = "coordinates")]
    pub coordinate: Option<Coordinate>,
    /// Set when a geocoded position was rejected as implausible.
    #[serde(default)]
    pub geocoding_error: bool,
}

impl PointOfInterest {
    /// Construct a point of interest with a name and duration estimate.
    pub fn new(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            description: String::new(),
            duration: duration.into(),
            best_time: default_best_time(),
            coordinate: None,
            geocoding_error: false,
        }
    }

    /// Attach a coordinate.
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the best-time tag.
    #[must_use]
    pub fn with_best_time(mut self, best_time: impl Into<String>) -> Self {
        self.best_time = best_time.into();
        self
    }
}
