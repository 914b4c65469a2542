//! Dining options and meal types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Coordinate;

/// The meal a dining option is suited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
}

impl MealType {
    /// Lowercase name used in documents and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown meal type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown meal type: {0}")]
pub struct ParseMealTypeError(pub String);

impl FromStr for MealType {
    type Err = ParseMealTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            _ => Err(ParseMealTypeError(s.to_owned())),
        }
    }
}

fn default_price_range() -> String {
    "$$".to_owned()
}

/// A restaurant or other place to eat.
///
/// Each option may be scheduled at most once per trip.
///
/// # Examples
/// ```
/// use voyager_core::{Coordinate, DiningOption, MealType};
///
/// let bistro = DiningOption::new("Chez Janou", MealType::Dinner)
///     .with_cuisine("French")
///     .with_coordinate(Coordinate::new(48.857, 2.367));
/// assert_eq!(bistro.meal_type, MealType::Dinner);
/// assert_eq!(bistro.price_range, "$$");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningOption {
    /// Restaurant name; unique per trip for scheduling purposes.
    pub name: String,
    /// Cuisine description.
    #[serde(default)]
    pub cuisine: String,
    /// Price band such as `"$"` or `"$$$"`.
    #[serde(default = "default_price_range")]
    pub price_range: String,
    /// Meal the option is recommended for.
    pub meal_type: MealType,
    /// Geocoded position, if known.
    #[serde(default, alias = "coordinates")]
    pub coordinate: Option<Coordinate>,
    /// Neighbourhood or area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Signature dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_try: Option<String>,
}

impl DiningOption {
    /// Construct a dining option for a meal type.
    pub fn new(name: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            name: name.into(),
            cuisine: String::new(),
            price_range: default_price_range(),
            meal_type,
            coordinate: None,
            location: None,
            must_try: None,
        }
    }

    /// Attach a coordinate.
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Set the cuisine.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }
}
