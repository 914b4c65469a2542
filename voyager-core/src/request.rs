//! Trip request documents and validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coordinate, DiningOption, PointOfInterest, TravelProfile};

/// Style of trip, used for day themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    /// Monuments and heritage sites.
    Historic,
    /// Outdoor and active pursuits.
    Adventure,
    /// Slow-paced leisure.
    Relaxation,
    /// Food-led exploration.
    Foodie,
    /// Museums, arts and local culture.
    #[default]
    Cultural,
    /// Trips for couples.
    Romantic,
    /// Parks and landscapes.
    Nature,
}

impl TripType {
    /// Capitalised label used in day themes.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Historic => "Historic",
            Self::Adventure => "Adventure",
            Self::Relaxation => "Relaxation",
            Self::Foodie => "Foodie",
            Self::Cultural => "Cultural",
            Self::Romantic => "Romantic",
            Self::Nature => "Nature",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the traveller sleeps; used as the start point for routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    /// Hotel or lodging name.
    pub name: String,
    /// Position of the accommodation.
    #[serde(alias = "coordinates")]
    pub coordinate: Coordinate,
}

/// Errors returned by [`TripRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestValidationError {
    /// The trip spans no days.
    #[error("trip must span at least one day")]
    ZeroDays,
    /// The trip is longer than supported.
    #[error("trip spans {days} days; at most {max} are supported")]
    TooManyDays {
        /// Requested number of days.
        days: u32,
        /// Supported maximum.
        max: u32,
    },
    /// The destination name is empty or whitespace.
    #[error("destination must not be blank")]
    BlankDestination,
}

/// Input to a scheduler: candidates from the recommender plus trip settings.
///
/// # Examples
/// ```
/// use voyager_core::{PointOfInterest, TripRequest, TripType};
///
/// let request = TripRequest::new("Paris", 2)
///     .with_trip_type(TripType::Romantic)
///     .with_poi(PointOfInterest::new("Louvre", "3 hours"));
/// assert!(request.validate().is_ok());
/// assert!(TripRequest::new("Paris", 0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Destination name, also used to geocode the trip centre.
    pub destination: String,
    /// Number of days to plan.
    pub days: u32,
    /// Style of the trip.
    #[serde(default)]
    pub trip_type: TripType,
    /// Explicit trip centre, overriding all derived centres.
    #[serde(default)]
    pub center: Option<Coordinate>,
    /// Candidate attractions in recommender order.
    #[serde(default)]
    pub pois: Vec<PointOfInterest>,
    /// Candidate dining options.
    #[serde(default)]
    pub dining: Vec<DiningOption>,
    /// Accommodation used as the daily start point.
    #[serde(default)]
    pub accommodation: Option<Accommodation>,
    /// Routing profile for travel segments.
    #[serde(default)]
    pub profile: TravelProfile,
}

impl TripRequest {
    /// Longest trip accepted by [`validate`](Self::validate).
    pub const MAX_DAYS: u32 = 30;

    /// Create an empty request for `days` days in `destination`.
    pub fn new(destination: impl Into<String>, days: u32) -> Self {
        Self {
            destination: destination.into(),
            days,
            trip_type: TripType::default(),
            center: None,
            pois: Vec::new(),
            dining: Vec::new(),
            accommodation: None,
            profile: TravelProfile::default(),
        }
    }

    /// Set the trip type.
    #[must_use]
    pub fn with_trip_type(mut self, trip_type: TripType) -> Self {
        self.trip_type = trip_type;
        self
    }

    /// Set an explicit trip centre.
    #[must_use]
    pub fn with_center(mut self, center: Coordinate) -> Self {
        self.center = Some(center);
        self
    }

    /// Append a candidate attraction.
    #[must_use]
    pub fn with_poi(mut self, poi: PointOfInterest) -> Self {
        self.pois.push(poi);
        self
    }

    /// Append a candidate dining option.
    #[must_use]
    pub fn with_dining(mut self, option: DiningOption) -> Self {
        self.dining.push(option);
        self
    }

    /// Set the accommodation.
    #[must_use]
    pub fn with_accommodation(mut self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.accommodation = Some(Accommodation {
            name: name.into(),
            coordinate,
        });
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: TravelProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Check the request before scheduling.
    ///
    /// # Errors
    /// Returns [`TripRequestValidationError`] when `days` is zero or above
    /// [`MAX_DAYS`](Self::MAX_DAYS), or the destination is blank.
    pub fn validate(&self) -> Result<(), TripRequestValidationError> {
        if self.days == 0 {
            return Err(TripRequestValidationError::ZeroDays);
        }
        if self.days > Self::MAX_DAYS {
            return Err(TripRequestValidationError::TooManyDays {
                days: self.days,
                max: Self::MAX_DAYS,
            });
        }
        if self.destination.trim().is_empty() {
            return Err(TripRequestValidationError::BlankDestination);
        }
        Ok(())
    }
}
