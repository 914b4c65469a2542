//! Travel segments between two coordinates and routing profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a segment lookup produced usable figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStatus {
    /// Distance and duration are known.
    Ok,
    /// The routing service returned no path for the pair.
    Unavailable,
}

/// Distance and travel time from one point to another.
///
/// Unavailable segments carry zeroed figures and must not advance a clock.
///
/// # Examples
/// ```
/// use voyager_core::TravelSegment;
///
/// let leg = TravelSegment::ok(3.2, 0.25);
/// assert!(leg.is_available());
/// assert!(!TravelSegment::unavailable().is_available());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelSegment {
    /// Road distance in kilometres.
    pub distance_km: f64,
    /// Travel time in hours.
    pub duration_hours: f64,
    /// Lookup outcome.
    pub status: SegmentStatus,
}

impl TravelSegment {
    /// A successful segment.
    pub const fn ok(distance_km: f64, duration_hours: f64) -> Self {
        Self {
            distance_km,
            duration_hours,
            status: SegmentStatus::Ok,
        }
    }

    /// A segment for a pair the service could not route.
    pub const fn unavailable() -> Self {
        Self {
            distance_km: 0.0,
            duration_hours: 0.0,
            status: SegmentStatus::Unavailable,
        }
    }

    /// Whether the figures may be used.
    pub fn is_available(&self) -> bool {
        self.status == SegmentStatus::Ok
    }

    /// Travel time in whole minutes, rounded.
    pub fn duration_minutes(&self) -> u32 {
        let minutes = (self.duration_hours * 60.0).round();
        if minutes.is_finite() && minutes > 0.0 {
            minutes.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }
}

/// Routing profile used for distance lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelProfile {
    /// Car routing.
    #[default]
    DrivingCar,
    /// Pedestrian routing.
    FootWalking,
    /// Bicycle routing.
    CyclingRegular,
}

impl TravelProfile {
    /// Profile identifier as used by OpenRouteService.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DrivingCar => "driving-car",
            Self::FootWalking => "foot-walking",
            Self::CyclingRegular => "cycling-regular",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown travel profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel profile {0:?}; expected driving-car, foot-walking or cycling-regular")]
pub struct ParseTravelProfileError(pub String);

impl FromStr for TravelProfile {
    type Err = ParseTravelProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "driving-car" => Ok(Self::DrivingCar),
            "foot-walking" => Ok(Self::FootWalking),
            "cycling-regular" => Ok(Self::CyclingRegular),
            other => Err(ParseTravelProfileError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TravelProfile::DrivingCar)]
    #[case(TravelProfile::FootWalking)]
    #[case(TravelProfile::CyclingRegular)]
    fn profile_display_parses_back(#[case] profile: TravelProfile) {
        assert_eq!(profile.to_string().parse::<TravelProfile>(), Ok(profile));
    }

    #[rstest]
    fn serialises_profile_in_kebab_case() {
        let json = serde_json::to_string(&TravelProfile::FootWalking).expect("serialise");
        assert_eq!(json, r#""foot-walking""#);
    }

    #[rstest]
    #[case(0.5, 30)]
    #[case(1.26, 76)]
    #[case(0.0, 0)]
    fn rounds_duration_to_minutes(#[case] hours: f64, #[case] minutes: u32) {
        assert_eq!(TravelSegment::ok(1.0, hours).duration_minutes(), minutes);
    }
}
