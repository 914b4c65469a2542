//! Tunables for [`ItineraryScheduler`](crate::ItineraryScheduler).

/// Configuration for [`ItineraryScheduler`](crate::ItineraryScheduler).
///
/// The defaults reproduce the behaviour travellers expect from a plain city
/// break: days start at 09:00, a quarter hour separates activities, meals
/// take an hour, and legs longer than two hours or 100 km are treated as
/// bad routing data.
///
/// # Examples
/// ```
/// use voyager_scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::default().with_day_start_hour(8.5);
/// assert_eq!(config.day_start_hour, 8.5);
/// assert_eq!(config.buffer_hours, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Clock value at the first activity of each day.
    pub day_start_hour: f64,
    /// Gap inserted after every activity.
    pub buffer_hours: f64,
    /// Time allotted to a meal.
    pub meal_hours: f64,
    /// Longest travel time applied to the clock.
    pub max_leg_hours: f64,
    /// Longest leg, by road or straight line, considered plausible.
    pub max_leg_km: f64,
    /// Radius around the trip centre within which geocodes are trusted.
    pub center_radius_km: f64,
    /// Radius a single-day trip may reach from the centre.
    pub day_trip_radius_km: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 9.0,
            buffer_hours: 0.25,
            meal_hours: 1.0,
            max_leg_hours: 2.0,
            max_leg_km: 100.0,
            center_radius_km: 50.0,
            day_trip_radius_km: 100.0,
        }
    }
}

impl SchedulerConfig {
    /// Set the start hour of each day.
    #[must_use]
    pub const fn with_day_start_hour(mut self, hour: f64) -> Self {
        self.day_start_hour = hour;
        self
    }

    /// Set the gap between activities.
    #[must_use]
    pub const fn with_buffer_hours(mut self, hours: f64) -> Self {
        self.buffer_hours = hours;
        self
    }

    /// Set the time allotted to a meal.
    #[must_use]
    pub const fn with_meal_hours(mut self, hours: f64) -> Self {
        self.meal_hours = hours;
        self
    }

    /// Set the leg sanity bounds.
    #[must_use]
    pub const fn with_leg_bounds(mut self, max_km: f64, max_hours: f64) -> Self {
        self.max_leg_km = max_km;
        self.max_leg_hours = max_hours;
        self
    }

    /// Set the trusted geocoding radius around the trip centre.
    #[must_use]
    pub const fn with_center_radius_km(mut self, km: f64) -> Self {
        self.center_radius_km = km;
        self
    }

    /// Set the reach of a single-day trip.
    #[must_use]
    pub const fn with_day_trip_radius_km(mut self, km: f64) -> Self {
        self.day_trip_radius_km = km;
        self
    }
}
