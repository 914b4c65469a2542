//! OpenRouteService implementation of [`voyager_core::GeoService`].
//!
//! [`OrsGeoService`] resolves place names through the Pelias geocoder and
//! measures travel with one-to-many matrix requests, so a day's meal search
//! costs a single round trip however many restaurants are considered.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use voyager_core::{Coordinate, GeoService, TravelProfile};
//! use voyager_data::ors::{OrsConfig, OrsGeoService};
//!
//! let config = OrsConfig::default()
//!     .with_api_key("my-ors-key")
//!     .with_timeout(Duration::from_secs(10));
//! let service = OrsGeoService::with_config(config)?;
//!
//! let louvre = service.geocode("Louvre, Paris", None)?;
//! let legs = service.distance(
//!     Coordinate::new(48.8606, 2.3376),
//!     &[Coordinate::new(48.8530, 2.3499)],
//!     TravelProfile::FootWalking,
//! )?;
//! println!("{louvre:?} {legs:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod api;
mod client;

pub use client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, OrsConfig, OrsGeoService, ProviderBuildError};
