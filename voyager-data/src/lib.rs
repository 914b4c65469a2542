//! Geo data providers for Voyager.
//!
//! The [`ors`] module talks to OpenRouteService for geocoding and travel
//! matrices. Providers implement [`voyager_core::GeoService`], so the
//! scheduler never depends on this crate directly.

pub mod ors;
