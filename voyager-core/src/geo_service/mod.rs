//! Geocoding and distance lookups.
//!
//! The [`GeoService`] trait abstracts the external geocoding/routing
//! collaborator. Callers resolve free-text place names to coordinates and
//! request batched one-to-many [`TravelSegment`](crate::TravelSegment)
//! lookups.
//!
//! Both calls are fallible and may legitimately return no data; the engine
//! treats every outcome as optional.

mod error;
mod service;

pub use error::GeoError;
pub use service::{GeoService, GeocodeFocus};
