//! Test helpers for staging trip requests on disk and stubbing the scheduler.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;
use voyager_core::test_support::StubGeoService;
use voyager_core::{Coordinate, DiningOption, MealType, PointOfInterest, TravelSegment, TripRequest};
use voyager_scheduler::ItineraryScheduler;

pub(super) const ROME: Coordinate = Coordinate::new(41.9028, 12.4964);

/// Temporary directory addressed through a UTF-8 path.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A two-day Rome request with every coordinate known up front.
pub(super) fn rome_request(days: u32) -> TripRequest {
    TripRequest::new("Rome", days)
        .with_center(ROME)
        .with_poi(
            PointOfInterest::new("Colosseum", "2 hours")
                .with_coordinate(Coordinate::new(41.8902, 12.4922)),
        )
        .with_poi(
            PointOfInterest::new("Pantheon", "1 hour")
                .with_coordinate(Coordinate::new(41.8986, 12.4769)),
        )
        .with_poi(
            PointOfInterest::new("Trevi Fountain", "1 hour")
                .with_coordinate(Coordinate::new(41.9009, 12.4833)),
        )
        .with_dining(
            DiningOption::new("Roscioli", MealType::Lunch)
                .with_coordinate(Coordinate::new(41.8937, 12.4738)),
        )
}

pub(super) fn write_request(path: &Utf8Path, request: &TripRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Schedules against an in-memory geo service, so no API key is needed.
#[derive(Debug, Default)]
pub(super) struct StubPlanSchedulerBuilder;

impl PlanSchedulerBuilder for StubPlanSchedulerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn voyager_core::Scheduler>, CliError> {
        let geo = StubGeoService::new().with_default_segment(TravelSegment::ok(1.5, 0.25));
        Ok(Box::new(ItineraryScheduler::with_config(
            geo,
            config.scheduler,
        )))
    }
}
