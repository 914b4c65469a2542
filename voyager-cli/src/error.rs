//! Error type for the Voyager CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use voyager_core::{ScheduleError, TripRequestValidationError};
use voyager_data::ors::ProviderBuildError;

/// Errors emitted by the Voyager CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The configured day start is not a clock hour.
    #[error("day start hour {hour} must lie in [0, 24)")]
    InvalidDayStartHour { hour: f64 },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the trip request file failed.
    #[error("failed to read trip request at {path:?}: {source}")]
    ReadRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Trip request JSON could not be decoded.
    #[error("failed to parse trip request JSON at {path:?}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The trip request failed validation.
    #[error("trip request in {path:?} failed validation: {source}")]
    InvalidRequest {
        path: Utf8PathBuf,
        #[source]
        source: TripRequestValidationError,
    },
    /// Constructing the OpenRouteService client failed.
    #[error("failed to build geo service for {base_url:?}: {source}")]
    BuildGeoService {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The scheduler rejected the request.
    #[error("scheduling failed: {source}")]
    Schedule { source: ScheduleError },
    /// Serialising the plan failed.
    #[error("failed to serialise trip plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Writing the plan to stdout failed.
    #[error("failed to write trip plan: {0}")]
    WritePlan(#[source] std::io::Error),
    /// Writing the plan to the output file failed.
    #[error("failed to write trip plan to {path:?}: {source}")]
    WritePlanFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
