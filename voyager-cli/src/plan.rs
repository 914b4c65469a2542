//! Plan command implementation for the Voyager CLI.

use std::fmt;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voyager_core::{Scheduler, TravelProfile, TripPlan, TripRequest};
use voyager_data::ors::{DEFAULT_BASE_URL, OrsConfig, OrsGeoService};
use voyager_scheduler::{ItineraryScheduler, SchedulerConfig};

use crate::{
    ARG_PLAN_DAY_START_HOUR, ARG_PLAN_ORS_API_KEY, ARG_PLAN_ORS_BASE_URL, ARG_PLAN_OUTPUT,
    ARG_PLAN_PROFILE, ARG_PLAN_REQUEST, CliError, ENV_ORS_API_KEY, ENV_PLAN_ORS_API_KEY,
    ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Schedule a JSON-encoded TripRequest into a day-by-day \
                 TripPlan. Missing coordinates are geocoded and travel \
                 times are looked up through OpenRouteService. The plan is \
                 printed to stdout unless an output path is given.",
    about = "Schedule a trip request into a timed plan"
)]
#[ortho_config(prefix = "VOYAGER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a TripRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the plan to this file instead of stdout.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Base URL of the OpenRouteService API.
    #[arg(long = ARG_PLAN_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// OpenRouteService API key; falls back to `ORS_API_KEY`.
    #[arg(long = ARG_PLAN_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// Override the request's travel profile.
    #[arg(long = ARG_PLAN_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<TravelProfile>,
    /// Hour at which each day starts, e.g. 8.5 for 08:30.
    #[arg(long = ARG_PLAN_DAY_START_HOUR, value_name = "hour")]
    #[serde(default)]
    pub(crate) day_start_hour: Option<f64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        let fallback_key = std::env::var(ENV_ORS_API_KEY).ok();
        PlanConfig::try_from(merged).map(|config| config.with_fallback_api_key(fallback_key))
    }
}

/// Resolved `plan` command configuration.
#[derive(Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Where to write the plan; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
    /// OpenRouteService base URL.
    pub(crate) ors_base_url: String,
    /// OpenRouteService API key, if any layer supplied one.
    pub(crate) ors_api_key: Option<String>,
    /// Travel profile overriding the request's own.
    pub(crate) profile: Option<TravelProfile>,
    /// Scheduler tunables.
    pub(crate) scheduler: SchedulerConfig,
}

impl fmt::Debug for PlanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanConfig")
            .field("request_path", &self.request_path)
            .field("output", &self.output)
            .field("ors_base_url", &self.ors_base_url)
            .field("ors_api_key", &self.ors_api_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl PlanConfig {
    /// Use `fallback` when no layer supplied an API key.
    pub(crate) fn with_fallback_api_key(mut self, fallback: Option<String>) -> Self {
        if self.ors_api_key.is_none() {
            self.ors_api_key = fallback.and_then(non_blank);
        }
        self
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match voyager_fs::is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply command-line overrides to a loaded request.
    pub(crate) fn apply_overrides(&self, mut request: TripRequest) -> TripRequest {
        if let Some(profile) = self.profile {
            request.profile = profile;
        }
        request
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut scheduler = SchedulerConfig::default();
        if let Some(hour) = args.day_start_hour {
            if !(0.0..24.0).contains(&hour) {
                return Err(CliError::InvalidDayStartHour { hour });
            }
            scheduler = scheduler.with_day_start_hour(hour);
        }

        Ok(Self {
            request_path,
            output: args.output,
            ors_base_url: args
                .ors_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            ors_api_key: args.ors_api_key.and_then(non_blank),
            profile: args.profile,
            scheduler,
        })
    }
}

fn non_blank(key: String) -> Option<String> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Builds a scheduler for the current plan invocation.
pub(crate) trait PlanSchedulerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Scheduler>, CliError>;
}

/// Schedules against OpenRouteService; requires an API key.
pub(crate) struct DefaultPlanSchedulerBuilder;

impl PlanSchedulerBuilder for DefaultPlanSchedulerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Scheduler>, CliError> {
        let api_key = config
            .ors_api_key
            .clone()
            .ok_or(CliError::MissingArgument {
                field: ARG_PLAN_ORS_API_KEY,
                env: ENV_PLAN_ORS_API_KEY,
            })?;
        let ors = OrsConfig::new(config.ors_base_url.clone()).with_api_key(api_key);
        let geo = OrsGeoService::with_config(ors).map_err(|source| CliError::BuildGeoService {
            base_url: config.ors_base_url.clone(),
            source,
        })?;
        Ok(Box::new(ItineraryScheduler::with_config(
            geo,
            config.scheduler,
        )))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanSchedulerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanSchedulerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config, builder)?;
    match &config.output {
        Some(path) => write_plan_file(path, &plan),
        None => write_plan(writer, &plan),
    }
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanSchedulerBuilder,
) -> Result<TripPlan, CliError> {
    let request = config.apply_overrides(load_trip_request(&config.request_path)?);
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let scheduler = builder.build(config)?;
    let plan = scheduler
        .schedule(&request)
        .map_err(|source| CliError::Schedule { source })?;
    log::info!(
        "planned {} day(s) in {} with {} attraction(s), {} meal(s) and {} warning(s)",
        plan.days.len(),
        plan.destination,
        plan.totals.attractions,
        plan.totals.meals,
        plan.warnings.len()
    );
    Ok(plan)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    log::debug!("resolved plan configuration: {config:?}");
    Ok(config)
}

/// Loads a JSON-encoded [`TripRequest`] from disk.
pub(crate) fn load_trip_request(path: &Utf8Path) -> Result<TripRequest, CliError> {
    let contents = voyager_fs::read_document(path).map_err(|source| CliError::ReadRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn render_plan(plan: &TripPlan) -> Result<String, CliError> {
    let mut payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialisePlan)?;
    payload.push('\n');
    Ok(payload)
}

fn write_plan(writer: &mut dyn Write, plan: &TripPlan) -> Result<(), CliError> {
    let payload = render_plan(plan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlan)
}

fn write_plan_file(path: &Utf8Path, plan: &TripPlan) -> Result<(), CliError> {
    let payload = render_plan(plan)?;
    voyager_fs::write_document(path, &payload).map_err(|source| CliError::WritePlanFile {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote trip plan to {path}");
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
