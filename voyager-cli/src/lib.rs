//! Command-line interface for the Voyager itinerary engine.
//!
//! The `plan` subcommand reads a JSON `TripRequest`, schedules it against
//! OpenRouteService and prints the resulting `TripPlan` as JSON. Options may
//! come from CLI flags, configuration files or `VOYAGER_*` environment
//! variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request-path";
pub(crate) const ARG_PLAN_OUTPUT: &str = "output";
pub(crate) const ARG_PLAN_ORS_BASE_URL: &str = "ors-base-url";
pub(crate) const ARG_PLAN_ORS_API_KEY: &str = "ors-api-key";
pub(crate) const ARG_PLAN_PROFILE: &str = "profile";
pub(crate) const ARG_PLAN_DAY_START_HOUR: &str = "day-start-hour";
pub(crate) const ENV_PLAN_REQUEST: &str = "VOYAGER_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_PLAN_ORS_API_KEY: &str = "VOYAGER_CMDS_PLAN_ORS_API_KEY";
pub(crate) const ENV_ORS_API_KEY: &str = "ORS_API_KEY";

/// Run the Voyager CLI with the current process arguments and environment.
///
/// `--help` and `--version` print and exit the process directly.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    init_logging(cli.verbose);
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

/// Log to stderr, honouring `RUST_LOG`; `--verbose` forces debug output.
fn init_logging(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "voyager",
    about = "Turn recommended attractions and restaurants into a day-by-day itinerary",
    version
)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Schedule a trip request into a timed plan.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
