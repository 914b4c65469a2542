//! Shared test harness modules for the Voyager CLI.

use super::*;
use crate::plan::{
    DefaultPlanSchedulerBuilder, PlanConfig, PlanSchedulerBuilder, config_from_layers_for_test,
    load_trip_request, run_plan_with,
};

mod helpers;
