//! Command-line host for the shift planning engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ENV_PLAN_REQUEST: &str = "SHIFTPLAN_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ARG_PLAN_SEED: &str = "seed";
pub(crate) const ARG_PLAN_CANDIDATES: &str = "candidates";
pub(crate) const ARG_PLAN_STRATEGY: &str = "strategy";
pub(crate) const ARG_PLAN_MAX_STOPS: &str = "max-stops";
pub(crate) const ARG_PLAN_NOMINATIM_URL: &str = "nominatim-url";
pub(crate) const ARG_PLAN_OUTPUT: &str = "output";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] describing the first failure.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "shiftplan",
    about = "Plan a driver's pickup and drop-off route for one shift",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Plan a route automatically from a JSON shift request.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
