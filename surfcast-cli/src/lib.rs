//! Command-line interface for the surfcast conditions pipeline.
//!
//! Commands:
//! - `run` scores every coastline point from live provider data or a
//!   recorded snapshot and emits the records as JSON.
//! - `score` scores a single set of conditions.
//! - `sections` lists the built-in coastline sections.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod conditions;
mod error;
mod score;
mod sections;

pub use error::CliError;

use conditions::RunArgs;
use score::ScoreArgs;

pub(crate) const ARG_SNAPSHOT: &str = "snapshot";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_MARINE_BASE_URL: &str = "marine-base-url";
pub(crate) const ARG_FORECAST_BASE_URL: &str = "forecast-base-url";
pub(crate) const ARG_TIDE_BASE_URL: &str = "tide-base-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_FALLBACK_SEED: &str = "fallback-seed";
pub(crate) const ARG_HEIGHT_FT: &str = "height-ft";
pub(crate) const ARG_PERIOD_S: &str = "period-s";
pub(crate) const ARG_WIND_KTS: &str = "wind-kts";
pub(crate) const ARG_WIND_DIR: &str = "wind-dir";
pub(crate) const ARG_WAVE_DIR: &str = "wave-dir";
pub(crate) const ARG_LOCATION_FACTOR: &str = "location-factor";
pub(crate) const ENV_HEIGHT_FT: &str = "SURFCAST_CMDS_SCORE_HEIGHT_FT";
pub(crate) const ENV_PERIOD_S: &str = "SURFCAST_CMDS_SCORE_PERIOD_S";
pub(crate) const ENV_WIND_KTS: &str = "SURFCAST_CMDS_SCORE_WIND_KTS";
pub(crate) const ENV_WIND_DIR: &str = "SURFCAST_CMDS_SCORE_WIND_DIR";
pub(crate) const ENV_WAVE_DIR: &str = "SURFCAST_CMDS_SCORE_WAVE_DIR";

/// Run the surfcast CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, data loading
/// or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Run(args) => conditions::run_conditions(args, writer),
        Command::Score(args) => score::run_score(args, writer),
        Command::Sections => sections::run_sections(writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "surfcast",
    about = "Interpolate marine data onto the coastline and score surf quality",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every coastline point and print the records as JSON.
    Run(RunArgs),
    /// Score a single set of conditions.
    Score(ScoreArgs),
    /// List the coastline sections.
    Sections,
}

#[cfg(test)]
mod tests;
