//! `score` command: score a single set of conditions.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use surfcast_core::{QualityLevel, QualityScorer, SurfConditions};
use surfcast_scorer::WaveQualityScorer;

use crate::{
    ARG_HEIGHT_FT, ARG_LOCATION_FACTOR, ARG_PERIOD_S, ARG_WAVE_DIR, ARG_WIND_DIR, ARG_WIND_KTS,
    CliError, ENV_HEIGHT_FT, ENV_PERIOD_S, ENV_WAVE_DIR, ENV_WIND_DIR, ENV_WIND_KTS,
};

/// Location factor applied when none is given.
const DEFAULT_LOCATION_FACTOR: f64 = 1.0;

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score one set of surf conditions with the shipped quality \
                 curves and print the score and level as JSON.",
    about = "Score a single set of conditions"
)]
#[ortho_config(prefix = "SURFCAST")]
pub(crate) struct ScoreArgs {
    /// Wave height in feet.
    #[arg(long = ARG_HEIGHT_FT, value_name = "feet")]
    #[serde(default)]
    pub(crate) height_ft: Option<f64>,
    /// Wave period in seconds.
    #[arg(long = ARG_PERIOD_S, value_name = "seconds")]
    #[serde(default)]
    pub(crate) period_s: Option<f64>,
    /// Wind speed in knots.
    #[arg(long = ARG_WIND_KTS, value_name = "knots")]
    #[serde(default)]
    pub(crate) wind_kts: Option<f64>,
    /// Direction the wind blows from, in degrees.
    #[arg(long = ARG_WIND_DIR, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) wind_dir: Option<f64>,
    /// Direction the waves arrive from, in degrees.
    #[arg(long = ARG_WAVE_DIR, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) wave_dir: Option<f64>,
    /// Spot quality in `0.0..=1.0`; defaults to 1.0.
    #[arg(long = ARG_LOCATION_FACTOR, value_name = "factor")]
    #[serde(default)]
    pub(crate) location_factor: Option<f64>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreConfig {
    pub(crate) conditions: SurfConditions,
    pub(crate) location_factor: f64,
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let conditions = SurfConditions {
            wave_height_ft: required(args.height_ft, ARG_HEIGHT_FT, ENV_HEIGHT_FT)?,
            wave_period_s: required(args.period_s, ARG_PERIOD_S, ENV_PERIOD_S)?,
            wave_direction_deg: required(args.wave_dir, ARG_WAVE_DIR, ENV_WAVE_DIR)?,
            wind_speed_kts: required(args.wind_kts, ARG_WIND_KTS, ENV_WIND_KTS)?,
            wind_direction_deg: required(args.wind_dir, ARG_WIND_DIR, ENV_WIND_DIR)?,
        };
        let location_factor = args.location_factor.unwrap_or(DEFAULT_LOCATION_FACTOR);
        if !location_factor.is_finite() {
            return Err(CliError::InvalidArgument {
                field: ARG_LOCATION_FACTOR,
                reason: "must be a finite number",
            });
        }
        Ok(Self {
            conditions,
            location_factor,
        })
    }
}

fn required(value: Option<f64>, field: &'static str, env: &'static str) -> Result<f64, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

/// JSON body printed by the `score` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ScoreReport {
    pub(crate) score: u8,
    pub(crate) level: QualityLevel,
}

pub(crate) fn run_score(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_score(&config, writer)
}

pub(crate) fn execute_score(config: &ScoreConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let scorer = WaveQualityScorer::new();
    let score = scorer.score(&config.conditions, config.location_factor);
    let report = ScoreReport {
        score,
        level: scorer.level(score),
    };
    let payload = serde_json::to_string(&report).map_err(CliError::Serialise)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteStdout)
}
