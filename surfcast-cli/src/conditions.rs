//! `run` command: score every coastline point.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use surfcast_core::{MarineDataSource, MarineSnapshot, SectionRegistry, WaveDataPoint};
use surfcast_data::{HttpMarineSource, HttpMarineSourceConfig};
use surfcast_pipeline::{ConditionsPipeline, FallbackStrategy, PipelineConfig};
use surfcast_scorer::WaveQualityScorer;

use crate::{
    ARG_FALLBACK_SEED, ARG_FORECAST_BASE_URL, ARG_MARINE_BASE_URL, ARG_OUTPUT, ARG_SNAPSHOT,
    ARG_TIDE_BASE_URL, ARG_TIMEOUT_SECS, CliError,
};

/// CLI arguments for the `run` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch wave, wind and tide data for the built-in coastline, \
                 interpolate it onto every coastline point and score the \
                 result. A recorded snapshot can replace the live fetch. \
                 Options can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Score every coastline point"
)]
#[ortho_config(prefix = "SURFCAST")]
pub(crate) struct RunArgs {
    /// Score a recorded JSON snapshot instead of fetching live data.
    #[arg(long = ARG_SNAPSHOT, value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Write the records to a file instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Base URL of the marine (wave) service.
    #[arg(long = ARG_MARINE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) marine_base_url: Option<String>,
    /// Base URL of the forecast (wind) service.
    #[arg(long = ARG_FORECAST_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) forecast_base_url: Option<String>,
    /// Base URL of the tide-gauge service.
    #[arg(long = ARG_TIDE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) tide_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Seed for randomised fallback values when a point has no station data.
    #[arg(long = ARG_FALLBACK_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) fallback_seed: Option<u64>,
}

impl RunArgs {
    pub(crate) fn into_config(self) -> Result<RunConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RunConfig::try_from(merged)
    }
}

/// Resolved `run` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    /// Recorded snapshot to score instead of fetching.
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Output file; `None` writes to standard output.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Live source settings.
    pub(crate) source: HttpMarineSourceConfig,
    /// How points without station data are filled.
    pub(crate) fallback: FallbackStrategy,
}

impl RunConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.snapshot {
            Some(path) => Self::require_existing(path, ARG_SNAPSHOT),
            None => Ok(()),
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match surfcast_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
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
}

impl TryFrom<RunArgs> for RunConfig {
    type Error = CliError;

    fn try_from(args: RunArgs) -> Result<Self, Self::Error> {
        let mut source = HttpMarineSourceConfig::default();
        if let Some(url) = args.marine_base_url {
            source = source.with_marine_base_url(url);
        }
        if let Some(url) = args.forecast_base_url {
            source = source.with_forecast_base_url(url);
        }
        if let Some(url) = args.tide_base_url {
            source = source.with_tide_base_url(url);
        }
        match args.timeout_secs {
            Some(0) => {
                return Err(CliError::InvalidArgument {
                    field: ARG_TIMEOUT_SECS,
                    reason: "must be at least one second",
                });
            }
            Some(secs) => source = source.with_timeout(Duration::from_secs(secs)),
            None => {}
        }
        let fallback = args
            .fallback_seed
            .map_or(FallbackStrategy::Climatology, |seed| {
                FallbackStrategy::Jitter { seed }
            });
        Ok(Self {
            snapshot: args.snapshot,
            output: args.output,
            source,
            fallback,
        })
    }
}

/// Builds the live data source for the current run invocation.
pub(crate) trait SourceBuilder {
    fn build(&self, config: &HttpMarineSourceConfig)
    -> Result<Box<dyn MarineDataSource>, CliError>;
}

pub(crate) struct HttpSourceBuilder;

impl SourceBuilder for HttpSourceBuilder {
    fn build(
        &self,
        config: &HttpMarineSourceConfig,
    ) -> Result<Box<dyn MarineDataSource>, CliError> {
        Ok(Box::new(HttpMarineSource::with_config(config.clone())?))
    }
}

pub(crate) fn run_conditions(args: RunArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_conditions_with(args, &HttpSourceBuilder, Utc::now(), writer)
}

pub(crate) fn run_conditions_with(
    args: RunArgs,
    builder: &dyn SourceBuilder,
    run_time: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_run(&config, builder, run_time, writer)
}

pub(crate) fn execute_run(
    config: &RunConfig,
    builder: &dyn SourceBuilder,
    run_time: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let points = score_points(config, builder, run_time)?;
    write_points(config.output.as_deref(), &points, writer)
}

fn score_points(
    config: &RunConfig,
    builder: &dyn SourceBuilder,
    run_time: DateTime<Utc>,
) -> Result<Vec<WaveDataPoint>, CliError> {
    let pipeline = ConditionsPipeline::with_config(
        SectionRegistry::san_diego(),
        WaveQualityScorer::new(),
        PipelineConfig::default().with_fallback(config.fallback),
    )?;
    if let Some(path) = &config.snapshot {
        let snapshot = load_snapshot(path)?;
        return Ok(pipeline.run(&snapshot, run_time));
    }
    let source = builder.build(&config.source)?;
    let run = pipeline.fetch_and_run(source.as_ref(), run_time)?;
    Ok(run.points)
}

/// Loads a JSON-encoded [`MarineSnapshot`] from disk.
pub(crate) fn load_snapshot(path: &Utf8Path) -> Result<MarineSnapshot, CliError> {
    let body = surfcast_fs::read_utf8(path).map_err(|source| CliError::ReadSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| CliError::ParseSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

fn write_points(
    output: Option<&Utf8Path>,
    points: &[WaveDataPoint],
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(points).map_err(CliError::Serialise)?;
    match output {
        Some(path) => {
            surfcast_fs::write_utf8(path, &format!("{payload}\n")).map_err(|source| {
                CliError::WriteOutput {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            log::info!("wrote {} records to {path}", points.len());
            Ok(())
        }
        None => {
            writer
                .write_all(payload.as_bytes())
                .map_err(CliError::WriteStdout)?;
            writer.write_all(b"\n").map_err(CliError::WriteStdout)
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RunConfig, CliError> {
    let merged = RunArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RunConfig::try_from(merged)
}
