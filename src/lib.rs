//! Facade crate for the surfcast conditions engine.
//!
//! This crate re-exports the core domain types, the quality scorer and the
//! interpolation pipeline, and exposes the HTTP marine data source behind the
//! `http` feature flag.

#![forbid(unsafe_code)]

pub use surfcast_core::{
    BiasRecord, CoastlinePoint, ExclusionZone, FetchError, MarineDataSource, MarineRequest,
    MarineSnapshot, QualityLevel, QualityScorer, RegistryError, Section, SectionRegistry,
    StationReading, SurfConditions, TideReading, TideTrend, WaveDataPoint,
};
pub use surfcast_pipeline::{
    ConditionsPipeline, FallbackStrategy, InterpolationConfig, InterpolationConfigError,
    PipelineConfig, PipelineError, PipelineRun, RunSummary,
};
pub use surfcast_scorer::{
    ScoringConfig, ScoringConfigError, WaveQualityScorer, calculate_wave_quality,
};

#[cfg(feature = "http")]
pub use surfcast_data::{HttpMarineSource, HttpMarineSourceConfig, ProviderBuildError};
