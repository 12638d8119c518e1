//! Interpolation and scoring pipeline for coastline surf conditions.
//!
//! [`ConditionsPipeline`] takes one [`MarineSnapshot`](surfcast_core::MarineSnapshot)
//! and emits a [`WaveDataPoint`](surfcast_core::WaveDataPoint) for every
//! coastline point in a [`SectionRegistry`](surfcast_core::SectionRegistry):
//!
//! 1. the nearest stations (up to three, prefiltered to the section's bounding
//!    box) are inverse-distance weighted onto the point, with wave and wind
//!    families blended separately;
//! 2. the section's bias record corrects the blend and values are converted
//!    to feet, knots and degrees Fahrenheit;
//! 3. the configured [`QualityScorer`](surfcast_core::QualityScorer) turns the
//!    corrected conditions into a score.
//!
//! Points no station can serve receive a synthetic reading and are flagged,
//! so a run always emits one record per non-excluded point.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bias;
mod error;
mod fallback;
pub mod interpolate;
mod pipeline;
pub mod pool;
pub mod resolve;
pub mod tide;
pub mod weighting;

pub use bias::{AdjustedReading, apply_bias};
pub use error::{InterpolationConfigError, PipelineError};
pub use fallback::FallbackStrategy;
pub use interpolate::{InterpolatedReading, InterpolationConfig, StationInterpolator};
pub use pipeline::{ConditionsPipeline, PipelineConfig, PipelineRun, RunSummary};
pub use pool::StationPool;
pub use tide::resolve_tide;
