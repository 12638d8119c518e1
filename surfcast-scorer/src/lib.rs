//! Surf quality scoring for interpolated marine conditions.
//!
//! [`WaveQualityScorer`] implements [`surfcast_core::QualityScorer`]. It maps
//! wave height, wave period and wind speed through independently tuned
//! piecewise-linear curves, scales the wind component by a direction modifier
//! derived from the wind/wave angle, blends the three with fixed weights and
//! finally mixes in a per-section location factor.
//!
//! The scorer is pure: no I/O, no randomness, no interior state.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod curve;
mod error;
mod scorer;
mod types;
pub mod wind;

pub use curve::{Breakpoint, PiecewiseLinear};
pub use error::ScoringConfigError;
pub use scorer::{ComponentScores, WaveQualityScorer, calculate_wave_quality};
pub use types::{ComponentWeights, QualityThresholds, ScoringConfig, WEIGHT_SUM_TOLERANCE};
pub use wind::{DirectionModifiers, angular_difference};

#[cfg(test)]
mod tests;
