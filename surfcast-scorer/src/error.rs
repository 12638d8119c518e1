//! Errors raised while assembling a scoring configuration.
#![forbid(unsafe_code)]

use thiserror::Error;

/// A scoring configuration broke one of its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringConfigError {
    /// A curve had no breakpoints.
    #[error("{curve} curve has no breakpoints")]
    EmptyCurve {
        /// Curve name.
        curve: &'static str,
    },
    /// A breakpoint held `NaN` or an infinite value.
    #[error("{curve} curve breakpoint {label} is not finite")]
    NonFiniteBreakpoint {
        /// Curve name.
        curve: &'static str,
        /// Offending breakpoint.
        label: &'static str,
    },
    /// Breakpoints were not strictly increasing.
    #[error("{curve} curve breakpoint {label} is not above its predecessor")]
    UnorderedBreakpoints {
        /// Curve name.
        curve: &'static str,
        /// First out-of-order breakpoint.
        label: &'static str,
    },
    /// Component weights were negative, non-finite or did not sum to one.
    #[error("component weights must be non-negative and sum to 1.0 (got {sum})")]
    InvalidWeights {
        /// Observed weight total.
        sum: f64,
    },
    /// The location weight was outside `0.0..=1.0`.
    #[error("location weight {value} must lie in 0.0..=1.0")]
    InvalidLocationWeight {
        /// Configured value.
        value: f64,
    },
    /// Quality thresholds were not ordered `fair <= good <= excellent <= 100`.
    #[error(
        "quality thresholds must satisfy fair <= good <= excellent <= 100 \
         (got {fair}/{good}/{excellent})"
    )]
    UnorderedThresholds {
        /// Lower edge of "fair".
        fair: u8,
        /// Lower edge of "good".
        good: u8,
        /// Lower edge of "excellent".
        excellent: u8,
    },
    /// Direction bands were out of order or multipliers invalid.
    #[error("wind direction bands must be ordered within 0..=180 with non-negative multipliers")]
    InvalidDirectionBands,
}
