//! Errors surfaced by pipeline construction and the fetch-then-run entry point.

use surfcast_core::FetchError;
use thiserror::Error;

/// Invalid interpolation settings.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InterpolationConfigError {
    /// The distance softening term must be finite and strictly positive.
    #[error("interpolation epsilon must be finite and greater than zero, got {epsilon}")]
    InvalidEpsilon {
        /// Rejected value.
        epsilon: f64,
    },
}

/// Run-level failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The pipeline configuration was rejected.
    #[error("invalid pipeline configuration")]
    Config {
        /// Underlying validation failure.
        #[from]
        source: InterpolationConfigError,
    },
    /// The wave or wind data could not be fetched.
    #[error("failed to fetch marine data")]
    Fetch {
        /// Underlying source failure.
        #[from]
        source: FetchError,
    },
}
