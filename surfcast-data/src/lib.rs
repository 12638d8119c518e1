//! Data access for the surfcast conditions engine.
//!
//! Responsibilities:
//! - Implement [`surfcast_core::MarineDataSource`] over HTTP.
//! - Decode the upstream JSON formats into core types.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `surfcast-core` and
//!   `surfcast-pipeline`).
//! - Missing fields are passed through as `None`; interpretation belongs to
//!   the pipeline.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod marine;

pub use marine::{
    DEFAULT_USER_AGENT, HttpMarineSource, HttpMarineSourceConfig, ProviderBuildError,
};
