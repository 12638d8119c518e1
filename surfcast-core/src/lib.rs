//! Core domain types for the surfcast conditions engine.
//!
//! The crate defines the contract shared by every other component:
//! - the station and tide readings produced by a [`MarineDataSource`],
//! - the static [`SectionRegistry`] of coastline points and their bias tables,
//! - the [`QualityScorer`] seam used to turn physical conditions into a score,
//! - the [`WaveDataPoint`] records emitted by a pipeline run.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod output;
pub mod registry;
pub mod scorer;
pub mod source;
pub mod station;
pub mod tide;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{planar_distance, squared_distance};
pub use output::{QualityLevel, WaveDataPoint};
pub use registry::{
    BiasRecord, CoastlinePoint, ExclusionZone, RegistryError, Section, SectionRegistry,
    SectionRegistryBuilder, TideStation,
};
pub use scorer::{QualityScorer, SurfConditions};
pub use source::{FetchError, MarineDataSource, MarineRequest, MarineSnapshot, collect_tide};
pub use station::{MarineValues, Observation, StationReading};
pub use tide::{TideReading, TideSample, TideSeries, TideTrend};
