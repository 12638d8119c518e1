//! Output records emitted by a pipeline run.
//!
//! Field names and units are part of the external contract: downstream
//! consumers key off the camelCase names and expect feet, seconds, degrees,
//! knots and degrees Fahrenheit.

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TideTrend;

/// Display classification of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QualityLevel {
    /// Not worth the paddle out.
    Poor,
    /// Rideable.
    Fair,
    /// Worth a session.
    Good,
    /// Drop everything.
    Excellent,
}

impl QualityLevel {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored conditions for one coastline point.
///
/// Records are built fresh on every run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WaveDataPoint {
    /// `"{section}-{index}"`, unique within a run.
    pub id: String,
    /// Owning section name.
    pub section: String,
    /// Optional display label of the coastline point.
    pub name: Option<String>,
    /// Latitude (deg).
    pub lat: f64,
    /// Longitude (deg).
    pub lng: f64,
    /// Wave height (ft).
    pub wave_height: f64,
    /// Wave period (s).
    pub wave_period: f64,
    /// Wave direction (deg).
    pub wave_direction: f64,
    /// Swell height (ft), when any station reported swell.
    pub swell_height: Option<f64>,
    /// Swell period (s), when any station reported swell.
    pub swell_period: Option<f64>,
    /// Wind speed (kts).
    pub wind_speed: f64,
    /// Wind direction (deg).
    pub wind_direction: f64,
    /// Water temperature (°F).
    pub water_temp: f64,
    /// Air temperature (°F).
    pub air_temp: f64,
    /// Tide height (ft).
    pub tide_height: f64,
    /// Tide trend.
    pub tide_trend: TideTrend,
    /// Quality score in `0..=100`.
    pub quality_score: u8,
    /// Display classification of `quality_score`.
    pub quality_level: QualityLevel,
    /// `false` when synthetic fallback values replaced missing station data.
    pub interpolated: bool,
    /// Time the pipeline run started.
    pub timestamp: DateTime<Utc>,
    /// Earliest source timestamp actually used, if any station data was used.
    pub measurement_time: Option<DateTime<Utc>>,
}
