//! Readings returned by the upstream marine and forecast services.
//!
//! A [`StationReading`] is a query coordinate together with an optional
//! "current" [`Observation`] and an hourly series of observations. Any value
//! may be missing, and the current snapshot is not guaranteed to match the
//! first hourly entry.

use chrono::{DateTime, Utc};
use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical values reported for one instant at one station.
///
/// Units: heights in metres, periods in seconds, directions in degrees
/// (meteorological "from" convention), wind speed in knots, temperatures in
/// degrees Fahrenheit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct MarineValues {
    /// Significant wave height (m).
    pub wave_height: Option<f64>,
    /// Mean wave period (s).
    pub wave_period: Option<f64>,
    /// Mean wave direction (deg).
    pub wave_direction: Option<f64>,
    /// Swell wave height (m).
    pub swell_height: Option<f64>,
    /// Swell wave period (s).
    pub swell_period: Option<f64>,
    /// Sea-surface temperature (°F).
    pub sea_surface_temperature: Option<f64>,
    /// Wind speed at 10 m (kts).
    pub wind_speed: Option<f64>,
    /// Wind direction at 10 m (deg).
    pub wind_direction: Option<f64>,
    /// Air temperature at 2 m (°F).
    pub air_temperature: Option<f64>,
}

/// Values observed at a single timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Observation {
    /// Time the values refer to, when the provider reported one.
    pub time: Option<DateTime<Utc>>,
    /// Reported values.
    pub values: MarineValues,
}

impl Observation {
    /// Construct an observation at `time`.
    #[must_use]
    pub const fn new(time: Option<DateTime<Utc>>, values: MarineValues) -> Self {
        Self { time, values }
    }
}

/// Everything a provider returned for one query coordinate.
///
/// The hourly series is stored as rows, so every variable shares the same
/// index-to-timestamp mapping by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StationReading {
    /// Query coordinate the data was returned for.
    pub location: Coord<f64>,
    /// Most recent snapshot, if the provider supplied one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current: Option<Observation>,
    /// Time-ordered hourly observations.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hourly: Vec<Observation>,
}

impl StationReading {
    /// Construct a reading with no data attached.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use surfcast_core::StationReading;
    ///
    /// let reading = StationReading::empty(Coord { x: -117.4, y: 33.1 });
    /// assert!(reading.current.is_none());
    /// assert!(reading.hourly.is_empty());
    /// ```
    #[must_use]
    pub const fn empty(location: Coord<f64>) -> Self {
        Self {
            location,
            current: None,
            hourly: Vec::new(),
        }
    }

    /// Attach a current snapshot.
    #[must_use]
    pub fn with_current(mut self, current: Observation) -> Self {
        self.current = Some(current);
        self
    }

    /// Replace the hourly series.
    #[must_use]
    pub fn with_hourly(mut self, hourly: Vec<Observation>) -> Self {
        self.hourly = hourly;
        self
    }
}
