//! Tide gauge samples and the height/trend summary derived from them.

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction the water level is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TideTrend {
    /// Water level is increasing.
    #[default]
    Rising,
    /// Water level is steady or decreasing.
    Falling,
}

impl TideTrend {
    /// Lowercase label used in output records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
        }
    }
}

/// A tide height (ft) and trend for one station.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TideReading {
    /// Water level in feet above the station datum.
    pub height_ft: f64,
    /// Whether the level is rising or falling.
    pub trend: TideTrend,
}

impl TideReading {
    /// Reading used when no tide data is available at all.
    pub const DEFAULT: Self = Self {
        height_ft: 3.0,
        trend: TideTrend::Rising,
    };
}

impl Default for TideReading {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single water-level sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TideSample {
    /// Sample timestamp.
    pub time: DateTime<Utc>,
    /// Water level in feet.
    pub level_ft: f64,
}

/// A short, time-ordered series of water-level samples.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TideSeries {
    samples: Vec<TideSample>,
}

impl TideSeries {
    /// Build a series, sorting samples by time and dropping non-finite levels.
    #[must_use]
    pub fn new(mut samples: Vec<TideSample>) -> Self {
        samples.retain(|sample| sample.level_ft.is_finite());
        samples.sort_by_key(|sample| sample.time);
        Self { samples }
    }

    /// Samples in ascending time order.
    #[must_use]
    pub fn samples(&self) -> &[TideSample] {
        &self.samples
    }

    /// Summarise the two most recent samples.
    ///
    /// The trend is [`TideTrend::Rising`] when the latest level is strictly
    /// above the previous one. A single sample keeps the default trend, and an
    /// empty series yields `None`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use surfcast_core::{TideSample, TideSeries, TideTrend};
    ///
    /// let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    /// let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 6, 0).unwrap();
    /// let series = TideSeries::new(vec![
    ///     TideSample { time: t0, level_ft: 2.1 },
    ///     TideSample { time: t1, level_ft: 2.4 },
    /// ]);
    /// let reading = series.reading().unwrap();
    /// assert_eq!(reading.trend, TideTrend::Rising);
    /// assert_eq!(reading.height_ft, 2.4);
    /// ```
    #[must_use]
    pub fn reading(&self) -> Option<TideReading> {
        let mut recent = self.samples.iter().rev();
        let current = recent.next()?;
        let trend = match recent.next() {
            Some(previous) if current.level_ft > previous.level_ft => TideTrend::Rising,
            Some(_) => TideTrend::Falling,
            None => TideTrend::default(),
        };
        Some(TideReading {
            height_ft: current.level_ft,
            trend,
        })
    }
}
