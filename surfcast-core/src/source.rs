//! Fetch raw marine readings from an upstream provider.
//!
//! The `MarineDataSource` trait abstracts the provider that supplies wave,
//! wind and tide data for one pipeline run. Implementations may return
//! missing values for any field; only a wholesale failure of the wave or wind
//! request is reported as an error.

use std::collections::BTreeMap;

use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SectionRegistry, StationReading, TideReading, TideSeries, TideStation};

/// Errors from a [`MarineDataSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request exceeded its timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The provider answered with a non-success status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The provider could not be reached.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response from {url}: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The provider returned no readings.
    #[error("no readings returned by {url}")]
    EmptyResponse {
        /// Requested URL.
        url: String,
    },
    /// The request listed no coordinates.
    #[error("at least one query station is required")]
    NoStations,
}

/// Everything a source needs to know to fetch one run's data.
#[derive(Debug, Clone, PartialEq)]
pub struct MarineRequest {
    /// Offshore query coordinates for the wave and wind requests.
    pub stations: Vec<Coord<f64>>,
    /// Tide gauges to query.
    pub tide_stations: Vec<TideStation>,
}

impl MarineRequest {
    /// Build the request covering every query and tide station in `registry`.
    #[must_use]
    pub fn from_registry(registry: &SectionRegistry) -> Self {
        Self {
            stations: registry.query_stations().to_vec(),
            tide_stations: registry.tide_stations().to_vec(),
        }
    }
}

/// Raw data gathered for one pipeline run.
///
/// Tide readings are keyed by tide-station name.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarineSnapshot {
    /// Readings from the marine (wave) endpoint.
    pub waves: Vec<StationReading>,
    /// Readings from the forecast (wind) endpoint.
    pub wind: Vec<StationReading>,
    /// Latest reading per tide station.
    pub tides: BTreeMap<String, TideReading>,
}

/// Fetch marine readings for a set of query coordinates.
///
/// The trait is synchronous so the pipeline can be embedded in synchronous
/// callers; network-backed implementations block internally.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use surfcast_core::{FetchError, MarineDataSource, StationReading, TideSeries};
///
/// struct Calm;
///
/// impl MarineDataSource for Calm {
///     fn fetch_waves(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
///         Ok(stations.iter().copied().map(StationReading::empty).collect())
///     }
///
///     fn fetch_wind(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
///         self.fetch_waves(stations)
///     }
///
///     fn fetch_tide(&self, _station_id: &str) -> Result<TideSeries, FetchError> {
///         Ok(TideSeries::default())
///     }
/// }
///
/// let waves = Calm.fetch_waves(&[Coord { x: -117.3, y: 32.9 }])?;
/// assert_eq!(waves.len(), 1);
/// # Ok::<(), FetchError>(())
/// ```
pub trait MarineDataSource: Send + Sync {
    /// Fetch wave, swell and sea-temperature readings.
    fn fetch_waves(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError>;

    /// Fetch wind and air-temperature readings.
    fn fetch_wind(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError>;

    /// Fetch the recent water-level series for a tide gauge.
    fn fetch_tide(&self, station_id: &str) -> Result<TideSeries, FetchError>;

    /// Fetch everything one pipeline run needs.
    ///
    /// Wave and wind failures abort; a failing or empty tide station is
    /// logged and left out of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first wave or wind [`FetchError`].
    fn fetch_snapshot(&self, request: &MarineRequest) -> Result<MarineSnapshot, FetchError> {
        if request.stations.is_empty() {
            return Err(FetchError::NoStations);
        }
        let waves = self.fetch_waves(&request.stations)?;
        let wind = self.fetch_wind(&request.stations)?;
        let tides = request
            .tide_stations
            .iter()
            .filter_map(|station| collect_tide(station, self.fetch_tide(&station.station_id)))
            .collect();
        Ok(MarineSnapshot { waves, wind, tides })
    }
}

/// Turn one tide fetch outcome into a snapshot entry, logging failures.
#[must_use]
pub fn collect_tide(
    station: &TideStation,
    outcome: Result<TideSeries, FetchError>,
) -> Option<(String, TideReading)> {
    match outcome {
        Ok(series) => {
            let Some(reading) = series.reading() else {
                log::warn!(
                    "tide station {} ({}) returned no samples; using default",
                    station.name,
                    station.station_id
                );
                return None;
            };
            Some((station.name.clone(), reading))
        }
        Err(err) => {
            log::warn!(
                "tide station {} ({}) unavailable; using default: {err}",
                station.name,
                station.station_id
            );
            None
        }
    }
}
