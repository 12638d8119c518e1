//! Test utilities for marine data sources.
//!
//! This module provides [`StubMarineSource`], a deterministic test double for
//! [`MarineDataSource`] that serves canned upstream JSON bodies through the
//! same decoders as [`super::HttpMarineSource`], without making HTTP
//! requests.

use std::collections::BTreeMap;

use geo::Coord;
use surfcast_core::{FetchError, MarineDataSource, StationReading, TideSeries};

use super::noaa::decode_tide;
use super::open_meteo::decode_stations;

const MARINE_URL: &str = "stub://marine/v1/marine";
const FORECAST_URL: &str = "stub://forecast/v1/forecast";

/// Stub `MarineDataSource` for testing.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use surfcast_core::MarineDataSource;
/// use surfcast_data::marine::test_support::StubMarineSource;
///
/// let source = StubMarineSource::default().with_marine_json(
///     r#"[{"latitude": 33.0, "longitude": -117.3,
///          "current": {"time": "2024-06-01T12:00", "wave_height": 1.2}}]"#,
/// );
///
/// let waves = source.fetch_waves(&[Coord { x: -117.3, y: 33.0 }]).unwrap();
/// assert_eq!(waves.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StubMarineSource {
    marine: Result<String, FetchError>,
    forecast: Result<String, FetchError>,
    tides: BTreeMap<String, Result<String, FetchError>>,
}

impl Default for StubMarineSource {
    fn default() -> Self {
        Self {
            marine: Ok("[]".to_owned()),
            forecast: Ok("[]".to_owned()),
            tides: BTreeMap::new(),
        }
    }
}

impl StubMarineSource {
    /// Serve `body` for marine (wave) requests.
    #[must_use]
    pub fn with_marine_json(mut self, body: impl Into<String>) -> Self {
        self.marine = Ok(body.into());
        self
    }

    /// Serve `body` for forecast (wind) requests.
    #[must_use]
    pub fn with_forecast_json(mut self, body: impl Into<String>) -> Self {
        self.forecast = Ok(body.into());
        self
    }

    /// Fail marine requests with `error`.
    #[must_use]
    pub fn with_marine_error(mut self, error: FetchError) -> Self {
        self.marine = Err(error);
        self
    }

    /// Fail forecast requests with `error`.
    #[must_use]
    pub fn with_forecast_error(mut self, error: FetchError) -> Self {
        self.forecast = Err(error);
        self
    }

    /// Serve `body` for tide requests to `station_id`.
    #[must_use]
    pub fn with_tide_json(mut self, station_id: impl Into<String>, body: impl Into<String>) -> Self {
        self.tides.insert(station_id.into(), Ok(body.into()));
        self
    }

    /// Fail tide requests to `station_id` with `error`.
    #[must_use]
    pub fn with_tide_error(mut self, station_id: impl Into<String>, error: FetchError) -> Self {
        self.tides.insert(station_id.into(), Err(error));
        self
    }
}

fn serve<T>(
    url: &str,
    body: &Result<String, FetchError>,
    decode: fn(&str, &[u8]) -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    match body {
        Ok(json) => decode(url, json.as_bytes()),
        Err(error) => Err(error.clone()),
    }
}

impl MarineDataSource for StubMarineSource {
    fn fetch_waves(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
        if stations.is_empty() {
            return Err(FetchError::NoStations);
        }
        serve(MARINE_URL, &self.marine, decode_stations)
    }

    fn fetch_wind(&self, stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
        if stations.is_empty() {
            return Err(FetchError::NoStations);
        }
        serve(FORECAST_URL, &self.forecast, decode_stations)
    }

    fn fetch_tide(&self, station_id: &str) -> Result<TideSeries, FetchError> {
        let url = format!("stub://tides/{station_id}");
        match self.tides.get(station_id) {
            Some(body) => serve(&url, body, decode_tide),
            None => Err(FetchError::EmptyResponse { url }),
        }
    }
}
