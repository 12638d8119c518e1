//! Test-only helpers: an in-memory `MarineDataSource`, a fixed scorer and
//! shorthand constructors for station readings.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use geo::Coord;

use crate::{
    FetchError, MarineDataSource, MarineValues, Observation, QualityLevel, QualityScorer,
    StationReading, SurfConditions, TideSeries,
};

/// `MarineDataSource` serving canned responses.
///
/// Wave and wind requests return the configured readings (or error); tide
/// requests are answered per station id, and unknown ids yield an empty
/// series.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    waves: Vec<StationReading>,
    wind: Vec<StationReading>,
    wave_error: Option<FetchError>,
    wind_error: Option<FetchError>,
    tides: BTreeMap<String, Result<TideSeries, FetchError>>,
}

impl StaticSource {
    /// Serve `readings` for both wave and wind requests.
    #[must_use]
    pub fn with_readings(readings: Vec<StationReading>) -> Self {
        Self {
            waves: readings.clone(),
            wind: readings,
            ..Self::default()
        }
    }

    /// Serve `readings` for wave requests only.
    #[must_use]
    pub fn with_waves(mut self, readings: Vec<StationReading>) -> Self {
        self.waves = readings;
        self
    }

    /// Serve `readings` for wind requests only.
    #[must_use]
    pub fn with_wind(mut self, readings: Vec<StationReading>) -> Self {
        self.wind = readings;
        self
    }

    /// Fail every wave request with `error`.
    #[must_use]
    pub fn with_wave_error(mut self, error: FetchError) -> Self {
        self.wave_error = Some(error);
        self
    }

    /// Fail every wind request with `error`.
    #[must_use]
    pub fn with_wind_error(mut self, error: FetchError) -> Self {
        self.wind_error = Some(error);
        self
    }

    /// Answer tide requests for `station_id` with `outcome`.
    #[must_use]
    pub fn with_tide(
        mut self,
        station_id: impl Into<String>,
        outcome: Result<TideSeries, FetchError>,
    ) -> Self {
        self.tides.insert(station_id.into(), outcome);
        self
    }
}

impl MarineDataSource for StaticSource {
    fn fetch_waves(&self, _stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
        match &self.wave_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.waves.clone()),
        }
    }

    fn fetch_wind(&self, _stations: &[Coord<f64>]) -> Result<Vec<StationReading>, FetchError> {
        match &self.wind_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.wind.clone()),
        }
    }

    fn fetch_tide(&self, station_id: &str) -> Result<TideSeries, FetchError> {
        self.tides
            .get(station_id)
            .cloned()
            .unwrap_or_else(|| Ok(TideSeries::default()))
    }
}

/// `QualityScorer` returning a fixed score and a coarse level.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScorer(pub u8);

impl QualityScorer for FixedScorer {
    fn score(&self, _conditions: &SurfConditions, _location_factor: f64) -> u8 {
        self.0
    }

    fn level(&self, score: u8) -> QualityLevel {
        match score {
            75.. => QualityLevel::Excellent,
            55.. => QualityLevel::Good,
            35.. => QualityLevel::Fair,
            _ => QualityLevel::Poor,
        }
    }
}

/// Fixed reference instant for tests.
#[must_use]
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Values with a full wave family and full wind family.
#[must_use]
pub const fn full_values(
    wave_height_m: f64,
    wave_period_s: f64,
    wave_direction: f64,
    wind_speed_kts: f64,
    wind_direction: f64,
) -> MarineValues {
    MarineValues {
        wave_height: Some(wave_height_m),
        wave_period: Some(wave_period_s),
        wave_direction: Some(wave_direction),
        swell_height: None,
        swell_period: None,
        sea_surface_temperature: Some(64.0),
        wind_speed: Some(wind_speed_kts),
        wind_direction: Some(wind_direction),
        air_temperature: Some(70.0),
    }
}

/// A station at (`lat`, `lng`) whose current snapshot holds `values`.
#[must_use]
pub fn station_with_current(lat: f64, lng: f64, values: MarineValues) -> StationReading {
    StationReading::empty(Coord { x: lng, y: lat })
        .with_current(Observation::new(Some(reference_time()), values))
}

/// A station at (`lat`, `lng`) with no usable data at all.
#[must_use]
pub fn silent_station(lat: f64, lng: f64) -> StationReading {
    StationReading::empty(Coord { x: lng, y: lat }).with_hourly(vec![
        Observation::default(),
        Observation::new(Some(reference_time()), MarineValues::default()),
    ])
}
