//! NOAA CO-OPS `datagetter` response types for the `water_level` product.
//!
//! Values arrive as strings, and a missing sample has an empty value. A
//! station with no recent data answers with an `error` object instead of
//! `data`, still with HTTP 200.
//!
//! See: <https://api.tidesandcurrents.noaa.gov/api/prod/>

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use surfcast_core::{FetchError, TideSample, TideSeries};

/// Timestamp layout used when `time_zone=gmt` is requested.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Response body for a water-level query.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WaterLevelResponse {
    /// Samples in ascending time order.
    pub data: Vec<WaterLevel>,
    /// Present when the station has no data for the requested window.
    pub error: Option<ApiError>,
}

/// NOAA error object.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// Human-readable reason.
    pub message: String,
}

/// One water-level sample.
#[derive(Debug, Deserialize)]
pub struct WaterLevel {
    /// Sample time, `YYYY-MM-DD HH:MM`.
    pub t: String,
    /// Water level in feet, or an empty string when missing.
    pub v: String,
}

impl WaterLevel {
    fn to_sample(&self) -> Option<TideSample> {
        let time = parse_time(&self.t)?;
        let level_ft = self.v.trim().parse::<f64>().ok()?;
        Some(TideSample { time, level_ft })
    }
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Decode a water-level response body into a tide series.
///
/// Malformed samples are skipped.
///
/// # Errors
/// Returns [`FetchError::Parse`] for malformed bodies and
/// [`FetchError::EmptyResponse`] when the station reported no usable samples.
pub fn decode_tide(url: &str, body: &[u8]) -> Result<TideSeries, FetchError> {
    let response: WaterLevelResponse =
        serde_json::from_slice(body).map_err(|err| FetchError::Parse {
            url: url.to_owned(),
            message: err.to_string(),
        })?;
    if let Some(error) = &response.error {
        log::debug!("tide service reported no data for {url}: {}", error.message);
    }
    let samples: Vec<TideSample> = response
        .data
        .iter()
        .filter_map(WaterLevel::to_sample)
        .collect();
    if samples.is_empty() {
        return Err(FetchError::EmptyResponse {
            url: url.to_owned(),
        });
    }
    Ok(TideSeries::new(samples))
}
