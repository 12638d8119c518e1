//! Open-Meteo response types for the marine and forecast endpoints.
//!
//! A request naming several coordinates returns a JSON array with one
//! location object per coordinate; a single coordinate returns a bare object.
//! Each location carries an optional `current` block and an optional `hourly`
//! block of parallel arrays. Any value may be `null`.
//!
//! See: <https://open-meteo.com/en/docs/marine-weather-api>

use chrono::{DateTime, NaiveDateTime, Utc};
use geo::Coord;
use serde::Deserialize;
use surfcast_core::{FetchError, MarineValues, Observation, StationReading};

/// Variables requested from the marine endpoint.
pub const MARINE_VARIABLES: &str =
    "wave_height,wave_period,wave_direction,swell_wave_height,swell_wave_period,sea_surface_temperature";

/// Variables requested from the forecast endpoint.
pub const FORECAST_VARIABLES: &str = "wind_speed_10m,wind_direction_10m,temperature_2m";

/// Timestamp layout used when `timezone=GMT` is requested.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Top-level response body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationsResponse {
    /// Error object returned with a 4xx status or an invalid query.
    Failure(ApiError),
    /// One location object per requested coordinate.
    Many(Vec<LocationResponse>),
    /// A single location object.
    One(LocationResponse),
}

/// Open-Meteo error object.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// Always `true` for error objects.
    pub error: bool,
    /// Human-readable reason.
    pub reason: String,
}

/// Data for one requested coordinate.
#[derive(Debug, Deserialize)]
pub struct LocationResponse {
    /// Latitude of the grid cell that served the request.
    pub latitude: f64,
    /// Longitude of the grid cell that served the request.
    pub longitude: f64,
    /// Most recent values.
    #[serde(default)]
    pub current: Option<CurrentBlock>,
    /// Hourly series.
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
}

/// The `current` block.
#[derive(Debug, Default, Deserialize)]
pub struct CurrentBlock {
    /// Observation time.
    #[serde(default)]
    pub time: Option<String>,
    /// Values keyed by Open-Meteo variable name.
    #[serde(flatten)]
    pub values: ValueFields,
}

/// Scalar values present in a `current` block.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValueFields {
    pub wave_height: Option<f64>,
    pub wave_period: Option<f64>,
    pub wave_direction: Option<f64>,
    pub swell_wave_height: Option<f64>,
    pub swell_wave_period: Option<f64>,
    pub sea_surface_temperature: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub temperature_2m: Option<f64>,
}

/// The `hourly` block: one array per variable, indexed like `time`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub wave_height: Vec<Option<f64>>,
    pub wave_period: Vec<Option<f64>>,
    pub wave_direction: Vec<Option<f64>>,
    pub swell_wave_height: Vec<Option<f64>>,
    pub swell_wave_period: Vec<Option<f64>>,
    pub sea_surface_temperature: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
    pub temperature_2m: Vec<Option<f64>>,
}

impl From<ValueFields> for MarineValues {
    fn from(fields: ValueFields) -> Self {
        Self {
            wave_height: fields.wave_height,
            wave_period: fields.wave_period,
            wave_direction: fields.wave_direction,
            swell_height: fields.swell_wave_height,
            swell_period: fields.swell_wave_period,
            sea_surface_temperature: fields.sea_surface_temperature,
            wind_speed: fields.wind_speed_10m,
            wind_direction: fields.wind_direction_10m,
            air_temperature: fields.temperature_2m,
        }
    }
}

impl HourlyBlock {
    fn into_observations(self) -> Vec<Observation> {
        self.time
            .iter()
            .enumerate()
            .map(|(index, time)| {
                let values = MarineValues {
                    wave_height: at(&self.wave_height, index),
                    wave_period: at(&self.wave_period, index),
                    wave_direction: at(&self.wave_direction, index),
                    swell_height: at(&self.swell_wave_height, index),
                    swell_period: at(&self.swell_wave_period, index),
                    sea_surface_temperature: at(&self.sea_surface_temperature, index),
                    wind_speed: at(&self.wind_speed_10m, index),
                    wind_direction: at(&self.wind_direction_10m, index),
                    air_temperature: at(&self.temperature_2m, index),
                };
                Observation::new(parse_time(time), values)
            })
            .collect()
    }
}

impl LocationResponse {
    /// Convert into a core station reading located at the served grid cell.
    #[must_use]
    pub fn into_reading(self) -> StationReading {
        let current = self.current.map(|block| {
            Observation::new(
                block.time.as_deref().and_then(parse_time),
                block.values.into(),
            )
        });
        StationReading {
            location: Coord {
                x: self.longitude,
                y: self.latitude,
            },
            current,
            hourly: self
                .hourly
                .map(HourlyBlock::into_observations)
                .unwrap_or_default(),
        }
    }
}

fn at(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten()
}

/// Parse an Open-Meteo timestamp, accepting RFC 3339 as well.
pub fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|time| time.with_timezone(&Utc))
        })
}

/// Decode a marine or forecast response body into station readings.
///
/// # Errors
/// Returns [`FetchError::Parse`] for malformed bodies or API error objects,
/// and [`FetchError::EmptyResponse`] when no locations are present.
pub fn decode_stations(url: &str, body: &[u8]) -> Result<Vec<StationReading>, FetchError> {
    let response: LocationsResponse =
        serde_json::from_slice(body).map_err(|err| FetchError::Parse {
            url: url.to_owned(),
            message: err.to_string(),
        })?;
    let locations = match response {
        LocationsResponse::Failure(error) => {
            return Err(FetchError::Parse {
                url: url.to_owned(),
                message: error.reason,
            });
        }
        LocationsResponse::Many(locations) => locations,
        LocationsResponse::One(location) => vec![location],
    };
    if locations.is_empty() {
        return Err(FetchError::EmptyResponse {
            url: url.to_owned(),
        });
    }
    Ok(locations
        .into_iter()
        .map(LocationResponse::into_reading)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    const MARINE_BODY: &str = r#"[
        {
            "latitude": 33.0,
            "longitude": -117.375,
            "current": {
                "time": "2024-06-01T12:00",
                "interval": 3600,
                "wave_height": 1.24,
                "wave_period": 12.5,
                "wave_direction": 262,
                "swell_wave_height": null,
                "swell_wave_period": 14.1,
                "sea_surface_temperature": 65.3
            },
            "hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "wave_height": [null, 1.1],
                "wave_period": [11.0, 11.2],
                "wave_direction": [260, 261]
            }
        },
        {
            "latitude": 32.75,
            "longitude": -117.3
        }
    ]"#;

    #[rstest]
    fn decodes_multiple_locations() {
        let readings = decode_stations("marine", MARINE_BODY.as_bytes()).expect("should decode");

        assert_eq!(readings.len(), 2);
        let first = readings.first().expect("first station");
        assert_eq!(first.location, Coord { x: -117.375, y: 33.0 });
        let current = first.current.expect("current block");
        assert_eq!(current.values.wave_height, Some(1.24));
        assert_eq!(current.values.swell_height, None);
        assert_eq!(current.values.swell_period, Some(14.1));
        assert_eq!(
            current.time,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single()
        );
        assert_eq!(first.hourly.len(), 2);
        let second_hour = first.hourly.get(1).expect("second hour");
        assert_eq!(second_hour.values.wave_height, Some(1.1));
        assert_eq!(second_hour.values.sea_surface_temperature, None);

        let bare = readings.get(1).expect("second station");
        assert!(bare.current.is_none());
        assert!(bare.hourly.is_empty());
    }

    #[rstest]
    fn decodes_single_location_object() {
        let body = r#"{"latitude": 32.9, "longitude": -117.3,
            "current": {"time": "2024-06-01T12:00", "wind_speed_10m": 7.5,
                        "wind_direction_10m": 285, "temperature_2m": 69.8}}"#;

        let readings = decode_stations("forecast", body.as_bytes()).expect("should decode");

        let current = readings
            .first()
            .and_then(|reading| reading.current)
            .expect("current block");
        assert_eq!(current.values.wind_speed, Some(7.5));
        assert_eq!(current.values.air_temperature, Some(69.8));
    }

    #[rstest]
    fn reports_api_error_reason() {
        let body = r#"{"error": true, "reason": "Latitude must be in range of -90 to 90°."}"#;

        let err = decode_stations("marine", body.as_bytes()).expect_err("should fail");

        assert!(matches!(
            err,
            FetchError::Parse { ref message, .. } if message.starts_with("Latitude")
        ));
    }

    #[rstest]
    #[case("[]")]
    fn rejects_empty_array(#[case] body: &str) {
        let err = decode_stations("marine", body.as_bytes()).expect_err("should fail");
        assert_eq!(
            err,
            FetchError::EmptyResponse {
                url: "marine".to_owned()
            }
        );
    }

    #[rstest]
    fn rejects_malformed_body() {
        let err = decode_stations("marine", b"<html>").expect_err("should fail");
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[rstest]
    #[case("2024-06-01T12:00", true)]
    #[case("2024-06-01T12:00:00Z", true)]
    #[case("2024-06-01T05:00:00-07:00", true)]
    #[case("yesterday", false)]
    fn parses_timestamps(#[case] raw: &str, #[case] valid: bool) {
        let parsed = parse_time(raw);
        assert_eq!(parsed.is_some(), valid);
        if valid {
            assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single());
        }
    }
}
