//! Pick a usable value for a variable family from one station.
//!
//! The current snapshot wins when it holds every variable of the family.
//! Otherwise the hourly series is scanned from the start and the first row
//! holding the whole family is used. Non-finite numbers count as missing.

use chrono::{DateTime, Utc};
use surfcast_core::{MarineValues, StationReading};

/// A value resolved from a station with the time it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<T> {
    /// Extracted value.
    pub value: T,
    /// Observation time, when reported.
    pub time: Option<DateTime<Utc>>,
}

/// Wave height (m), period (s) and direction (deg).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    /// Height (m).
    pub height_m: f64,
    /// Period (s).
    pub period_s: f64,
    /// Direction (deg).
    pub direction_deg: f64,
}

/// Wind speed (kts), direction (deg) and air temperature (°F).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    /// Speed (kts).
    pub speed_kts: f64,
    /// Direction (deg).
    pub direction_deg: f64,
    /// Air temperature (°F).
    pub air_temp_f: f64,
}

/// Swell height (m) and period (s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellSample {
    /// Height (m).
    pub height_m: f64,
    /// Period (s).
    pub period_s: f64,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|number| number.is_finite())
}

/// Wave family extractor.
#[must_use]
pub fn wave(values: &MarineValues) -> Option<WaveSample> {
    Some(WaveSample {
        height_m: finite(values.wave_height)?,
        period_s: finite(values.wave_period)?,
        direction_deg: finite(values.wave_direction)?,
    })
}

/// Wind family extractor.
#[must_use]
pub fn wind(values: &MarineValues) -> Option<WindSample> {
    Some(WindSample {
        speed_kts: finite(values.wind_speed)?,
        direction_deg: finite(values.wind_direction)?,
        air_temp_f: finite(values.air_temperature)?,
    })
}

/// Swell extractor.
#[must_use]
pub fn swell(values: &MarineValues) -> Option<SwellSample> {
    Some(SwellSample {
        height_m: finite(values.swell_height)?,
        period_s: finite(values.swell_period)?,
    })
}

/// Sea-surface temperature extractor.
#[must_use]
pub fn water_temp(values: &MarineValues) -> Option<f64> {
    finite(values.sea_surface_temperature)
}

/// Resolve a family from `reading` using `extract`.
pub fn resolve<T>(
    reading: &StationReading,
    extract: impl Fn(&MarineValues) -> Option<T>,
) -> Option<Resolved<T>> {
    let current = reading.current.as_ref().and_then(|observation| {
        extract(&observation.values).map(|value| Resolved {
            value,
            time: observation.time,
        })
    });
    current.or_else(|| {
        reading.hourly.iter().find_map(|observation| {
            extract(&observation.values).map(|value| Resolved {
                value,
                time: observation.time,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use geo::Coord;
    use rstest::rstest;
    use surfcast_core::Observation;
    use surfcast_core::test_support::{full_values, reference_time};

    fn location() -> Coord<f64> {
        Coord { x: -117.3, y: 33.0 }
    }

    #[rstest]
    fn prefers_current_snapshot() {
        let reading = StationReading::empty(location())
            .with_current(Observation::new(
                Some(reference_time()),
                full_values(1.2, 12.0, 260.0, 5.0, 90.0),
            ))
            .with_hourly(vec![Observation::new(
                None,
                full_values(2.0, 9.0, 250.0, 9.0, 270.0),
            )]);

        let resolved = resolve(&reading, wave).expect("wave sample");

        assert!((resolved.value.height_m - 1.2).abs() < 1e-12);
        assert_eq!(resolved.time, Some(reference_time()));
    }

    #[rstest]
    fn scans_hourly_for_jointly_present_row() {
        let later = reference_time() + Duration::hours(2);
        let mut partial = full_values(1.5, 11.0, 255.0, 6.0, 80.0);
        partial.wave_period = None;
        let mut broken = full_values(1.0, 10.0, 250.0, 4.0, 70.0);
        broken.wave_height = Some(f64::NAN);
        let reading = StationReading::empty(location())
            .with_current(Observation::new(Some(reference_time()), partial))
            .with_hourly(vec![
                Observation::new(Some(reference_time()), partial),
                Observation::new(Some(reference_time()), broken),
                Observation::new(Some(later), full_values(1.8, 13.0, 265.0, 3.0, 60.0)),
            ]);

        let resolved = resolve(&reading, wave).expect("wave sample");

        assert!((resolved.value.height_m - 1.8).abs() < 1e-12);
        assert_eq!(resolved.time, Some(later));
    }

    #[rstest]
    fn families_resolve_independently() {
        let mut values = full_values(1.5, 11.0, 255.0, 6.0, 80.0);
        values.air_temperature = None;
        values.swell_height = Some(1.1);
        values.swell_period = Some(15.0);
        let reading = StationReading::empty(location())
            .with_current(Observation::new(Some(reference_time()), values));

        assert!(resolve(&reading, wave).is_some());
        assert!(resolve(&reading, wind).is_none());
        assert!(resolve(&reading, swell).is_some());
        assert!(resolve(&reading, water_temp).is_some());
    }

    #[rstest]
    fn empty_station_resolves_nothing() {
        let reading = StationReading::empty(location());
        assert!(resolve(&reading, wave).is_none());
    }
}
