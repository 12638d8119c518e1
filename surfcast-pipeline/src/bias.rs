//! Section bias correction and conversion to surf units.
//!
//! A single regional wave model under-resolves local effects such as
//! point-break focusing and bay sheltering. Each section's bias record nudges
//! the interpolated values before they are converted to feet and knots and
//! clamped to plausible ranges.
#![expect(
    clippy::float_arithmetic,
    reason = "bias multipliers and unit conversion"
)]

use std::ops::RangeInclusive;

use surfcast_core::BiasRecord;

use crate::interpolate::InterpolatedReading;

/// Metres to feet.
pub const FEET_PER_METRE: f64 = 3.28084;

const BIASED_HEIGHT_M: RangeInclusive<f64> = 0.3..=3.0;
const BIASED_PERIOD_S: RangeInclusive<f64> = 6.0..=20.0;
const BIASED_WIND_KTS: RangeInclusive<f64> = 0.0..=35.0;

const HEIGHT_FT: RangeInclusive<f64> = 0.5..=15.0;
const PERIOD_S: RangeInclusive<f64> = 5.0..=25.0;
const WIND_KTS: RangeInclusive<f64> = 0.0..=30.0;

const WATER_TEMP_F: RangeInclusive<f64> = 45.0..=85.0;
const AIR_TEMP_F: RangeInclusive<f64> = 35.0..=110.0;
/// Substituted when the water temperature is missing or implausible.
pub const DEFAULT_WATER_TEMP_F: f64 = 62.0;
/// Substituted when the air temperature is missing or implausible.
pub const DEFAULT_AIR_TEMP_F: f64 = 68.0;

/// Bias-corrected values in output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedReading {
    /// Wave height (ft).
    pub wave_height_ft: f64,
    /// Wave period (s).
    pub wave_period_s: f64,
    /// Wave direction (deg); not wrapped.
    pub wave_direction_deg: f64,
    /// Swell height (ft).
    pub swell_height_ft: Option<f64>,
    /// Swell period (s).
    pub swell_period_s: Option<f64>,
    /// Wind speed (kts).
    pub wind_speed_kts: f64,
    /// Wind direction (deg).
    pub wind_direction_deg: f64,
    /// Water temperature (°F).
    pub water_temp_f: f64,
    /// Air temperature (°F).
    pub air_temp_f: f64,
}

fn clamp(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// Apply `bias` to `raw` and convert to output units.
///
/// The `section` name only labels log messages.
#[must_use]
pub fn apply_bias(raw: &InterpolatedReading, bias: &BiasRecord, section: &str) -> AdjustedReading {
    let height_m = clamp(raw.wave.height_m * bias.height_multiplier, &BIASED_HEIGHT_M);
    let period_s = clamp(raw.wave.period_s * bias.period_multiplier, &BIASED_PERIOD_S);
    let wind_kts = clamp(raw.wind.speed_kts + bias.wind_offset, &BIASED_WIND_KTS);
    let water = raw
        .water_temp_f
        .map(|temp| temp + bias.temp_offset.unwrap_or(0.0));

    AdjustedReading {
        wave_height_ft: clamp(height_m * FEET_PER_METRE, &HEIGHT_FT),
        wave_period_s: clamp(period_s, &PERIOD_S),
        wave_direction_deg: raw.wave.direction_deg + bias.direction_offset,
        swell_height_ft: raw
            .swell
            .map(|swell| (swell.height_m * FEET_PER_METRE).max(0.0)),
        swell_period_s: raw.swell.map(|swell| swell.period_s.max(0.0)),
        wind_speed_kts: clamp(wind_kts, &WIND_KTS),
        wind_direction_deg: raw.wind.direction_deg,
        water_temp_f: validate_temperature(
            water,
            &WATER_TEMP_F,
            DEFAULT_WATER_TEMP_F,
            "water",
            section,
        ),
        air_temp_f: validate_temperature(
            Some(raw.wind.air_temp_f),
            &AIR_TEMP_F,
            DEFAULT_AIR_TEMP_F,
            "air",
            section,
        ),
    }
}

fn validate_temperature(
    value: Option<f64>,
    range: &RangeInclusive<f64>,
    default: f64,
    kind: &str,
    section: &str,
) -> f64 {
    match value {
        Some(temp) if range.contains(&temp) => temp,
        Some(temp) => {
            log::warn!(
                "{kind} temperature {temp:.1}°F outside {:.0}..={:.0} in section {section}; using {default}",
                range.start(),
                range.end()
            );
            default
        }
        None => {
            log::debug!("no {kind} temperature for section {section}; using {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{SwellSample, WaveSample, WindSample};
    use rstest::{fixture, rstest};

    #[fixture]
    fn raw() -> InterpolatedReading {
        InterpolatedReading {
            wave: WaveSample {
                height_m: 1.0,
                period_s: 12.0,
                direction_deg: 355.0,
            },
            wind: WindSample {
                speed_kts: 6.0,
                direction_deg: 80.0,
                air_temp_f: 72.0,
            },
            swell: Some(SwellSample {
                height_m: 0.5,
                period_s: 15.0,
            }),
            water_temp_f: Some(64.0),
            measurement_time: None,
            synthetic: false,
        }
    }

    #[rstest]
    fn neutral_bias_only_converts(raw: InterpolatedReading) {
        let adjusted = apply_bias(&raw, &BiasRecord::NEUTRAL, "test");
        assert!((adjusted.wave_height_ft - FEET_PER_METRE).abs() < 1e-9);
        assert!((adjusted.wave_period_s - 12.0).abs() < 1e-12);
        assert!((adjusted.wind_speed_kts - 6.0).abs() < 1e-12);
        assert!((adjusted.water_temp_f - 64.0).abs() < 1e-12);
        assert!((adjusted.air_temp_f - 72.0).abs() < 1e-12);
        let swell_ft = adjusted.swell_height_ft.expect("swell height");
        assert!((swell_ft - 0.5 * FEET_PER_METRE).abs() < 1e-9);
    }

    #[rstest]
    fn direction_offset_does_not_wrap(raw: InterpolatedReading) {
        let bias = BiasRecord::new(1.0, 1.0, 10.0, 0.0);
        let adjusted = apply_bias(&raw, &bias, "test");
        assert!((adjusted.wave_direction_deg - 365.0).abs() < 1e-12);
    }

    #[rstest]
    #[case(10.0, 3.0 * FEET_PER_METRE)]
    #[case(0.01, 0.3 * FEET_PER_METRE)]
    fn clamps_biased_height(
        raw: InterpolatedReading,
        #[case] multiplier: f64,
        #[case] expected_ft: f64,
    ) {
        let bias = BiasRecord::new(multiplier, 1.0, 0.0, 0.0);
        let adjusted = apply_bias(&raw, &bias, "test");
        assert!((adjusted.wave_height_ft - expected_ft).abs() < 1e-9);
    }

    #[rstest]
    fn clamps_period_and_wind(mut raw: InterpolatedReading) {
        raw.wave.period_s = 30.0;
        raw.wind.speed_kts = 50.0;
        let adjusted = apply_bias(&raw, &BiasRecord::new(1.0, 1.0, 0.0, -2.0), "test");
        assert!((adjusted.wave_period_s - 20.0).abs() < 1e-12);
        assert!((adjusted.wind_speed_kts - 30.0).abs() < 1e-12);

        raw.wind.speed_kts = 1.0;
        let calm = apply_bias(&raw, &BiasRecord::new(1.0, 1.0, 0.0, -2.0), "test");
        assert!(calm.wind_speed_kts.abs() < 1e-12);
    }

    #[rstest]
    #[case(Some(20.0), 62.0)]
    #[case(Some(95.0), 62.0)]
    #[case(None, 62.0)]
    #[case(Some(70.0), 70.0)]
    fn substitutes_implausible_water_temperature(
        mut raw: InterpolatedReading,
        #[case] water: Option<f64>,
        #[case] expected: f64,
    ) {
        raw.water_temp_f = water;
        let adjusted = apply_bias(&raw, &BiasRecord::NEUTRAL, "test");
        assert!((adjusted.water_temp_f - expected).abs() < 1e-12);
    }

    #[rstest]
    fn substitutes_implausible_air_temperature(mut raw: InterpolatedReading) {
        raw.wind.air_temp_f = 140.0;
        let adjusted = apply_bias(&raw, &BiasRecord::NEUTRAL, "test");
        assert!((adjusted.air_temp_f - DEFAULT_AIR_TEMP_F).abs() < 1e-12);
    }

    #[rstest]
    fn temperature_offset_shifts_water(raw: InterpolatedReading) {
        let bias = BiasRecord::NEUTRAL.with_temp_offset(2.0);
        let adjusted = apply_bias(&raw, &bias, "test");
        assert!((adjusted.water_temp_f - 66.0).abs() < 1e-12);
    }
}
