//! Inverse-distance interpolation of station readings onto a coastline point.

use chrono::{DateTime, Utc};
use geo::{Coord, Rect};
use surfcast_core::StationReading;

use crate::error::InterpolationConfigError;
use crate::fallback::FallbackStrategy;
use crate::pool::StationPool;
use crate::resolve::{self, Resolved, SwellSample, WaveSample, WindSample};
use crate::weighting::{CircularMean, WeightedMean, inverse_distance_weight};

/// Configuration for [`StationInterpolator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationConfig {
    /// Number of nearest stations considered per point.
    pub max_stations: usize,
    /// Softening term added to each distance (degrees).
    pub epsilon: f64,
    /// Behaviour when no station yields usable data.
    pub fallback: FallbackStrategy,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            max_stations: 3,
            epsilon: 0.01,
            fallback: FallbackStrategy::Climatology,
        }
    }
}

impl InterpolationConfig {
    /// Set the number of nearest stations considered.
    #[must_use]
    pub const fn with_max_stations(mut self, max_stations: usize) -> Self {
        self.max_stations = max_stations;
        self
    }

    /// Set the distance softening term.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the fallback strategy.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Validate the distance softening term.
    ///
    /// A zero or negative epsilon would give a co-located station an infinite
    /// or negative weight.
    ///
    /// # Errors
    /// Returns [`InterpolationConfigError::InvalidEpsilon`] unless `epsilon`
    /// is finite and greater than zero.
    pub const fn validate(self) -> Result<Self, InterpolationConfigError> {
        if self.epsilon.is_finite() && self.epsilon > 0.0 {
            Ok(self)
        } else {
            Err(InterpolationConfigError::InvalidEpsilon {
                epsilon: self.epsilon,
            })
        }
    }
}

/// Averaged raw values for one coastline point, in source units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedReading {
    /// Wave height, period and direction.
    pub wave: WaveSample,
    /// Wind speed, direction and air temperature.
    pub wind: WindSample,
    /// Swell, when any nearby station reported it.
    pub swell: Option<SwellSample>,
    /// Sea-surface temperature (°F), when any nearby station reported it.
    pub water_temp_f: Option<f64>,
    /// Earliest source time behind the wave and wind values.
    pub measurement_time: Option<DateTime<Utc>>,
    /// `true` when either family came from the fallback strategy.
    pub synthetic: bool,
}

/// A station selected for a point together with its weight.
#[derive(Debug, Clone, Copy)]
struct Neighbour<'a> {
    reading: &'a StationReading,
    weight: f64,
}

/// Interpolates wave and wind pools onto target points.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationInterpolator {
    config: InterpolationConfig,
}

impl StationInterpolator {
    /// Construct an interpolator.
    ///
    /// # Errors
    /// Returns [`InterpolationConfigError`] when the configuration is invalid.
    pub const fn new(config: InterpolationConfig) -> Result<Self, InterpolationConfigError> {
        match config.validate() {
            Ok(config) => Ok(Self { config }),
            Err(err) => Err(err),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &InterpolationConfig {
        &self.config
    }

    /// Interpolate both pools onto `target`.
    ///
    /// `bounds` pre-filters candidate stations; `salt` identifies the point
    /// for seeded fallback. The result is always complete and finite.
    #[must_use]
    pub fn interpolate(
        &self,
        target: Coord<f64>,
        bounds: Rect<f64>,
        waves: &StationPool<'_>,
        wind: &StationPool<'_>,
        salt: u64,
    ) -> InterpolatedReading {
        let wave_neighbours = self.neighbours(waves, target, bounds);
        let wind_neighbours = self.neighbours(wind, target, bounds);

        let wave_blend = blend_wave(&wave_neighbours);
        let wind_blend = blend_wind(&wind_neighbours);
        let synthetic = wave_blend.is_none() || wind_blend.is_none();
        let (fallback_wave, fallback_wind) = self.config.fallback.synthesize(salt);

        let measurement_time = earliest(
            wave_blend.and_then(|blend| blend.time),
            wind_blend.and_then(|blend| blend.time),
        );

        InterpolatedReading {
            wave: wave_blend.map_or(fallback_wave, |blend| blend.value),
            wind: wind_blend.map_or(fallback_wind, |blend| blend.value),
            swell: blend_swell(&wave_neighbours),
            water_temp_f: blend_water_temp(&wave_neighbours),
            measurement_time,
            synthetic,
        }
    }

    fn neighbours<'a>(
        &self,
        pool: &StationPool<'a>,
        target: Coord<f64>,
        bounds: Rect<f64>,
    ) -> Vec<Neighbour<'a>> {
        pool.nearest(target, bounds, self.config.max_stations)
            .into_iter()
            .map(|(reading, distance)| Neighbour {
                reading,
                weight: inverse_distance_weight(distance, self.config.epsilon),
            })
            .filter(|neighbour| neighbour.weight.is_finite() && neighbour.weight > 0.0)
            .collect()
    }
}

fn earliest(
    left: Option<DateTime<Utc>>,
    right: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (left, right) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Iterate the samples each neighbour resolves for a family.
fn samples<'a, T: 'a>(
    neighbours: &'a [Neighbour<'a>],
    extract: fn(&surfcast_core::MarineValues) -> Option<T>,
) -> impl Iterator<Item = (Resolved<T>, f64)> + 'a {
    neighbours.iter().filter_map(move |neighbour| {
        resolve::resolve(neighbour.reading, extract).map(|sample| (sample, neighbour.weight))
    })
}

fn blend_wave(neighbours: &[Neighbour<'_>]) -> Option<Resolved<WaveSample>> {
    let mut height = WeightedMean::default();
    let mut period = WeightedMean::default();
    let mut direction = CircularMean::default();
    let mut time = None;
    for (sample, weight) in samples(neighbours, resolve::wave) {
        height.add(sample.value.height_m, weight);
        period.add(sample.value.period_s, weight);
        direction.add(sample.value.direction_deg, weight);
        time = earliest(time, sample.time);
    }
    Some(Resolved {
        value: WaveSample {
            height_m: height.mean()?,
            period_s: period.mean()?,
            direction_deg: direction.mean()?,
        },
        time,
    })
}

fn blend_wind(neighbours: &[Neighbour<'_>]) -> Option<Resolved<WindSample>> {
    let mut speed = WeightedMean::default();
    let mut direction = CircularMean::default();
    let mut air_temp = WeightedMean::default();
    let mut time = None;
    for (sample, weight) in samples(neighbours, resolve::wind) {
        speed.add(sample.value.speed_kts, weight);
        direction.add(sample.value.direction_deg, weight);
        air_temp.add(sample.value.air_temp_f, weight);
        time = earliest(time, sample.time);
    }
    Some(Resolved {
        value: WindSample {
            speed_kts: speed.mean()?,
            direction_deg: direction.mean()?,
            air_temp_f: air_temp.mean()?,
        },
        time,
    })
}

fn blend_swell(neighbours: &[Neighbour<'_>]) -> Option<SwellSample> {
    let mut height = WeightedMean::default();
    let mut period = WeightedMean::default();
    for (sample, weight) in samples(neighbours, resolve::swell) {
        height.add(sample.value.height_m, weight);
        period.add(sample.value.period_s, weight);
    }
    Some(SwellSample {
        height_m: height.mean()?,
        period_s: period.mean()?,
    })
}

fn blend_water_temp(neighbours: &[Neighbour<'_>]) -> Option<f64> {
    let mut temp = WeightedMean::default();
    for (sample, weight) in samples(neighbours, resolve::water_temp) {
        temp.add(sample.value, weight);
    }
    temp.mean()
}

#[cfg(test)]
mod tests;
