//! Wind-direction modifier.
//!
//! Offshore wind grooms wave faces and onshore wind ruins them. The modifier
//! compares the wind's "from" direction with the waves' "from" direction: a
//! 180° difference means the wind blows straight into the face of the
//! incoming swell.
#![forbid(unsafe_code)]

use crate::ScoringConfigError;

/// Smallest angle between two bearings, in `0.0..=180.0`.
///
/// Inputs may lie outside `0..360`. Non-finite inputs yield `0.0`, which
/// scores as onshore.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "bearing difference")]
pub fn angular_difference(a_deg: f64, b_deg: f64) -> f64 {
    let diff = (a_deg - b_deg).rem_euclid(360.0);
    if !diff.is_finite() {
        return 0.0;
    }
    diff.min(360.0 - diff)
}

/// Multipliers applied to the wind-speed score by direction band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionModifiers {
    /// Multiplier when the difference is at least `offshore_from_deg`.
    pub offshore: f64,
    /// Multiplier between `cross_shore_from_deg` and `offshore_from_deg`.
    pub cross_shore: f64,
    /// Multiplier when the difference is at most `onshore_to_deg`.
    pub onshore: f64,
    /// Upper edge of the onshore band.
    pub onshore_to_deg: f64,
    /// Lower edge of the cross-shore band.
    pub cross_shore_from_deg: f64,
    /// Lower edge of the offshore band.
    pub offshore_from_deg: f64,
}

impl Default for DirectionModifiers {
    fn default() -> Self {
        Self {
            offshore: 1.45,
            cross_shore: 1.10,
            onshore: 0.30,
            onshore_to_deg: 45.0,
            cross_shore_from_deg: 90.0,
            offshore_from_deg: 135.0,
        }
    }
}

impl DirectionModifiers {
    /// Check band edges are ordered within `0..=180` and multipliers are
    /// finite and non-negative.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidDirectionBands`] otherwise.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        let finite = [self.offshore, self.cross_shore, self.onshore]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0);
        let ordered = 0.0 <= self.onshore_to_deg
            && self.onshore_to_deg < self.cross_shore_from_deg
            && self.cross_shore_from_deg <= self.offshore_from_deg
            && self.offshore_from_deg <= 180.0;
        if finite && ordered {
            Ok(self)
        } else {
            Err(ScoringConfigError::InvalidDirectionBands)
        }
    }

    /// Multiplier for a wind/wave angular difference in degrees.
    ///
    /// Between the onshore and cross-shore bands the multiplier is
    /// interpolated linearly.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "linear blend between bands")]
    pub fn multiplier(&self, difference_deg: f64) -> f64 {
        if difference_deg >= self.offshore_from_deg {
            self.offshore
        } else if difference_deg >= self.cross_shore_from_deg {
            self.cross_shore
        } else if difference_deg <= self.onshore_to_deg || difference_deg.is_nan() {
            self.onshore
        } else {
            let span = self.cross_shore_from_deg - self.onshore_to_deg;
            let t = (difference_deg - self.onshore_to_deg) / span;
            self.onshore + t * (self.cross_shore - self.onshore)
        }
    }

    /// Multiplier for the given wind and wave directions.
    #[must_use]
    pub fn for_directions(&self, wind_from_deg: f64, wave_from_deg: f64) -> f64 {
        self.multiplier(angular_difference(wind_from_deg, wave_from_deg))
    }
}
