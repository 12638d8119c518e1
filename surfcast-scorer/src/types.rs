//! Public configuration types for wave quality scoring.
#![forbid(unsafe_code)]

use surfcast_core::QualityLevel;

use crate::ScoringConfigError;
use crate::curve::{
    PiecewiseLinear, default_height_curve, default_period_curve, default_wind_curve,
};
use crate::wind::DirectionModifiers;

/// Tolerance on the weight total.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative weighting of the three condition components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentWeights {
    /// Weight of the wave height score.
    pub wave_height: f64,
    /// Weight of the wave period score.
    pub wave_period: f64,
    /// Weight of the direction-modified wind score.
    pub wind: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            wave_height: 0.20,
            wave_period: 0.15,
            wind: 0.65,
        }
    }
}

impl ComponentWeights {
    /// Total of the three weights.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "summing weights")]
    pub fn sum(self) -> f64 {
        self.wave_height + self.wave_period + self.wind
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::InvalidWeights`] when any weight is
    /// negative or non-finite, or the total differs from `1.0` by more than
    /// [`WEIGHT_SUM_TOLERANCE`].
    #[expect(clippy::float_arithmetic, reason = "comparing the weight total")]
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        let sum = self.sum();
        let components_ok = [self.wave_height, self.wave_period, self.wind]
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0);
        if components_ok && (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            Ok(self)
        } else {
            Err(ScoringConfigError::InvalidWeights { sum })
        }
    }
}

/// Lower score bounds of each quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    /// Scores at or above this are excellent.
    pub excellent: u8,
    /// Scores at or above this are good.
    pub good: u8,
    /// Scores at or above this are fair; anything lower is poor.
    pub fair: u8,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            excellent: 75,
            good: 55,
            fair: 35,
        }
    }
}

impl QualityThresholds {
    /// Validate ordering of the thresholds.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError::UnorderedThresholds`] unless
    /// `fair <= good <= excellent <= 100`.
    pub const fn validate(self) -> Result<Self, ScoringConfigError> {
        if self.fair <= self.good && self.good <= self.excellent && self.excellent <= 100 {
            Ok(self)
        } else {
            Err(ScoringConfigError::UnorderedThresholds {
                fair: self.fair,
                good: self.good,
                excellent: self.excellent,
            })
        }
    }

    /// Classify a score.
    #[must_use]
    pub const fn classify(self, score: u8) -> QualityLevel {
        if score >= self.excellent {
            QualityLevel::Excellent
        } else if score >= self.good {
            QualityLevel::Good
        } else if score >= self.fair {
            QualityLevel::Fair
        } else {
            QualityLevel::Poor
        }
    }
}

/// Full configuration of a [`WaveQualityScorer`](crate::WaveQualityScorer).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Component weights; must sum to one.
    pub weights: ComponentWeights,
    /// Share of the final score taken by the location factor.
    pub location_weight: f64,
    /// Height (ft) response.
    pub height_curve: PiecewiseLinear,
    /// Period (s) response.
    pub period_curve: PiecewiseLinear,
    /// Wind speed (kts) response.
    pub wind_curve: PiecewiseLinear,
    /// Wind direction multipliers.
    pub direction: DirectionModifiers,
    /// Display thresholds.
    pub thresholds: QualityThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            location_weight: 0.10,
            height_curve: default_height_curve(),
            period_curve: default_period_curve(),
            wind_curve: default_wind_curve(),
            direction: DirectionModifiers::default(),
            thresholds: QualityThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Replace the component weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: ComponentWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the location weight.
    #[must_use]
    pub const fn with_location_weight(mut self, location_weight: f64) -> Self {
        self.location_weight = location_weight;
        self
    }

    /// Replace the direction modifiers.
    #[must_use]
    pub const fn with_direction(mut self, direction: DirectionModifiers) -> Self {
        self.direction = direction;
        self
    }

    /// Replace the quality thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replace the height curve.
    #[must_use]
    pub fn with_height_curve(mut self, curve: PiecewiseLinear) -> Self {
        self.height_curve = curve;
        self
    }

    /// Replace the period curve.
    #[must_use]
    pub fn with_period_curve(mut self, curve: PiecewiseLinear) -> Self {
        self.period_curve = curve;
        self
    }

    /// Replace the wind speed curve.
    #[must_use]
    pub fn with_wind_curve(mut self, curve: PiecewiseLinear) -> Self {
        self.wind_curve = curve;
        self
    }

    /// Check every invariant of the configuration.
    ///
    /// # Errors
    /// Returns the first [`ScoringConfigError`] found.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.location_weight) {
            return Err(ScoringConfigError::InvalidLocationWeight {
                value: self.location_weight,
            });
        }
        self.direction.validate()?;
        self.thresholds.validate()?;
        for curve in [&self.height_curve, &self.period_curve, &self.wind_curve] {
            PiecewiseLinear::new(curve.name(), curve.breakpoints().to_vec())?;
        }
        Ok(())
    }
}
