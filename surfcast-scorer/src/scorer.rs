//! The wave quality scorer.
#![forbid(unsafe_code)]

use std::sync::LazyLock;

use surfcast_core::{QualityLevel, QualityScorer, SurfConditions};

use crate::{ScoringConfig, ScoringConfigError, wind::angular_difference};

/// Per-component scores behind a final quality score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    /// Height score in `0.0..=1.0`.
    pub height: f64,
    /// Period score in `0.0..=1.0`.
    pub period: f64,
    /// Wind speed score before the direction modifier.
    pub wind_speed: f64,
    /// Direction multiplier applied to `wind_speed`.
    pub direction_multiplier: f64,
}

impl ComponentScores {
    /// Wind score after the direction modifier. May exceed `1.0`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "applying the direction modifier")]
    pub fn wind(&self) -> f64 {
        self.wind_speed * self.direction_multiplier
    }
}

/// Scores surf conditions from three piecewise-linear component curves, a
/// wind-direction modifier and a location factor blend.
///
/// The scorer is stateless once built; the same inputs always yield the same
/// score.
///
/// # Examples
///
/// ```
/// use surfcast_core::{QualityLevel, QualityScorer, SurfConditions};
/// use surfcast_scorer::WaveQualityScorer;
///
/// let scorer = WaveQualityScorer::default();
/// let offshore = SurfConditions {
///     wave_height_ft: 4.5,
///     wave_period_s: 14.0,
///     wave_direction_deg: 250.0,
///     wind_speed_kts: 3.0,
///     wind_direction_deg: 70.0,
/// };
/// let score = scorer.score(&offshore, 1.2);
/// assert!(score >= 60);
/// assert_eq!(scorer.level(score), QualityLevel::Excellent);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaveQualityScorer {
    config: ScoringConfig,
}

impl WaveQualityScorer {
    /// Build a scorer with the shipped configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scorer with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when the configuration is invalid.
    pub fn with_config(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Evaluate each component for `conditions`.
    #[must_use]
    pub fn components(&self, conditions: &SurfConditions) -> ComponentScores {
        let difference =
            angular_difference(conditions.wind_direction_deg, conditions.wave_direction_deg);
        ComponentScores {
            height: self.config.height_curve.evaluate(conditions.wave_height_ft),
            period: self.config.period_curve.evaluate(conditions.wave_period_s),
            wind_speed: self.config.wind_curve.evaluate(conditions.wind_speed_kts),
            direction_multiplier: self.config.direction.multiplier(difference),
        }
    }

    /// Weighted blend of the components, clamped to `0.0..=1.0`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted component blend")]
    pub fn conditions_score(&self, components: &ComponentScores) -> f64 {
        let weights = self.config.weights;
        let blended = components.height * weights.wave_height
            + components.period * weights.wave_period
            + components.wind() * weights.wind;
        if blended.is_finite() {
            blended.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Final fractional score before scaling to `0..=100`.
    ///
    /// The location factor is clamped to `0.0..=1.0`; a non-finite factor
    /// contributes nothing.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "location factor blend")]
    pub fn raw_score(&self, conditions: &SurfConditions, location_factor: f64) -> f64 {
        let components = self.components(conditions);
        let conditions_score = self.conditions_score(&components);
        let location = if location_factor.is_finite() {
            location_factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let location_weight = self.config.location_weight;
        log::trace!(
            "height {:.3} ({}), period {:.3} ({}), wind {:.3} x {:.2} ({}) -> conditions {conditions_score:.3}",
            components.height,
            self.config.height_curve.regime(conditions.wave_height_ft),
            components.period,
            self.config.period_curve.regime(conditions.wave_period_s),
            components.wind_speed,
            components.direction_multiplier,
            self.config.wind_curve.regime(conditions.wind_speed_kts),
        );
        conditions_score * (1.0 - location_weight) + location * location_weight
    }
}

impl QualityScorer for WaveQualityScorer {
    fn score(&self, conditions: &SurfConditions, location_factor: f64) -> u8 {
        Self::sanitise(self.raw_score(conditions, location_factor))
    }

    fn level(&self, score: u8) -> QualityLevel {
        self.config.thresholds.classify(score)
    }
}

static SHIPPED: LazyLock<WaveQualityScorer> = LazyLock::new(WaveQualityScorer::default);

/// Score `conditions` with the shipped configuration.
///
/// # Examples
///
/// ```
/// use surfcast_core::SurfConditions;
/// use surfcast_scorer::calculate_wave_quality;
///
/// let onshore = SurfConditions {
///     wave_height_ft: 4.5,
///     wave_period_s: 14.0,
///     wave_direction_deg: 250.0,
///     wind_speed_kts: 25.0,
///     wind_direction_deg: 250.0,
/// };
/// assert!(calculate_wave_quality(&onshore, 1.2) < 35);
/// ```
#[must_use]
pub fn calculate_wave_quality(conditions: &SurfConditions, location_factor: f64) -> u8 {
    SHIPPED.score(conditions, location_factor)
}
