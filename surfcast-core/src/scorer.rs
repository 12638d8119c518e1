//! Score surf conditions for a stretch of coastline.
//!
//! The `QualityScorer` trait maps physical [`SurfConditions`] and a
//! per-section location factor to an integer score in `0..=100`.

use crate::QualityLevel;

/// Physical conditions at a coastline point in surf units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfConditions {
    /// Wave height (ft).
    pub wave_height_ft: f64,
    /// Wave period (s).
    pub wave_period_s: f64,
    /// Wave direction (deg, "from"); may lie outside `0..360`.
    pub wave_direction_deg: f64,
    /// Wind speed (kts).
    pub wind_speed_kts: f64,
    /// Wind direction (deg, "from").
    pub wind_direction_deg: f64,
}

/// Calculate a surf quality score.
///
/// Implementations must be deterministic and thread-safe (`Send` + `Sync`) so
/// points can be scored in parallel. Use [`QualityScorer::sanitise`] to turn
/// a raw fractional score into the final integer.
///
/// # Examples
///
/// ```rust
/// use surfcast_core::{QualityLevel, QualityScorer, SurfConditions};
///
/// struct FlatScorer;
///
/// impl QualityScorer for FlatScorer {
///     fn score(&self, _conditions: &SurfConditions, _location_factor: f64) -> u8 {
///         Self::sanitise(0.42)
///     }
///
///     fn level(&self, _score: u8) -> QualityLevel {
///         QualityLevel::Fair
///     }
/// }
///
/// let conditions = SurfConditions {
///     wave_height_ft: 3.0,
///     wave_period_s: 12.0,
///     wave_direction_deg: 260.0,
///     wind_speed_kts: 5.0,
///     wind_direction_deg: 80.0,
/// };
/// assert_eq!(FlatScorer.score(&conditions, 1.0), 42);
/// ```
pub trait QualityScorer: Send + Sync {
    /// Return a score in `0..=100` for `conditions` at a spot with the given
    /// location factor.
    fn score(&self, conditions: &SurfConditions, location_factor: f64) -> u8;

    /// Classify a score for display.
    fn level(&self, score: u8) -> QualityLevel;

    /// Convert a fractional score (`0.0..=1.0` nominal) to an integer score.
    ///
    /// Non-finite values map to `0`; everything else is scaled by 100,
    /// clamped to `0..=100` and rounded to the nearest integer.
    fn sanitise(raw: f64) -> u8
    where
        Self: Sized,
    {
        if !raw.is_finite() {
            return 0;
        }
        // Clamped to 0..=100, so the cast cannot truncate or wrap.
        (raw * 100.0).clamp(0.0, 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct ZeroScorer;

    impl QualityScorer for ZeroScorer {
        fn score(&self, _conditions: &SurfConditions, _location_factor: f64) -> u8 {
            0
        }

        fn level(&self, _score: u8) -> QualityLevel {
            QualityLevel::Poor
        }
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.554, 55)]
    #[case(0.555, 56)]
    #[case(1.7, 100)]
    #[case(-0.3, 0)]
    #[case(f64::NAN, 0)]
    #[case(f64::INFINITY, 0)]
    #[case(f64::NEG_INFINITY, 0)]
    #[case(0.995, 100)]
    #[case(255.0, 100)]
    fn sanitise_clamps_and_rounds(#[case] raw: f64, #[case] expected: u8) {
        assert_eq!(ZeroScorer::sanitise(raw), expected);
    }
}
