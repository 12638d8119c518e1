//! Property-based tests for wave quality scoring.
//!
//! # Invariants tested
//!
//! - **Range:** scores always lie in `0..=100`.
//! - **Determinism:** identical inputs give identical scores.
//! - **Monotonicity:** the height component rises towards the optimal band
//!   and falls well beyond it.
//! - **Direction:** offshore wind beats onshore wind at the same speed.

use proptest::prelude::*;
use surfcast_core::{QualityScorer, SurfConditions};
use surfcast_scorer::{WaveQualityScorer, calculate_wave_quality, curve::default_height_curve};

fn conditions_strategy() -> impl Strategy<Value = SurfConditions> {
    (
        -5.0_f64..40.0,
        0.0_f64..40.0,
        -720.0_f64..720.0,
        0.0_f64..60.0,
        -720.0_f64..720.0,
    )
        .prop_map(
            |(wave_height_ft, wave_period_s, wave_direction_deg, wind_speed_kts, wind_direction_deg)| {
                SurfConditions {
                    wave_height_ft,
                    wave_period_s,
                    wave_direction_deg,
                    wind_speed_kts,
                    wind_direction_deg,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every score is an integer in `0..=100`.
    #[test]
    fn score_stays_in_range(
        conditions in conditions_strategy(),
        location_factor in -2.0_f64..3.0,
    ) {
        let score = WaveQualityScorer::new().score(&conditions, location_factor);
        prop_assert!(score <= 100);
    }

    /// Property: scoring is deterministic across scorer instances.
    #[test]
    fn score_is_deterministic(
        conditions in conditions_strategy(),
        location_factor in 0.0_f64..1.5,
    ) {
        let first = calculate_wave_quality(&conditions, location_factor);
        let second = WaveQualityScorer::new().score(&conditions, location_factor);
        let third = calculate_wave_quality(&conditions, location_factor);
        prop_assert_eq!(first, second);
        prop_assert_eq!(second, third);
    }

    /// Property: height score strictly increases from flat to the optimal band.
    #[test]
    fn height_rises_towards_optimal(lower in 0.0_f64..5.4, step in 0.01_f64..1.0) {
        let upper = (lower + step).min(5.5);
        prop_assume!(upper > lower);
        let curve = default_height_curve();
        prop_assert!(curve.evaluate(upper) > curve.evaluate(lower));
    }

    /// Property: height score strictly decreases well beyond the optimal band.
    #[test]
    fn height_falls_beyond_optimal(lower in 7.0_f64..19.9, step in 0.01_f64..1.0) {
        let upper = (lower + step).min(20.0);
        prop_assume!(upper > lower);
        let curve = default_height_curve();
        prop_assert!(curve.evaluate(upper) < curve.evaluate(lower));
    }

    /// Property: offshore wind scores strictly higher than onshore wind of the
    /// same speed, including beyond the blown-out breakpoint.
    #[test]
    fn offshore_beats_onshore(
        wave_height_ft in 0.0_f64..25.0,
        wave_period_s in 4.0_f64..26.0,
        wave_direction_deg in 0.0_f64..360.0,
        wind_speed_kts in 0.0_f64..35.0,
        location_factor in 0.0_f64..1.5,
    ) {
        let scorer = WaveQualityScorer::new();
        let offshore = SurfConditions {
            wave_height_ft,
            wave_period_s,
            wave_direction_deg,
            wind_speed_kts,
            wind_direction_deg: wave_direction_deg + 180.0,
        };
        let onshore = SurfConditions {
            wind_direction_deg: wave_direction_deg,
            ..offshore
        };
        prop_assert!(
            scorer.score(&offshore, location_factor) > scorer.score(&onshore, location_factor)
        );
    }
}
