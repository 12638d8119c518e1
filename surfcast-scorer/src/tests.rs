//! Unit coverage for the wave quality scorer.
#![forbid(unsafe_code)]

use rstest::{fixture, rstest};
use surfcast_core::{QualityLevel, QualityScorer, SurfConditions};

use crate::{
    ComponentWeights, QualityThresholds, ScoringConfig, ScoringConfigError, WaveQualityScorer,
    calculate_wave_quality,
};

#[fixture]
fn scorer() -> WaveQualityScorer {
    WaveQualityScorer::new()
}

fn conditions(height_ft: f64, period_s: f64, wind_kts: f64, wind_dir: f64) -> SurfConditions {
    SurfConditions {
        wave_height_ft: height_ft,
        wave_period_s: period_s,
        wave_direction_deg: 250.0,
        wind_speed_kts: wind_kts,
        wind_direction_deg: wind_dir,
    }
}

#[rstest]
fn shipped_weights_sum_to_one() {
    let weights = ComponentWeights::default();
    assert!((weights.sum() - 1.0).abs() <= crate::WEIGHT_SUM_TOLERANCE);
    assert_eq!(weights.validate(), Ok(weights));
}

#[rstest]
fn shipped_configuration_is_valid() {
    assert_eq!(ScoringConfig::default().validate(), Ok(()));
}

#[rstest]
fn offshore_example_scores_excellent(scorer: WaveQualityScorer) {
    let score = scorer.score(&conditions(4.5, 14.0, 3.0, 70.0), 1.2);
    assert_eq!(score, 100);
    assert_eq!(scorer.level(score), QualityLevel::Excellent);
}

#[rstest]
fn onshore_example_scores_poor(scorer: WaveQualityScorer) {
    let score = scorer.score(&conditions(4.5, 14.0, 25.0, 250.0), 1.2);
    assert_eq!(score, 34);
    assert_eq!(scorer.level(score), QualityLevel::Poor);
}

#[rstest]
fn free_function_matches_default_scorer(scorer: WaveQualityScorer) {
    let reading = conditions(3.0, 11.0, 9.0, 120.0);
    assert_eq!(
        calculate_wave_quality(&reading, 0.9),
        scorer.score(&reading, 0.9)
    );
}

#[rstest]
fn component_breakdown(scorer: WaveQualityScorer) {
    let components = scorer.components(&conditions(4.5, 14.0, 3.0, 70.0));
    assert!((components.height - 0.55 - 0.45 * 1.7 / 2.7).abs() < 1e-9);
    assert!((components.period - 0.65).abs() < 1e-9);
    assert!((components.wind_speed - 1.0).abs() < 1e-9);
    assert!((components.direction_multiplier - 1.45).abs() < 1e-9);
    assert!((components.wind() - 1.45).abs() < 1e-9);
}

#[rstest]
fn offshore_beats_onshore_across_wind_range(scorer: WaveQualityScorer) {
    for tenths in 0..=300_u16 {
        let speed = f64::from(tenths) / 10.0;
        let offshore = scorer.score(&conditions(4.5, 14.0, speed, 70.0), 1.0);
        let onshore = scorer.score(&conditions(4.5, 14.0, speed, 250.0), 1.0);
        assert!(offshore > onshore, "{speed} kts: {offshore} vs {onshore}");
    }
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn non_finite_location_factor_contributes_nothing(scorer: WaveQualityScorer, #[case] factor: f64) {
    let reading = conditions(4.5, 14.0, 25.0, 250.0);
    assert_eq!(scorer.score(&reading, factor), scorer.score(&reading, 0.0));
}

#[rstest]
fn nan_conditions_still_score(scorer: WaveQualityScorer) {
    let reading = SurfConditions {
        wave_height_ft: f64::NAN,
        wave_period_s: f64::NAN,
        wave_direction_deg: f64::NAN,
        wind_speed_kts: f64::NAN,
        wind_direction_deg: f64::NAN,
    };
    assert!(scorer.score(&reading, 1.0) <= 100);
}

#[rstest]
#[case(80, QualityLevel::Excellent)]
#[case(75, QualityLevel::Excellent)]
#[case(74, QualityLevel::Good)]
#[case(55, QualityLevel::Good)]
#[case(54, QualityLevel::Fair)]
#[case(35, QualityLevel::Fair)]
#[case(34, QualityLevel::Poor)]
#[case(0, QualityLevel::Poor)]
fn classifies_levels(#[case] score: u8, #[case] expected: QualityLevel) {
    assert_eq!(QualityThresholds::default().classify(score), expected);
}

#[rstest]
fn rejects_weights_not_summing_to_one() {
    let config = ScoringConfig::default().with_weights(ComponentWeights {
        wave_height: 0.5,
        wave_period: 0.5,
        wind: 0.5,
    });
    assert!(matches!(
        WaveQualityScorer::with_config(config),
        Err(ScoringConfigError::InvalidWeights { .. })
    ));
}

#[rstest]
fn rejects_location_weight_out_of_range() {
    let config = ScoringConfig::default().with_location_weight(1.5);
    assert!(matches!(
        WaveQualityScorer::with_config(config),
        Err(ScoringConfigError::InvalidLocationWeight { .. })
    ));
}

#[rstest]
fn rejects_unordered_thresholds() {
    let config = ScoringConfig::default().with_thresholds(QualityThresholds {
        excellent: 50,
        good: 60,
        fair: 35,
    });
    assert!(matches!(
        WaveQualityScorer::with_config(config),
        Err(ScoringConfigError::UnorderedThresholds { .. })
    ));
}

#[rstest]
fn custom_thresholds_change_levels_only() {
    let config = ScoringConfig::default().with_thresholds(QualityThresholds {
        excellent: 95,
        good: 80,
        fair: 20,
    });
    let custom = WaveQualityScorer::with_config(config).expect("valid configuration");
    let reading = conditions(4.5, 14.0, 25.0, 250.0);
    let score = custom.score(&reading, 1.2);
    assert_eq!(score, WaveQualityScorer::new().score(&reading, 1.2));
    assert_eq!(custom.level(score), QualityLevel::Fair);
}
