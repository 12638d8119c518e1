//! Property-based tests for the conditions pipeline.
//!
//! # Invariants tested
//!
//! - **Completeness:** every non-excluded point yields exactly one record
//!   with a unique id, whatever the station data looks like.
//! - **Finiteness:** emitted values are finite and scores lie in `0..=100`.

use std::collections::BTreeSet;

use geo::Coord;
use proptest::prelude::*;
use surfcast_core::registry::lat_lng_bounds;
use surfcast_core::test_support::reference_time;
use surfcast_core::{
    CoastlinePoint, MarineSnapshot, MarineValues, Observation, SectionRegistry, StationReading,
};
use surfcast_pipeline::{ConditionsPipeline, FallbackStrategy, PipelineConfig};
use surfcast_scorer::WaveQualityScorer;

fn registry() -> SectionRegistry {
    let points = |lat: f64| {
        (0..4_u32)
            .map(move |step| CoastlinePoint::new(lat + f64::from(step) * 0.01, -117.27))
            .collect::<Vec<_>>()
    };
    SectionRegistry::builder()
        .tide_station("gauge", "9410230")
        .section("north", lat_lng_bounds(33.0, -117.4, 33.1, -117.2), "gauge", points(33.02))
        .section("south", lat_lng_bounds(32.9, -117.4, 33.0, -117.2), "gauge", points(32.92))
        .exclusion_zone("harbour", lat_lng_bounds(32.925, -117.28, 32.935, -117.26))
        .build()
        .expect("test registry should be valid")
}

fn maybe(range: std::ops::Range<f64>) -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(f64::NAN)),
        4 => range.prop_map(Some),
    ]
}

fn values_strategy() -> impl Strategy<Value = MarineValues> {
    (
        (maybe(0.0..6.0), maybe(2.0..25.0), maybe(-360.0..720.0)),
        (maybe(0.0..4.0), maybe(4.0..22.0), maybe(40.0..90.0)),
        (maybe(0.0..50.0), maybe(-360.0..720.0), maybe(20.0..120.0)),
    )
        .prop_map(|(wave, swell, wind)| MarineValues {
            wave_height: wave.0,
            wave_period: wave.1,
            wave_direction: wave.2,
            swell_height: swell.0,
            swell_period: swell.1,
            sea_surface_temperature: swell.2,
            wind_speed: wind.0,
            wind_direction: wind.1,
            air_temperature: wind.2,
        })
}

fn station_strategy() -> impl Strategy<Value = StationReading> {
    (32.8_f64..33.2, -117.6_f64..-117.1, prop::option::of(values_strategy()))
        .prop_map(|(lat, lng, current)| {
            let reading = StationReading::empty(Coord { x: lng, y: lat });
            match current {
                Some(values) => {
                    reading.with_current(Observation::new(Some(reference_time()), values))
                }
                None => reading,
            }
        })
}

fn snapshot_strategy() -> impl Strategy<Value = MarineSnapshot> {
    (
        prop::collection::vec(station_strategy(), 0..6),
        prop::collection::vec(station_strategy(), 0..6),
    )
        .prop_map(|(waves, wind)| MarineSnapshot {
            waves,
            wind,
            ..MarineSnapshot::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: one record per non-excluded point, ids unique.
    #[test]
    fn never_drops_a_point(snapshot in snapshot_strategy(), seed in any::<u64>()) {
        let registry = registry();
        let expected = registry
            .points()
            .iter()
            .filter(|point| registry.excluded_by(point.location).is_none())
            .count();
        let config = PipelineConfig::default().with_fallback(FallbackStrategy::Jitter { seed });
        let pipeline = ConditionsPipeline::with_config(registry, WaveQualityScorer::new(), config)
            .expect("valid configuration");

        let run = pipeline.run_with_summary(&snapshot, reference_time());

        prop_assert_eq!(run.points.len(), expected);
        prop_assert_eq!(run.summary.excluded, 1);
        let ids: BTreeSet<&str> = run.points.iter().map(|point| point.id.as_str()).collect();
        prop_assert_eq!(ids.len(), expected);
    }

    /// Property: emitted values are finite and scores stay in range.
    #[test]
    fn emits_finite_values(snapshot in snapshot_strategy()) {
        let pipeline = ConditionsPipeline::new(registry(), WaveQualityScorer::new());

        for point in pipeline.run(&snapshot, reference_time()) {
            for value in [
                point.wave_height,
                point.wave_period,
                point.wave_direction,
                point.wind_speed,
                point.wind_direction,
                point.water_temp,
                point.air_temp,
            ] {
                prop_assert!(value.is_finite(), "{}: {}", point.id, value);
            }
            prop_assert!(point.quality_score <= 100);
            prop_assert!(
                point.measurement_time.is_none()
                    || point.measurement_time == Some(reference_time())
            );
        }
    }
}
