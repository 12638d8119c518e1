//! Unit coverage for station interpolation.

use super::*;
use chrono::Duration;
use rstest::{fixture, rstest};
use surfcast_core::registry::lat_lng_bounds;
use surfcast_core::test_support::{
    full_values, reference_time, silent_station, station_with_current,
};
use surfcast_core::{MarineValues, Observation};

fn target() -> Coord<f64> {
    Coord { x: -117.30, y: 33.00 }
}

fn bounds() -> Rect<f64> {
    lat_lng_bounds(32.9, -117.5, 33.1, -117.2)
}

#[fixture]
fn interpolator() -> StationInterpolator {
    StationInterpolator::default()
}

#[rstest]
fn colocated_station_dominates(interpolator: StationInterpolator) {
    let readings = vec![
        station_with_current(33.00, -117.30, full_values(2.0, 12.0, 260.0, 5.0, 90.0)),
        station_with_current(33.05, -117.40, full_values(1.0, 8.0, 250.0, 15.0, 270.0)),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);

    // Weights are 1/0.01 = 100 and 1/(0.1118 + 0.01) ~ 8.2.
    assert!(reading.wave.height_m > 1.9 && reading.wave.height_m < 2.0);
    assert!(!reading.synthetic);
    assert_eq!(reading.measurement_time, Some(reference_time()));
}

#[rstest]
fn equidistant_stations_average_evenly(interpolator: StationInterpolator) {
    let readings = vec![
        station_with_current(33.00, -117.25, full_values(1.0, 10.0, 250.0, 4.0, 80.0)),
        station_with_current(33.00, -117.35, full_values(2.0, 14.0, 270.0, 8.0, 100.0)),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);

    assert!((reading.wave.height_m - 1.5).abs() < 1e-9);
    assert!((reading.wave.period_s - 12.0).abs() < 1e-9);
    assert!((reading.wave.direction_deg - 260.0).abs() < 1e-9);
    assert!((reading.wind.speed_kts - 6.0).abs() < 1e-9);
    assert!((reading.wind.direction_deg - 90.0).abs() < 1e-9);
}

#[rstest]
fn silent_stations_contribute_nothing(interpolator: StationInterpolator) {
    let readings = vec![
        silent_station(33.00, -117.30),
        station_with_current(33.05, -117.40, full_values(1.0, 8.0, 250.0, 15.0, 270.0)),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);

    assert!((reading.wave.height_m - 1.0).abs() < 1e-9);
    assert!(!reading.synthetic);
}

#[rstest]
#[case(FallbackStrategy::Climatology)]
#[case(FallbackStrategy::Jitter { seed: 99 })]
fn all_null_pool_yields_finite_synthetic_reading(#[case] fallback: FallbackStrategy) {
    let interpolator =
        StationInterpolator::new(InterpolationConfig::default().with_fallback(fallback))
            .expect("valid configuration");
    let readings = vec![
        silent_station(33.00, -117.30),
        silent_station(33.01, -117.31),
        silent_station(33.02, -117.32),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 5);

    assert!(reading.synthetic);
    assert_eq!(reading.measurement_time, None);
    for value in [
        reading.wave.height_m,
        reading.wave.period_s,
        reading.wave.direction_deg,
        reading.wind.speed_kts,
        reading.wind.direction_deg,
        reading.wind.air_temp_f,
    ] {
        assert!(value.is_finite());
    }
    assert_eq!(reading.swell, None);
    assert_eq!(reading.water_temp_f, None);
}

#[rstest]
fn empty_pools_fall_back(interpolator: StationInterpolator) {
    let pool = StationPool::new(&[]);
    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);
    assert!(reading.synthetic);
}

#[rstest]
fn wind_fallback_keeps_real_waves(interpolator: StationInterpolator) {
    let waves = vec![station_with_current(
        33.00,
        -117.30,
        full_values(1.4, 12.0, 255.0, 5.0, 90.0),
    )];
    let wind = vec![silent_station(33.00, -117.30)];
    let wave_pool = StationPool::new(&waves);
    let wind_pool = StationPool::new(&wind);

    let reading = interpolator.interpolate(target(), bounds(), &wave_pool, &wind_pool, 0);

    assert!((reading.wave.height_m - 1.4).abs() < 1e-12);
    assert!(reading.synthetic);
    assert_eq!(reading.measurement_time, Some(reference_time()));
}

#[rstest]
fn measurement_time_is_earliest_used(interpolator: StationInterpolator) {
    let earlier = reference_time() - Duration::hours(3);
    let waves = vec![station_with_current(
        33.00,
        -117.30,
        full_values(1.4, 12.0, 255.0, 5.0, 90.0),
    )];
    let wind = vec![StationReading::empty(target()).with_hourly(vec![Observation::new(
        Some(earlier),
        full_values(1.0, 10.0, 250.0, 6.0, 80.0),
    )])];
    let wave_pool = StationPool::new(&waves);
    let wind_pool = StationPool::new(&wind);

    let reading = interpolator.interpolate(target(), bounds(), &wave_pool, &wind_pool, 0);

    assert_eq!(reading.measurement_time, Some(earlier));
}

#[rstest]
fn swell_and_water_temp_resolve_independently(interpolator: StationInterpolator) {
    let swell_only = MarineValues {
        swell_height: Some(0.9),
        swell_period: Some(16.0),
        ..MarineValues::default()
    };
    let readings = vec![
        station_with_current(33.00, -117.30, swell_only),
        station_with_current(33.00, -117.31, full_values(1.4, 12.0, 255.0, 5.0, 90.0)),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);

    let swell = reading.swell.expect("swell");
    assert!((swell.height_m - 0.9).abs() < 1e-12);
    // Only the second station reports water temperature.
    let water = reading.water_temp_f.expect("water temperature");
    assert!((water - 64.0).abs() < 1e-9);
    assert!((reading.wave.height_m - 1.4).abs() < 1e-12);
}

#[rstest]
fn only_nearest_stations_are_used() {
    let interpolator =
        StationInterpolator::new(InterpolationConfig::default().with_max_stations(1))
            .expect("valid configuration");
    let readings = vec![
        station_with_current(33.00, -117.31, full_values(1.0, 10.0, 250.0, 5.0, 90.0)),
        station_with_current(33.00, -117.28, full_values(2.0, 10.0, 250.0, 5.0, 90.0)),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);

    assert!((reading.wave.height_m - 1.0).abs() < 1e-12);
}

#[rstest]
#[case(0.0)]
#[case(-0.01)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn rejects_unusable_epsilon(#[case] epsilon: f64) {
    let config = InterpolationConfig::default().with_epsilon(epsilon);

    let err = StationInterpolator::new(config).expect_err("epsilon should be rejected");

    assert!(matches!(
        err,
        InterpolationConfigError::InvalidEpsilon { epsilon: rejected }
            if rejected.to_bits() == epsilon.to_bits()
    ));
}

#[rstest]
#[case(1e-9)]
#[case(0.01)]
#[case(0.5)]
fn station_on_target_outweighs_neighbours(#[case] epsilon: f64) {
    let interpolator = StationInterpolator::new(InterpolationConfig::default().with_epsilon(epsilon))
        .expect("valid configuration");
    let readings = vec![
        station_with_current(33.00, -117.30, full_values(3.0, 14.0, 260.0, 4.0, 90.0)),
        station_with_current(33.05, -117.40, full_values(1.0, 8.0, 250.0, 15.0, 270.0)),
    ];
    let pool = StationPool::new(&readings);

    let reading = interpolator.interpolate(target(), bounds(), &pool, &pool, 0);

    assert!(!reading.synthetic);
    assert!(reading.wave.height_m > 2.0, "{}", reading.wave.height_m);
    assert!(reading.wind.speed_kts < 9.5, "{}", reading.wind.speed_kts);
}
