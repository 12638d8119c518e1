//! Behavioural coverage for wave quality scoring.

use std::cell::{Cell, RefCell};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use surfcast_core::{QualityLevel, QualityScorer, SurfConditions};
use surfcast_scorer::WaveQualityScorer;

#[fixture]
fn scorer() -> WaveQualityScorer {
    WaveQualityScorer::new()
}

#[fixture]
fn conditions() -> RefCell<SurfConditions> {
    RefCell::new(SurfConditions {
        wave_height_ft: 0.0,
        wave_period_s: 0.0,
        wave_direction_deg: 0.0,
        wind_speed_kts: 0.0,
        wind_direction_deg: 0.0,
    })
}

#[fixture]
fn location_factor() -> Cell<f64> {
    Cell::new(1.0)
}

#[fixture]
fn score() -> Cell<Option<u8>> {
    Cell::new(None)
}

#[given("surf of {height} ft at {period} s from {direction} degrees")]
fn surf(
    height: f64,
    period: f64,
    direction: f64,
    #[from(conditions)] conditions: &RefCell<SurfConditions>,
) {
    let mut current = conditions.borrow_mut();
    current.wave_height_ft = height;
    current.wave_period_s = period;
    current.wave_direction_deg = direction;
}

#[given("wind of {speed} kts from {direction} degrees")]
fn wind(speed: f64, direction: f64, #[from(conditions)] conditions: &RefCell<SurfConditions>) {
    let mut current = conditions.borrow_mut();
    current.wind_speed_kts = speed;
    current.wind_direction_deg = direction;
}

#[given("a location factor of {factor}")]
fn location_factor_of(factor: f64, #[from(location_factor)] location_factor: &Cell<f64>) {
    location_factor.set(factor);
}

#[when("I score the conditions")]
fn score_conditions(
    #[from(scorer)] scorer: &WaveQualityScorer,
    #[from(conditions)] conditions: &RefCell<SurfConditions>,
    #[from(location_factor)] location_factor: &Cell<f64>,
    #[from(score)] score: &Cell<Option<u8>>,
) {
    score.set(Some(
        scorer.score(&conditions.borrow(), location_factor.get()),
    ));
}

#[then("the score is at least {minimum}")]
fn at_least(minimum: u8, #[from(score)] score: &Cell<Option<u8>>) {
    let actual = score.get().expect("conditions should be scored");
    assert!(actual >= minimum, "score {actual} below {minimum}");
}

#[then("the score is below {limit}")]
fn below(limit: u8, #[from(score)] score: &Cell<Option<u8>>) {
    let actual = score.get().expect("conditions should be scored");
    assert!(actual < limit, "score {actual} not below {limit}");
}

#[then("the quality level is {level}")]
fn quality_level_is(
    level: String,
    #[from(scorer)] scorer: &WaveQualityScorer,
    #[from(score)] score: &Cell<Option<u8>>,
) {
    let actual = score.get().expect("conditions should be scored");
    let expected = match level.trim_matches('"') {
        "excellent" => QualityLevel::Excellent,
        "good" => QualityLevel::Good,
        "fair" => QualityLevel::Fair,
        _ => QualityLevel::Poor,
    };
    assert_eq!(scorer.level(actual), expected);
}

#[scenario(path = "tests/features/quality.feature", index = 0)]
fn clean_offshore_swell(
    scorer: WaveQualityScorer,
    conditions: RefCell<SurfConditions>,
    location_factor: Cell<f64>,
    score: Cell<Option<u8>>,
) {
    let _ = (scorer, conditions, location_factor, score);
}

#[scenario(path = "tests/features/quality.feature", index = 1)]
fn blown_out_onshore_swell(
    scorer: WaveQualityScorer,
    conditions: RefCell<SurfConditions>,
    location_factor: Cell<f64>,
    score: Cell<Option<u8>>,
) {
    let _ = (scorer, conditions, location_factor, score);
}

#[scenario(path = "tests/features/quality.feature", index = 2)]
fn cross_shore_small_day(
    scorer: WaveQualityScorer,
    conditions: RefCell<SurfConditions>,
    location_factor: Cell<f64>,
    score: Cell<Option<u8>>,
) {
    let _ = (scorer, conditions, location_factor, score);
}
