//! `ConditionsPipeline`: interpolate, correct and score every coastline point.
//!
//! Sections and points are visited in registry order and that order is kept
//! in the output, so records can be grouped by their section id prefix.
//! Points are evaluated in parallel; nothing is shared between them except
//! read-only tables.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use surfcast_core::{
    BiasRecord, CoastlinePoint, MarineDataSource, MarineRequest, MarineSnapshot, QualityScorer,
    Section, SectionRegistry, SurfConditions, TideReading, WaveDataPoint,
};

use crate::bias::apply_bias;
use crate::interpolate::{InterpolationConfig, StationInterpolator};
use crate::pool::StationPool;
use crate::tide::resolve_tide;
use crate::{FallbackStrategy, PipelineError};

/// Configuration for [`ConditionsPipeline`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipelineConfig {
    /// Station interpolation settings.
    pub interpolation: InterpolationConfig,
}

impl PipelineConfig {
    /// Replace the interpolation settings.
    #[must_use]
    pub const fn with_interpolation(mut self, interpolation: InterpolationConfig) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replace the fallback strategy.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.interpolation.fallback = fallback;
        self
    }
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records emitted.
    pub emitted: usize,
    /// Points skipped because they fall inside an exclusion zone.
    pub excluded: usize,
    /// Records that used synthetic fallback values.
    pub synthetic: usize,
}

/// Output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    /// One record per non-excluded coastline point, in registry order.
    pub points: Vec<WaveDataPoint>,
    /// Run counters.
    pub summary: RunSummary,
}

/// Per-section values looked up once per run.
#[derive(Debug)]
struct SectionContext<'r> {
    section: &'r Section,
    bias: BiasRecord,
    location_factor: f64,
    tide: TideReading,
}

#[derive(Debug)]
struct PointTask<'r> {
    context: &'r SectionContext<'r>,
    index: usize,
    ordinal: usize,
    point: &'r CoastlinePoint,
}

/// Turns raw station data into scored coastline records.
///
/// The pipeline is generic over the quality scorer so alternative scoring
/// models can be plugged in without touching interpolation.
#[derive(Debug)]
pub struct ConditionsPipeline<C>
where
    C: QualityScorer,
{
    registry: SectionRegistry,
    scorer: C,
    interpolator: StationInterpolator,
}

impl<C> ConditionsPipeline<C>
where
    C: QualityScorer,
{
    /// Construct a pipeline using default configuration.
    #[must_use]
    pub fn new(registry: SectionRegistry, scorer: C) -> Self {
        Self {
            registry,
            scorer,
            interpolator: StationInterpolator::default(),
        }
    }

    /// Construct a pipeline with explicit configuration.
    ///
    /// # Errors
    /// Returns [`PipelineError::Config`] when the interpolation settings are
    /// invalid.
    pub fn with_config(
        registry: SectionRegistry,
        scorer: C,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            registry,
            scorer,
            interpolator: StationInterpolator::new(config.interpolation)?,
        })
    }

    /// Registry driving the run.
    #[must_use]
    pub const fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Scorer used for every point.
    #[must_use]
    pub const fn scorer(&self) -> &C {
        &self.scorer
    }

    /// Score every coastline point from `snapshot`.
    ///
    /// Never fails: missing data degrades to neutral tables and synthetic
    /// readings.
    #[must_use]
    pub fn run(&self, snapshot: &MarineSnapshot, run_time: DateTime<Utc>) -> Vec<WaveDataPoint> {
        self.run_with_summary(snapshot, run_time).points
    }

    /// As [`Self::run`], also returning run counters.
    #[must_use]
    pub fn run_with_summary(
        &self,
        snapshot: &MarineSnapshot,
        run_time: DateTime<Utc>,
    ) -> PipelineRun {
        let wave_pool = StationPool::new(&snapshot.waves);
        let wind_pool = StationPool::new(&snapshot.wind);
        let contexts = self.section_contexts(&snapshot.tides);
        let (tasks, excluded) = self.point_tasks(&contexts);

        let evaluated: Vec<(WaveDataPoint, bool)> = tasks
            .par_iter()
            .map(|task| self.evaluate(task, &wave_pool, &wind_pool, run_time))
            .collect();

        let synthetic = evaluated.iter().filter(|(_, synthetic)| *synthetic).count();
        let points: Vec<WaveDataPoint> = evaluated.into_iter().map(|(point, _)| point).collect();
        let summary = RunSummary {
            emitted: points.len(),
            excluded,
            synthetic,
        };
        log::info!(
            "scored {} coastline points from {} wave and {} wind stations ({} excluded, {} synthetic)",
            summary.emitted,
            wave_pool.len(),
            wind_pool.len(),
            summary.excluded,
            summary.synthetic
        );
        PipelineRun { points, summary }
    }

    /// Fetch a snapshot from `source` and run the pipeline on it.
    ///
    /// # Errors
    /// Returns [`PipelineError::Fetch`] when the wave or wind data cannot be
    /// fetched. Tide failures only degrade the affected sections.
    pub fn fetch_and_run<S>(
        &self,
        source: &S,
        run_time: DateTime<Utc>,
    ) -> Result<PipelineRun, PipelineError>
    where
        S: MarineDataSource + ?Sized,
    {
        let request = MarineRequest::from_registry(&self.registry);
        let snapshot = source.fetch_snapshot(&request)?;
        Ok(self.run_with_summary(&snapshot, run_time))
    }

    fn section_contexts<'r>(
        &'r self,
        tides: &BTreeMap<String, TideReading>,
    ) -> Vec<SectionContext<'r>> {
        self.registry
            .sections()
            .iter()
            .map(|section| SectionContext {
                section,
                bias: self.registry.bias_for(&section.name),
                location_factor: self.registry.location_factor(&section.name),
                tide: resolve_tide(section, &self.registry, tides),
            })
            .collect()
    }

    fn point_tasks<'r>(&'r self, contexts: &'r [SectionContext<'r>]) -> (Vec<PointTask<'r>>, usize) {
        let mut tasks = Vec::with_capacity(self.registry.points().len());
        let mut excluded = 0_usize;
        for context in contexts {
            let start = context.section.point_range().start;
            for (index, point) in self.registry.points_of(context.section).iter().enumerate() {
                if let Some(zone) = self.registry.excluded_by(point.location) {
                    log::debug!(
                        "skipping {}-{index} inside exclusion zone {}",
                        context.section.name,
                        zone.name
                    );
                    excluded = excluded.saturating_add(1);
                    continue;
                }
                tasks.push(PointTask {
                    context,
                    index,
                    ordinal: start.saturating_add(index),
                    point,
                });
            }
        }
        (tasks, excluded)
    }

    fn evaluate(
        &self,
        task: &PointTask<'_>,
        waves: &StationPool<'_>,
        wind: &StationPool<'_>,
        run_time: DateTime<Utc>,
    ) -> (WaveDataPoint, bool) {
        let context = task.context;
        let section = context.section;
        let id = format!("{}-{}", section.name, task.index);
        let raw = self.interpolator.interpolate(
            task.point.location,
            section.bounds,
            waves,
            wind,
            u64::try_from(task.ordinal).unwrap_or(u64::MAX),
        );
        if raw.synthetic {
            log::warn!(
                "no usable station data for {id}; using {:?} fallback",
                self.interpolator.config().fallback
            );
        }
        let adjusted = apply_bias(&raw, &context.bias, &section.name);
        let conditions = SurfConditions {
            wave_height_ft: adjusted.wave_height_ft,
            wave_period_s: adjusted.wave_period_s,
            wave_direction_deg: adjusted.wave_direction_deg,
            wind_speed_kts: adjusted.wind_speed_kts,
            wind_direction_deg: adjusted.wind_direction_deg,
        };
        let quality_score = self.scorer.score(&conditions, context.location_factor);

        let record = WaveDataPoint {
            id,
            section: section.name.clone(),
            name: task.point.name.clone(),
            lat: task.point.lat(),
            lng: task.point.lng(),
            wave_height: adjusted.wave_height_ft,
            wave_period: adjusted.wave_period_s,
            wave_direction: adjusted.wave_direction_deg,
            swell_height: adjusted.swell_height_ft,
            swell_period: adjusted.swell_period_s,
            wind_speed: adjusted.wind_speed_kts,
            wind_direction: adjusted.wind_direction_deg,
            water_temp: adjusted.water_temp_f,
            air_temp: adjusted.air_temp_f,
            tide_height: context.tide.height_ft,
            tide_trend: context.tide.trend,
            quality_score,
            quality_level: self.scorer.level(quality_score),
            interpolated: !raw.synthetic,
            timestamp: run_time,
            measurement_time: raw.measurement_time,
        };
        (record, raw.synthetic)
    }
}
