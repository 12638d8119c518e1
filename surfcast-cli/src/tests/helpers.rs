//! Test helpers for staging snapshots and stubbing the live data source.

use camino::{Utf8Path, Utf8PathBuf};
use surfcast_core::test_support::{StaticSource, full_values, station_with_current};
use surfcast_core::{MarineDataSource, MarineSnapshot, SectionRegistry, StationReading};
use surfcast_data::HttpMarineSourceConfig;
use tempfile::TempDir;

use crate::CliError;
use crate::conditions::SourceBuilder;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// One reading per built-in query station, all carrying the same values.
pub(super) fn readings_at_query_stations(height_m: f64, period_s: f64) -> Vec<StationReading> {
    SectionRegistry::san_diego()
        .query_stations()
        .iter()
        .map(|station| {
            station_with_current(
                station.y,
                station.x,
                full_values(height_m, period_s, 260.0, 5.0, 80.0),
            )
        })
        .collect()
}

pub(super) fn snapshot_json(snapshot: &MarineSnapshot) -> String {
    serde_json::to_string_pretty(snapshot).expect("serialise snapshot")
}

/// Points the built-in registry emits, i.e. those outside exclusion zones.
pub(super) fn emitted_point_count() -> usize {
    let registry = SectionRegistry::san_diego();
    registry
        .points()
        .iter()
        .filter(|point| registry.excluded_by(point.location).is_none())
        .count()
}

#[derive(Debug, Clone, Default)]
pub(super) struct StubSourceBuilder {
    pub(super) source: StaticSource,
}

impl SourceBuilder for StubSourceBuilder {
    fn build(
        &self,
        _config: &HttpMarineSourceConfig,
    ) -> Result<Box<dyn MarineDataSource>, CliError> {
        Ok(Box::new(self.source.clone()))
    }
}
