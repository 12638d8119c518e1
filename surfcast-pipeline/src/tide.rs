//! Tide lookup for a section.

use std::collections::BTreeMap;

use surfcast_core::{Section, SectionRegistry, TideReading};

/// Pick the tide reading for `section`.
///
/// Lookup order: the section name, the section's tide station, the
/// registry's default station, the first available reading by station name
/// and finally [`TideReading::DEFAULT`].
#[must_use]
pub fn resolve_tide(
    section: &Section,
    registry: &SectionRegistry,
    tides: &BTreeMap<String, TideReading>,
) -> TideReading {
    [
        section.name.as_str(),
        section.tide_station.as_str(),
        registry.default_tide_station(),
    ]
    .into_iter()
    .find_map(|key| tides.get(key))
    .or_else(|| tides.values().next())
    .copied()
    .unwrap_or(TideReading::DEFAULT)
}
