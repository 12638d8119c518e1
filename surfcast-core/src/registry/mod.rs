//! Static catalogue of coastline sections and their tuning tables.
//!
//! The registry owns one ordered master list of [`CoastlinePoint`]s. Each
//! [`Section`] claims a contiguous index range of that list, so point
//! membership is fixed when the registry is built and never re-derived from
//! geometry. A section's bounding box is only a soft prefilter for candidate
//! stations and is deliberately looser than its points.
//!
//! Bias records and location factors live in separate tables keyed by section
//! name. A missing entry resolves to neutral defaults so that a single
//! configuration slip never drops points from a run.

mod san_diego;

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use geo::{Coord, Intersects, Rect};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable target point on the coastline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoastlinePoint {
    /// Position with `x = longitude` and `y = latitude`.
    pub location: Coord<f64>,
    /// Optional human-readable label.
    pub name: Option<String>,
}

impl CoastlinePoint {
    /// Construct an unnamed point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self {
            location: Coord { x: lng, y: lat },
            name: None,
        }
    }

    /// Construct a labelled point from latitude and longitude.
    #[must_use]
    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            location: Coord { x: lng, y: lat },
            name: Some(name.into()),
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.location.x
    }
}

/// Per-section corrections applied on top of the regional wave model.
///
/// Multipliers scale the interpolated height and period; offsets are added to
/// the wave direction (deg), wind speed (kts) and water temperature (°F).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BiasRecord {
    /// Multiplier for wave height.
    pub height_multiplier: f64,
    /// Multiplier for wave period.
    pub period_multiplier: f64,
    /// Degrees added to the wave direction.
    pub direction_offset: f64,
    /// Knots added to the wind speed.
    pub wind_offset: f64,
    /// Degrees Fahrenheit added to the water temperature.
    pub temp_offset: Option<f64>,
}

impl BiasRecord {
    /// Record that leaves every reading unchanged.
    pub const NEUTRAL: Self = Self {
        height_multiplier: 1.0,
        period_multiplier: 1.0,
        direction_offset: 0.0,
        wind_offset: 0.0,
        temp_offset: None,
    };

    /// Construct a record without a temperature offset.
    #[must_use]
    pub const fn new(
        height_multiplier: f64,
        period_multiplier: f64,
        direction_offset: f64,
        wind_offset: f64,
    ) -> Self {
        Self {
            height_multiplier,
            period_multiplier,
            direction_offset,
            wind_offset,
            temp_offset: None,
        }
    }

    /// Attach a water temperature offset.
    #[must_use]
    pub const fn with_temp_offset(mut self, offset: f64) -> Self {
        self.temp_offset = Some(offset);
        self
    }
}

impl Default for BiasRecord {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A named stretch of coastline.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Unique section key, also used as the output id prefix.
    pub name: String,
    /// Loose bounding box used to prefilter candidate stations.
    pub bounds: Rect<f64>,
    /// Name of the tide station that serves this section.
    pub tide_station: String,
    points: Range<usize>,
}

impl Section {
    /// Index range of this section's points in the registry master list.
    #[must_use]
    pub fn point_range(&self) -> Range<usize> {
        self.points.clone()
    }
}

/// A tide gauge the provider can be queried for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TideStation {
    /// Registry key, referenced by [`Section::tide_station`].
    pub name: String,
    /// Provider station identifier.
    pub station_id: String,
}

/// A rectangle whose points are skipped, e.g. a harbour mouth where the wave
/// model produces meaningless values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionZone {
    /// Label for logs.
    pub name: String,
    /// Excluded area; the boundary counts as inside.
    pub bounds: Rect<f64>,
}

impl ExclusionZone {
    /// Report whether `location` falls inside the zone.
    #[must_use]
    pub fn contains(&self, location: Coord<f64>) -> bool {
        self.bounds.intersects(&location)
    }
}

/// Configuration invariants violated while building a [`SectionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry contains no sections.
    #[error("registry must contain at least one section")]
    Empty,
    /// Two sections share a name.
    #[error("section name {name:?} is declared more than once")]
    DuplicateSection {
        /// Offending section name.
        name: String,
    },
    /// A section owns no points.
    #[error("section {name:?} has no points")]
    EmptySection {
        /// Offending section name.
        name: String,
    },
    /// A section range does not start where the previous one ended.
    #[error("section {name:?} starts at point {start}, expected {expected}")]
    NonContiguous {
        /// Offending section name.
        name: String,
        /// Declared start index.
        start: usize,
        /// Index where the previous section ended.
        expected: usize,
    },
    /// Section ranges do not cover the whole master list.
    #[error("sections cover {covered} points but the master list holds {total}")]
    RangeOutOfBounds {
        /// Points claimed by sections.
        covered: usize,
        /// Length of the master list.
        total: usize,
    },
    /// A section references a tide station that is not registered.
    #[error("section {name:?} references unknown tide station {station:?}")]
    UnknownTideStation {
        /// Offending section name.
        name: String,
        /// Missing tide station key.
        station: String,
    },
}

/// Immutable lookup tables describing a coastal region.
///
/// # Examples
/// ```
/// use surfcast_core::SectionRegistry;
///
/// let registry = SectionRegistry::san_diego();
/// let first = registry.sections().first().expect("sections");
/// assert_eq!(first.name, "oceanside");
/// assert!(!registry.points_of(first).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRegistry {
    points: Vec<CoastlinePoint>,
    sections: Vec<Section>,
    bias: BTreeMap<String, BiasRecord>,
    location_factors: BTreeMap<String, f64>,
    tide_stations: Vec<TideStation>,
    default_tide_station: String,
    query_stations: Vec<Coord<f64>>,
    exclusion_zones: Vec<ExclusionZone>,
}

impl SectionRegistry {
    /// Start building a custom registry.
    #[must_use]
    pub fn builder() -> SectionRegistryBuilder {
        SectionRegistryBuilder::default()
    }

    /// The shipped San Diego County registry.
    #[must_use]
    pub fn san_diego() -> Self {
        san_diego::registry()
    }

    /// Sections in emission order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// The master list of coastline points.
    #[must_use]
    pub fn points(&self) -> &[CoastlinePoint] {
        &self.points
    }

    /// The points owned by `section`, in declaration order.
    #[must_use]
    pub fn points_of(&self, section: &Section) -> &[CoastlinePoint] {
        self.points.get(section.point_range()).unwrap_or(&[])
    }

    /// Bias record for `section`, or [`BiasRecord::NEUTRAL`] when missing.
    #[must_use]
    pub fn bias_for(&self, section: &str) -> BiasRecord {
        self.bias.get(section).copied().unwrap_or_else(|| {
            log::warn!("no bias record for section {section}; using neutral bias");
            BiasRecord::NEUTRAL
        })
    }

    /// Location factor for `section`, or `1.0` when missing.
    #[must_use]
    pub fn location_factor(&self, section: &str) -> f64 {
        self.location_factors
            .get(section)
            .copied()
            .unwrap_or_else(|| {
                log::warn!("no location factor for section {section}; using 1.0");
                1.0
            })
    }

    /// Report whether the bias and location tables both carry `section`.
    #[must_use]
    pub fn has_tuning_for(&self, section: &str) -> bool {
        self.bias.contains_key(section) && self.location_factors.contains_key(section)
    }

    /// Registered tide stations.
    #[must_use]
    pub fn tide_stations(&self) -> &[TideStation] {
        &self.tide_stations
    }

    /// Tide station used when a section's own station has no data.
    #[must_use]
    pub fn default_tide_station(&self) -> &str {
        &self.default_tide_station
    }

    /// Coordinates sent to the marine and forecast providers.
    #[must_use]
    pub fn query_stations(&self) -> &[Coord<f64>] {
        &self.query_stations
    }

    /// Areas whose points are skipped.
    #[must_use]
    pub fn exclusion_zones(&self) -> &[ExclusionZone] {
        &self.exclusion_zones
    }

    /// Return the exclusion zone covering `location`, if any.
    #[must_use]
    pub fn excluded_by(&self, location: Coord<f64>) -> Option<&ExclusionZone> {
        self.exclusion_zones
            .iter()
            .find(|zone| zone.contains(location))
    }

    /// Check the structural invariants of the registry.
    ///
    /// # Errors
    /// Returns the first [`RegistryError`] found.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.sections.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut names = HashSet::new();
        let mut expected = 0_usize;
        for section in &self.sections {
            if !names.insert(section.name.as_str()) {
                return Err(RegistryError::DuplicateSection {
                    name: section.name.clone(),
                });
            }
            if section.points.is_empty() {
                return Err(RegistryError::EmptySection {
                    name: section.name.clone(),
                });
            }
            if section.points.start != expected {
                return Err(RegistryError::NonContiguous {
                    name: section.name.clone(),
                    start: section.points.start,
                    expected,
                });
            }
            if !self
                .tide_stations
                .iter()
                .any(|station| station.name == section.tide_station)
            {
                return Err(RegistryError::UnknownTideStation {
                    name: section.name.clone(),
                    station: section.tide_station.clone(),
                });
            }
            expected = section.points.end;
        }
        if expected != self.points.len() {
            return Err(RegistryError::RangeOutOfBounds {
                covered: expected,
                total: self.points.len(),
            });
        }
        Ok(())
    }
}

/// Incrementally assembles a [`SectionRegistry`].
///
/// Each call to [`SectionRegistryBuilder::section`] appends the section's
/// points to the master list and records the resulting index range.
#[derive(Debug, Default, Clone)]
pub struct SectionRegistryBuilder {
    points: Vec<CoastlinePoint>,
    sections: Vec<Section>,
    bias: BTreeMap<String, BiasRecord>,
    location_factors: BTreeMap<String, f64>,
    tide_stations: Vec<TideStation>,
    default_tide_station: Option<String>,
    query_stations: Vec<Coord<f64>>,
    exclusion_zones: Vec<ExclusionZone>,
}

impl SectionRegistryBuilder {
    /// Append a section and its points.
    #[must_use]
    pub fn section(
        mut self,
        name: impl Into<String>,
        bounds: Rect<f64>,
        tide_station: impl Into<String>,
        points: impl IntoIterator<Item = CoastlinePoint>,
    ) -> Self {
        let start = self.points.len();
        self.points.extend(points);
        let end = self.points.len();
        self.sections.push(Section {
            name: name.into(),
            bounds,
            tide_station: tide_station.into(),
            points: start..end,
        });
        self
    }

    /// Register the bias record for a section.
    #[must_use]
    pub fn bias(mut self, section: impl Into<String>, record: BiasRecord) -> Self {
        self.bias.insert(section.into(), record);
        self
    }

    /// Register the location factor for a section.
    #[must_use]
    pub fn location_factor(mut self, section: impl Into<String>, factor: f64) -> Self {
        self.location_factors.insert(section.into(), factor);
        self
    }

    /// Register a tide station. The first registered station becomes the
    /// default unless [`Self::default_tide_station`] is called.
    #[must_use]
    pub fn tide_station(mut self, name: impl Into<String>, station_id: impl Into<String>) -> Self {
        self.tide_stations.push(TideStation {
            name: name.into(),
            station_id: station_id.into(),
        });
        self
    }

    /// Choose the fallback tide station.
    #[must_use]
    pub fn default_tide_station(mut self, name: impl Into<String>) -> Self {
        self.default_tide_station = Some(name.into());
        self
    }

    /// Add a provider query coordinate.
    #[must_use]
    pub fn query_station(mut self, lat: f64, lng: f64) -> Self {
        self.query_stations.push(Coord { x: lng, y: lat });
        self
    }

    /// Add an exclusion zone.
    #[must_use]
    pub fn exclusion_zone(mut self, name: impl Into<String>, bounds: Rect<f64>) -> Self {
        self.exclusion_zones.push(ExclusionZone {
            name: name.into(),
            bounds,
        });
        self
    }

    /// Finish the registry and validate it.
    ///
    /// # Errors
    /// Returns a [`RegistryError`] when the assembled registry breaks an
    /// invariant checked by [`SectionRegistry::validate`].
    pub fn build(self) -> Result<SectionRegistry, RegistryError> {
        let default_tide_station = self
            .default_tide_station
            .or_else(|| self.tide_stations.first().map(|station| station.name.clone()))
            .unwrap_or_default();
        let registry = SectionRegistry {
            points: self.points,
            sections: self.sections,
            bias: self.bias,
            location_factors: self.location_factors,
            tide_stations: self.tide_stations,
            default_tide_station,
            query_stations: self.query_stations,
            exclusion_zones: self.exclusion_zones,
        };
        registry.validate()?;
        Ok(registry)
    }
}

/// Build a rectangle from latitude/longitude extents.
#[must_use]
pub fn lat_lng_bounds(south: f64, west: f64, north: f64, east: f64) -> Rect<f64> {
    Rect::new(Coord { x: west, y: south }, Coord { x: east, y: north })
}
