//! Spatial index over the stations returned for one run.

use geo::{Coord, Rect};
use rstar::{AABB, RTree, RTreeObject};
use surfcast_core::{StationReading, squared_distance};

#[derive(Debug, Clone, Copy)]
struct IndexedStation {
    index: usize,
    location: Coord<f64>,
}

impl RTreeObject for IndexedStation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x, self.location.y])
    }
}

/// Stations of one family (wave or wind) indexed by location.
#[derive(Debug)]
pub struct StationPool<'a> {
    readings: &'a [StationReading],
    index: RTree<IndexedStation>,
}

impl<'a> StationPool<'a> {
    /// Index `readings`.
    #[must_use]
    pub fn new(readings: &'a [StationReading]) -> Self {
        let entries = readings
            .iter()
            .enumerate()
            .map(|(index, reading)| IndexedStation {
                index,
                location: reading.location,
            })
            .collect();
        Self {
            readings,
            index: RTree::bulk_load(entries),
        }
    }

    /// Number of stations in the pool.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.readings.len()
    }

    /// Report whether the pool holds no stations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Up to `limit` stations nearest to `target`, each with its planar
    /// distance, closest first.
    ///
    /// Candidates are the stations inside `bounds` (boundary inclusive); when
    /// none fall inside, the whole pool is searched. Equal distances keep
    /// response order.
    #[must_use]
    pub fn nearest(
        &self,
        target: Coord<f64>,
        bounds: Rect<f64>,
        limit: usize,
    ) -> Vec<(&'a StationReading, f64)> {
        let envelope =
            AABB::from_corners([bounds.min().x, bounds.min().y], [bounds.max().x, bounds.max().y]);
        let mut candidates: Vec<(usize, f64)> = self
            .index
            .locate_in_envelope_intersecting(&envelope)
            .map(|station| (station.index, squared_distance(target, station.location)))
            .collect();
        if candidates.is_empty() {
            candidates = self
                .index
                .iter()
                .map(|station| (station.index, squared_distance(target, station.location)))
                .collect();
        }
        candidates.sort_by(|left, right| left.1.total_cmp(&right.1).then(left.0.cmp(&right.0)));
        candidates
            .into_iter()
            .take(limit)
            .filter_map(|(index, distance_2)| {
                self.readings
                    .get(index)
                    .map(|reading| (reading, distance_2.sqrt()))
            })
            .collect()
    }
}
