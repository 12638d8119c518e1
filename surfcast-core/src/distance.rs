//! Planar distance helpers for nearest-station search.
//!
//! Distances are measured directly in degree space with no geodesic
//! correction. The regions served are small enough that the distortion does
//! not change which stations are nearest.

use geo::Coord;

/// Squared Euclidean distance between two coordinates in degree space.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use surfcast_core::squared_distance;
///
/// let d2 = squared_distance(Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 });
/// assert_eq!(d2, 25.0);
/// ```
#[must_use]
pub fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Euclidean distance between two coordinates in degree space.
#[must_use]
pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    squared_distance(a, b).sqrt()
}
