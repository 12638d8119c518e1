//! Inverse-distance weighting accumulators.
#![expect(
    clippy::float_arithmetic,
    reason = "weighted means are floating-point by nature"
)]

/// Inverse-distance weight with a softening term.
///
/// `epsilon` keeps a co-located station finite and caps how far the closest
/// station can dominate.
#[must_use]
pub fn inverse_distance_weight(distance: f64, epsilon: f64) -> f64 {
    1.0 / (distance + epsilon)
}

/// Running weighted arithmetic mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedMean {
    sum: f64,
    weight: f64,
}

impl WeightedMean {
    /// Add a sample.
    pub fn add(&mut self, value: f64, weight: f64) {
        self.sum += value * weight;
        self.weight += weight;
    }

    /// Mean of the samples, or `None` when the total weight is zero.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.weight > 0.0)
            .then(|| self.sum / self.weight)
            .filter(|mean| mean.is_finite())
    }
}

/// Running weighted mean of bearings.
///
/// Bearings are averaged as unit vectors so 350° and 10° average to 0°
/// rather than 180°.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircularMean {
    sin: f64,
    cos: f64,
    weight: f64,
}

impl CircularMean {
    /// Add a bearing in degrees.
    pub fn add(&mut self, bearing_deg: f64, weight: f64) {
        let radians = bearing_deg.to_radians();
        self.sin += radians.sin() * weight;
        self.cos += radians.cos() * weight;
        self.weight += weight;
    }

    /// Mean bearing in `0.0..360.0`, or `None` when the total weight is zero.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.weight <= 0.0 {
            return None;
        }
        let bearing = self.sin.atan2(self.cos).to_degrees().rem_euclid(360.0);
        // rem_euclid can round a tiny negative angle up to exactly 360.
        let normalised = if bearing >= 360.0 { 0.0 } else { bearing };
        normalised.is_finite().then_some(normalised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn weight_is_finite_at_zero_distance() {
        assert!((inverse_distance_weight(0.0, 0.01) - 100.0).abs() < 1e-9);
    }

    #[rstest]
    fn weighted_mean_favours_heavier_samples() {
        let mut mean = WeightedMean::default();
        mean.add(1.0, 3.0);
        mean.add(2.0, 1.0);
        let value = mean.mean().expect("mean");
        assert!((value - 1.25).abs() < 1e-12);
    }

    #[rstest]
    fn empty_means_are_none() {
        assert_eq!(WeightedMean::default().mean(), None);
        assert_eq!(CircularMean::default().mean(), None);
    }

    #[rstest]
    #[case(350.0, 10.0, 0.0)]
    #[case(250.0, 270.0, 260.0)]
    #[case(-90.0, 270.0, 270.0)]
    fn circular_mean_wraps(#[case] first: f64, #[case] second: f64, #[case] expected: f64) {
        let mut mean = CircularMean::default();
        mean.add(first, 1.0);
        mean.add(second, 1.0);
        let value = mean.mean().expect("mean");
        let diff = (value - expected).rem_euclid(360.0);
        assert!(diff.min(360.0 - diff) < 1e-9, "{value}");
    }
}
