//! Piecewise-linear response curves with named breakpoints.
//!
//! Each component score is read off a curve that maps a physical quantity to
//! `0.0..=1.0`. Between breakpoints values are interpolated linearly; outside
//! the breakpoint span the nearest end value is held.
#![forbid(unsafe_code)]
#![expect(
    clippy::float_arithmetic,
    reason = "linear interpolation between breakpoints"
)]

use crate::ScoringConfigError;

/// A named point on a [`PiecewiseLinear`] curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Regime label, e.g. `"optimal"`.
    pub label: &'static str,
    /// Input value in the curve's physical unit.
    pub x: f64,
    /// Score at `x`.
    pub y: f64,
}

impl Breakpoint {
    /// Construct a breakpoint.
    #[must_use]
    pub const fn new(label: &'static str, x: f64, y: f64) -> Self {
        Self { label, x, y }
    }
}

/// A curve through strictly increasing breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinear {
    name: &'static str,
    points: Vec<Breakpoint>,
}

impl PiecewiseLinear {
    /// Build a curve, checking that breakpoints are finite and strictly
    /// increasing in `x`.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when the curve is empty, holds a
    /// non-finite value or is out of order.
    pub fn new(
        name: &'static str,
        points: Vec<Breakpoint>,
    ) -> Result<Self, ScoringConfigError> {
        if points.is_empty() {
            return Err(ScoringConfigError::EmptyCurve { curve: name });
        }
        if let Some(bad) = points
            .iter()
            .find(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ScoringConfigError::NonFiniteBreakpoint {
                curve: name,
                label: bad.label,
            });
        }
        let unordered = points.windows(2).find_map(|pair| match pair {
            [lower, upper] if upper.x <= lower.x => Some(upper.label),
            _ => None,
        });
        if let Some(label) = unordered {
            return Err(ScoringConfigError::UnorderedBreakpoints { curve: name, label });
        }
        Ok(Self { name, points })
    }

    /// Curve name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Breakpoints in ascending `x`.
    #[must_use]
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Evaluate the curve at `x`.
    ///
    /// Values below the first breakpoint take its score, values above the
    /// last take the last score. `NaN` evaluates to `0.0`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        self.points
            .windows(2)
            .find_map(|pair| match pair {
                [lower, upper] if x <= upper.x => Some(lerp(lower, upper, x)),
                _ => None,
            })
            .unwrap_or(last.y)
    }

    /// Label of the regime `x` falls in: the last breakpoint at or below `x`.
    #[must_use]
    pub fn regime(&self, x: f64) -> &'static str {
        self.points
            .iter()
            .take_while(|point| point.x <= x)
            .last()
            .or_else(|| self.points.first())
            .map_or("unknown", |point| point.label)
    }
}

fn lerp(lower: &Breakpoint, upper: &Breakpoint, x: f64) -> f64 {
    let span = upper.x - lower.x;
    let t = (x - lower.x) / span;
    lower.y + t * (upper.y - lower.y)
}

/// Wave height (ft) to score.
///
/// Rises steeply from ankle height, plateaus through the optimal band and
/// declines for large and heavy surf without reaching zero.
#[must_use]
pub fn default_height_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        name: "wave height",
        points: vec![
            Breakpoint::new("flat", 0.0, 0.0),
            Breakpoint::new("ankle", 1.5, 0.05),
            Breakpoint::new("rideable", 2.8, 0.55),
            Breakpoint::new("optimal", 5.5, 1.0),
            Breakpoint::new("optimal-top", 7.0, 1.0),
            Breakpoint::new("large", 10.0, 0.55),
            Breakpoint::new("heavy", 15.0, 0.25),
            Breakpoint::new("giant", 20.0, 0.1),
        ],
    }
}

/// Wave period (s) to score.
#[must_use]
pub fn default_period_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        name: "wave period",
        points: vec![
            Breakpoint::new("chop", 5.0, 0.0),
            Breakpoint::new("wind-swell", 7.0, 0.05),
            Breakpoint::new("medium", 10.0, 0.35),
            Breakpoint::new("good", 14.0, 0.65),
            Breakpoint::new("excellent", 17.0, 0.95),
            Breakpoint::new("long", 20.0, 0.9),
            Breakpoint::new("very-long", 25.0, 0.8),
        ],
    }
}

/// Wind speed (kts) to score, before the direction modifier.
///
/// The tail holds a small non-zero score so the direction modifier still
/// separates offshore from onshore wind in a gale.
#[must_use]
pub fn default_wind_curve() -> PiecewiseLinear {
    PiecewiseLinear {
        name: "wind speed",
        points: vec![
            Breakpoint::new("glass", 0.0, 1.0),
            Breakpoint::new("light", 4.0, 1.0),
            Breakpoint::new("moderate", 8.0, 0.75),
            Breakpoint::new("fresh", 12.0, 0.45),
            Breakpoint::new("strong", 18.0, 0.1),
            Breakpoint::new("blown-out", 21.0, 0.03),
        ],
    }
}
