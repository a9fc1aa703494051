//! The parametric heart curve and its normalization box.
//!
//! Every layout in this crate is built on one curve:
//!
//! ```text
//! x(t) = 16 sin³(t)
//! y(t) = -(13 cos(t) - 5 cos(2t) - 2 cos(3t) - cos(4t))
//! ```
//!
//! `y` is negated so that the point of the heart faces down in screen
//! coordinates (y grows downward).

use glam::Vec2;
use std::f32::consts::TAU;

/// Number of equally spaced samples used to measure the curve's extent.
pub const DEFAULT_SAMPLE_RESOLUTION: u32 = 100;

/// Evaluate the heart curve at parameter `t` (radians).
#[inline]
pub fn heart_point(t: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    Vec2::new(x, y)
}

/// Axis-aligned bounding box of the heart curve in curve space.
///
/// All particles, outline and fill alike, are normalized against the
/// same box so the heart keeps its proportions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartBounds {
    /// Componentwise minimum.
    pub min: Vec2,
    /// Componentwise maximum.
    pub max: Vec2,
}

impl HeartBounds {
    /// Build a box from explicit corners.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Measure the curve at `resolution` equally spaced `t` values over one
    /// revolution, `t_i = i / resolution * 2π`.
    ///
    /// A resolution of zero is treated as one sample.
    pub fn sample(resolution: u32) -> Self {
        let resolution = resolution.max(1);
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);

        for i in 0..resolution {
            let t = i as f32 / resolution as f32 * TAU;
            let p = heart_point(t);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Width and height of the box.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    /// Map a curve-space point into the unit square.
    ///
    /// An axis with no extent cannot be divided by; that axis keeps the
    /// unscaled offset from `min`. The result is clamped to `[0, 1]` because
    /// the sampled box can sit a hair inside the curve's true extremes.
    pub fn normalize(&self, point: Vec2) -> Vec2 {
        let offset = point - self.min;
        let extent = self.extent();

        let x = if extent.x > f32::EPSILON { offset.x / extent.x } else { offset.x };
        let y = if extent.y > f32::EPSILON { offset.y / extent.y } else { offset.y };

        Vec2::new(x, y).clamp(Vec2::ZERO, Vec2::ONE)
    }
}

impl Default for HeartBounds {
    fn default() -> Self {
        Self::sample(DEFAULT_SAMPLE_RESOLUTION)
    }
}
