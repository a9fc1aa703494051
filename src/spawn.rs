//! Spawn context for particle placement.
//!
//! Wraps the random source used by the layout generator and provides the
//! handful of sampling helpers the heart layout needs.
//!
//! ```ignore
//! // Entropy-seeded, different every run
//! let mut ctx = SpawnContext::from_entropy();
//!
//! // Fixed stream for reproducible layouts
//! let mut ctx = SpawnContext::from_seed(7);
//! let p = ctx.random_in_rect(Vec2::ZERO, Vec2::splat(100.0));
//! ```

use crate::visuals::ColorToken;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Random source plus the sampling helpers used while placing particles.
///
/// Generic over the RNG so callers can inject any [`Rng`]; the default is a
/// [`SmallRng`].
pub struct SpawnContext<R: Rng = SmallRng> {
    rng: R,
}

impl SpawnContext<SmallRng> {
    /// Seed from OS entropy. Layouts differ on every call.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    /// Seed from a fixed value. The same seed always yields the same stream.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpawnContext<R> {
    /// Wrap an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. An empty range returns `min`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Random point inside the axis-aligned rectangle `[min, max)`.
    pub fn random_in_rect(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(
            self.random_range(min.x, max.x),
            self.random_range(min.y, max.y),
        )
    }

    /// Random palette slot in `[0, palette_size)`. A size of zero behaves
    /// like a one-colour palette.
    pub fn random_color(&mut self, palette_size: u32) -> ColorToken {
        ColorToken(self.rng.gen_range(0..palette_size.max(1)))
    }

    // ========== Curve sampling ==========

    /// Curve parameter for the `index`-th of `count` evenly spaced samples
    /// over one revolution.
    #[inline]
    pub fn even_angle(index: u32, count: u32) -> f32 {
        if count == 0 {
            return 0.0;
        }
        index as f32 / count as f32 * TAU
    }

    /// Uniformly random curve parameter over one revolution.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Scale factor for an outline band: `1 - U * thickness`, in
    /// `(1 - thickness, 1]`.
    #[inline]
    pub fn band_scale(&mut self, thickness: f32) -> f32 {
        1.0 - self.random() * thickness
    }

    /// Scale factor for filling a star-shaped region with uniform area
    /// density: `sqrt(U) * max_scale`.
    #[inline]
    pub fn area_scale(&mut self, max_scale: f32) -> f32 {
        // sqrt for uniform area, same as sampling a disk
        self.random().sqrt() * max_scale
    }
}
