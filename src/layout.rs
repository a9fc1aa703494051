//! Heart layout generation.
//!
//! Places particles on and inside the heart curve, then maps the result
//! into a sub-region of the display.
//!
//! ```ignore
//! let particles = HeartLayoutGenerator::new().generate(600, 10);
//!
//! // Reproducible layout for tests or screenshots
//! let mut rng = SmallRng::seed_from_u64(7);
//! let particles = HeartLayoutGenerator::new().generate_with_rng(600, 10, &mut rng);
//! ```
//!
//! The first `floor(count * outline_ratio)` particles trace the outline; the
//! rest fill the interior. Every particle also gets a random starting point
//! anywhere on the display, a reveal delay, a size and a colour.

use crate::config::{
    FILL_MAX_SCALE, FILL_SIZE, OUTLINE_BAND, OUTLINE_RATIO, OUTLINE_SIZE, REVEAL_DELAY_MAX,
};
use crate::heart::{heart_point, HeartBounds, DEFAULT_SAMPLE_RESOLUTION};
use crate::particle::{ParticleDescriptor, ParticleRole};
use crate::spawn::SpawnContext;
use glam::Vec2;
use rand::Rng;

/// Display sub-region (in percent) the heart is mapped into.
///
/// The axes use different spans so the heart keeps its aspect ratio on a
/// landscape viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl TargetRegion {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Map a unit-square point into the region.
    #[inline]
    pub fn map(&self, normalized: Vec2) -> Vec2 {
        self.min + normalized * (self.max - self.min)
    }

    /// Whether `point` lies inside the region, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for TargetRegion {
    fn default() -> Self {
        Self::new(Vec2::new(35.0, 30.0), Vec2::new(65.0, 70.0))
    }
}

/// Produces heart-shaped particle layouts.
///
/// Use method chaining to configure, then call [`generate`](Self::generate).
#[derive(Debug, Clone)]
pub struct HeartLayoutGenerator {
    outline_ratio: f32,
    region: TargetRegion,
    reveal_delay_max: f32,
    bounds: HeartBounds,
}

impl HeartLayoutGenerator {
    /// Generator with the scene's default constants.
    pub fn new() -> Self {
        Self {
            outline_ratio: OUTLINE_RATIO,
            region: TargetRegion::default(),
            reveal_delay_max: REVEAL_DELAY_MAX,
            bounds: HeartBounds::sample(DEFAULT_SAMPLE_RESOLUTION),
        }
    }

    /// Fraction of particles that trace the outline (clamped to `[0, 1]`).
    pub fn with_outline_ratio(mut self, ratio: f32) -> Self {
        self.outline_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Display sub-region the heart is mapped into.
    pub fn with_target_region(mut self, region: TargetRegion) -> Self {
        self.region = region;
        self
    }

    /// Upper bound of the per-particle reveal delay, in seconds.
    pub fn with_reveal_delay_max(mut self, seconds: f32) -> Self {
        self.reveal_delay_max = seconds.max(0.0);
        self
    }

    /// Number of curve samples used to measure the normalization box.
    pub fn with_sample_resolution(mut self, resolution: u32) -> Self {
        self.bounds = HeartBounds::sample(resolution);
        self
    }

    pub fn bounds(&self) -> HeartBounds {
        self.bounds
    }

    pub fn target_region(&self) -> TargetRegion {
        self.region
    }

    /// How many of `particle_count` particles get the outline role.
    pub fn outline_count(&self, particle_count: u32) -> u32 {
        ((particle_count as f32 * self.outline_ratio).floor() as u32).min(particle_count)
    }

    /// Generate `particle_count` descriptors using an entropy-seeded RNG.
    pub fn generate(&self, particle_count: u32, palette_size: u32) -> Vec<ParticleDescriptor> {
        self.generate_in(&mut SpawnContext::from_entropy(), particle_count, palette_size)
    }

    /// Generate `particle_count` descriptors from the given random source.
    ///
    /// The same RNG state always produces the same layout.
    pub fn generate_with_rng<R: Rng>(
        &self,
        particle_count: u32,
        palette_size: u32,
        rng: &mut R,
    ) -> Vec<ParticleDescriptor> {
        self.generate_in(&mut SpawnContext::new(rng), particle_count, palette_size)
    }

    fn generate_in<R: Rng>(
        &self,
        ctx: &mut SpawnContext<R>,
        particle_count: u32,
        palette_size: u32,
    ) -> Vec<ParticleDescriptor> {
        let outline_count = self.outline_count(particle_count);

        let particles: Vec<ParticleDescriptor> = (0..particle_count)
            .map(|id| self.spawn_one(ctx, id, outline_count, palette_size))
            .collect();

        log::debug!(
            "Generated heart layout: {} particles ({} outline, {} fill), palette of {}",
            particles.len(),
            outline_count,
            particle_count - outline_count,
            palette_size.max(1)
        );

        particles
    }

    fn spawn_one<R: Rng>(
        &self,
        ctx: &mut SpawnContext<R>,
        id: u32,
        outline_count: u32,
        palette_size: u32,
    ) -> ParticleDescriptor {
        let (role, curve_t, curve_scale, size) = if id < outline_count {
            let t = SpawnContext::<R>::even_angle(id, outline_count);
            let scale = ctx.band_scale(OUTLINE_BAND);
            let size = ctx.random_range(OUTLINE_SIZE.0, OUTLINE_SIZE.1);
            (ParticleRole::Outline, t, scale, size)
        } else {
            let t = ctx.random_angle();
            let scale = ctx.area_scale(FILL_MAX_SCALE);
            let size = ctx.random_range(FILL_SIZE.0, FILL_SIZE.1);
            (ParticleRole::Fill, t, scale, size)
        };

        let curve_point = heart_point(curve_t) * curve_scale;
        let target_position = self.region.map(self.bounds.normalize(curve_point));

        let initial_position = ctx.random_in_rect(Vec2::ZERO, Vec2::splat(100.0));
        let reveal_delay = ctx.random_range(0.0, self.reveal_delay_max);
        let color = ctx.random_color(palette_size);

        ParticleDescriptor {
            id,
            initial_position,
            target_position,
            size,
            color,
            reveal_delay,
            role,
            curve_t,
            curve_scale,
        }
    }
}

impl Default for HeartLayoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a layout with the default generator.
pub fn generate(particle_count: u32, palette_size: u32) -> Vec<ParticleDescriptor> {
    HeartLayoutGenerator::new().generate(particle_count, palette_size)
}
