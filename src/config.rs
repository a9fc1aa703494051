//! Fixed constants of the greeting scene.
//!
//! The scene is not configurable at runtime. [`SceneConfig`] bundles the
//! constants so tests can shrink particle counts or shorten timings.

use crate::visuals::Palette;
use std::time::Duration;

/// Particles in the scene.
pub const NUM_PARTICLES: u32 = 600;

/// Fraction of particles tracing the heart outline.
pub const OUTLINE_RATIO: f32 = 0.4;

/// Outline scale factors are drawn from `(1 - OUTLINE_BAND, 1]`.
pub const OUTLINE_BAND: f32 = 0.08;

/// Fill scale factors are drawn as `sqrt(U) * FILL_MAX_SCALE`.
pub const FILL_MAX_SCALE: f32 = 0.95;

/// Size range (px) of outline particles.
pub const OUTLINE_SIZE: (f32, f32) = (2.0, 4.0);

/// Size range (px) of fill particles.
pub const FILL_SIZE: (f32, f32) = (1.5, 3.5);

/// Upper bound of the per-particle reveal delay, in seconds.
pub const REVEAL_DELAY_MAX: f32 = 1.5;

/// Time for particles to travel into the heart.
pub const HEART_FORMATION_DURATION: Duration = Duration::from_millis(3000);

/// Pause between the heart forming and the text scene appearing.
pub const FINAL_SCENE_DELAY: Duration = Duration::from_millis(1000);

/// The instant the counter measures from.
pub const ANNIVERSARY_DATE: &str = "2023-10-27T00:00:00Z";

pub const TITLE: &str = "Peter & Ellie";
pub const SUBTITLE: &str = "Since October 27, 2023";

/// Scene constants, defaulting to the values above.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub particle_count: u32,
    pub palette: Palette,
    pub formation_duration: Duration,
    pub final_scene_delay: Duration,
    pub anniversary: String,
    pub title: String,
    pub subtitle: String,
}

impl SceneConfig {
    pub fn new() -> Self {
        Self {
            particle_count: NUM_PARTICLES,
            palette: Palette::anniversary(),
            formation_duration: HEART_FORMATION_DURATION,
            final_scene_delay: FINAL_SCENE_DELAY,
            anniversary: ANNIVERSARY_DATE.to_string(),
            title: TITLE.to_string(),
            subtitle: SUBTITLE.to_string(),
        }
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_formation_duration(mut self, duration: Duration) -> Self {
        self.formation_duration = duration;
        self
    }

    pub fn with_final_scene_delay(mut self, delay: Duration) -> Self {
        self.final_scene_delay = delay;
        self
    }

    /// Reference instant as an RFC 3339 string. Parsed when the scene is built.
    pub fn with_anniversary(mut self, instant: impl Into<String>) -> Self {
        self.anniversary = instant.into();
        self
    }

    /// Time from `begin` until the text scene is shown.
    pub fn settle_after(&self) -> Duration {
        self.formation_duration + self.final_scene_delay
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.particle_count, 600);
        assert_eq!(config.palette.len(), 10);
        assert_eq!(config.anniversary, "2023-10-27T00:00:00Z");
        assert_eq!(config.settle_after(), Duration::from_millis(4000));
    }

    #[test]
    fn test_builders() {
        let config = SceneConfig::new()
            .with_particle_count(12)
            .with_formation_duration(Duration::from_millis(10))
            .with_final_scene_delay(Duration::from_millis(5))
            .with_anniversary("2020-01-01T00:00:00Z");
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.settle_after(), Duration::from_millis(15));
        assert_eq!(config.anniversary, "2020-01-01T00:00:00Z");
    }
}
