//! Particle descriptors produced by the layout generator.

use crate::phase::AnimationPhase;
use crate::visuals::ColorToken;
use glam::Vec2;

/// Which sampling strategy placed a particle on the heart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleRole {
    /// Evenly spaced around the curve in a thin band.
    Outline,
    /// Scattered through the interior with uniform area density.
    Fill,
}

/// Everything the presentation layer needs to draw and animate one particle.
///
/// Positions are percentages of the display, `[0, 100]` on both axes.
/// Descriptors are created once per scene and never modified; the phase
/// decides which position is active.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleDescriptor {
    /// Unique within one generation run, `0..count`.
    pub id: u32,
    /// Resting position before the heart forms.
    pub initial_position: Vec2,
    /// Position on the heart once formed.
    pub target_position: Vec2,
    /// Pixel radius-equivalent.
    pub size: f32,
    /// Palette slot.
    pub color: ColorToken,
    /// Seconds to wait before this particle starts moving.
    pub reveal_delay: f32,
    pub role: ParticleRole,
    /// Heart-curve parameter the target was sampled at (radians).
    pub curve_t: f32,
    /// Factor applied to the curve point, 1.0 being on the curve itself.
    pub curve_scale: f32,
}

impl ParticleDescriptor {
    /// Active position for the given phase.
    #[inline]
    pub fn position_for(&self, phase: AnimationPhase) -> Vec2 {
        if phase.shows_heart() {
            self.target_position
        } else {
            self.initial_position
        }
    }

    #[inline]
    pub fn is_outline(&self) -> bool {
        self.role == ParticleRole::Outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ParticleDescriptor {
        ParticleDescriptor {
            id: 0,
            initial_position: Vec2::new(10.0, 90.0),
            target_position: Vec2::new(50.0, 50.0),
            size: 2.5,
            color: ColorToken(1),
            reveal_delay: 0.3,
            role: ParticleRole::Fill,
            curve_t: 1.0,
            curve_scale: 0.5,
        }
    }

    #[test]
    fn test_position_for_phase() {
        let p = descriptor();
        assert_eq!(p.position_for(AnimationPhase::Idle), Vec2::new(10.0, 90.0));
        assert_eq!(p.position_for(AnimationPhase::Forming), Vec2::new(50.0, 50.0));
        assert_eq!(p.position_for(AnimationPhase::Settled), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_is_outline() {
        let mut p = descriptor();
        assert!(!p.is_outline());
        p.role = ParticleRole::Outline;
        assert!(p.is_outline());
    }
}
