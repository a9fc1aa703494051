//! Scene orchestration.
//!
//! A [`Scene`] owns the particle layout, the animation phase and the
//! elapsed-time counter, and moves them along a fixed timeline:
//!
//! | At | Event |
//! |----|-------|
//! | `begin()` | Idle → Forming, particles head for the heart |
//! | + formation duration | glow burst behind the heart |
//! | + final scene delay | Forming → Settled, counter starts |
//!
//! The scene renders nothing. Call [`Scene::update`] from whatever loop drives
//! the display and draw from the accessors.

use crate::config::SceneConfig;
use crate::error::HeartfieldError;
use crate::layout::HeartLayoutGenerator;
use crate::particle::ParticleDescriptor;
use crate::phase::AnimationPhase;
use crate::time::{Clock, SystemClock};
use crate::timer::ElapsedDurationTimer;
use crate::visuals::Palette;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;

/// Something the presentation layer should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// The heart has formed; show the glow burst.
    GlowBurst,
    /// The text scene is shown and the counter is running.
    Settled,
}

/// The greeting scene.
pub struct Scene {
    config: SceneConfig,
    particles: Vec<ParticleDescriptor>,
    phase: AnimationPhase,
    begun_at: Option<Instant>,
    glow_visible: bool,
    torn_down: bool,
    timer: ElapsedDurationTimer,
}

impl Scene {
    /// Build a scene with a fresh random layout and the system clock.
    ///
    /// Fails if the configured anniversary is not a valid timestamp.
    pub fn new(config: SceneConfig) -> Result<Self, HeartfieldError> {
        let mut rng = SmallRng::from_entropy();
        Self::with_sources(config, &mut rng, Arc::new(SystemClock))
    }

    /// Build a scene from an explicit random source and clock.
    pub fn with_sources<R: Rng>(
        config: SceneConfig,
        rng: &mut R,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, HeartfieldError> {
        let timer = ElapsedDurationTimer::new(&config.anniversary)?.with_clock(clock);
        let particles = HeartLayoutGenerator::new().generate_with_rng(
            config.particle_count,
            config.palette.len() as u32,
            rng,
        );

        log::info!(
            "Scene ready: {} particles, counting from {}",
            particles.len(),
            timer.reference()
        );

        Ok(Self {
            config,
            particles,
            phase: AnimationPhase::Idle,
            begun_at: None,
            glow_visible: false,
            torn_down: false,
            timer,
        })
    }

    /// Start forming the heart.
    ///
    /// Only takes effect while idle, once particles exist, and before
    /// teardown. Returns `true` if the scene began.
    pub fn begin(&mut self, now: Instant) -> bool {
        if self.torn_down || self.phase != AnimationPhase::Idle || self.particles.is_empty() {
            return false;
        }
        self.phase.advance_to(AnimationPhase::Forming);
        self.begun_at = Some(now);
        log::info!("Scene phase: {}", self.phase);
        true
    }

    /// Advance the timeline to `now`.
    ///
    /// Returns the events that fired during this call, in order. Starting
    /// the counter needs a Tokio runtime once the scene settles; if that
    /// fails, nothing is committed and the same step fires on the next call.
    /// After [`teardown`](Self::teardown) this does nothing.
    pub fn update(&mut self, now: Instant) -> Result<Vec<SceneEvent>, HeartfieldError> {
        let mut events = Vec::new();
        if self.torn_down {
            return Ok(events);
        }
        let Some(begun_at) = self.begun_at else {
            return Ok(events);
        };
        let elapsed = now.saturating_duration_since(begun_at);

        let glow_due = !self.glow_visible && elapsed >= self.config.formation_duration;
        let settle_due =
            self.phase < AnimationPhase::Settled && elapsed >= self.config.settle_after();

        if settle_due {
            self.timer.set_running(true)?;
        }

        if glow_due {
            self.glow_visible = true;
            log::debug!("Glow burst after {:?}", elapsed);
            events.push(SceneEvent::GlowBurst);
        }

        if settle_due && self.phase.advance_to(AnimationPhase::Settled) {
            log::info!("Scene phase: {}", self.phase);
            events.push(SceneEvent::Settled);
        }

        self.timer.poll();

        Ok(events)
    }

    /// When the next timeline event is due, if any remain.
    pub fn next_deadline(&self) -> Option<Instant> {
        let begun_at = self.begun_at?;
        if !self.glow_visible {
            Some(begun_at + self.config.formation_duration)
        } else if self.phase < AnimationPhase::Settled {
            Some(begun_at + self.config.settle_after())
        } else {
            None
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn particles(&self) -> &[ParticleDescriptor] {
        &self.particles
    }

    /// Active position of every particle for the current phase.
    pub fn particle_positions(&self) -> impl Iterator<Item = (u32, Vec2)> + '_ {
        let phase = self.phase;
        self.particles.iter().map(move |p| (p.id, p.position_for(phase)))
    }

    pub fn glow_visible(&self) -> bool {
        self.glow_visible
    }

    pub fn palette(&self) -> Palette {
        self.config.palette
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn subtitle(&self) -> &str {
        &self.config.subtitle
    }

    /// Counter text, `"0 days 00:00:00"` until the scene settles.
    pub fn timer_display(&self) -> String {
        self.timer.display()
    }

    /// The counter, for awaiting its next reading.
    pub fn timer_mut(&mut self) -> &mut ElapsedDurationTimer {
        &mut self.timer
    }

    /// Stop the counter for good. Later updates are ignored. Safe to call
    /// more than once.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.timer.stop();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.teardown();
    }
}
