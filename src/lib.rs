//! # heartfield
//!
//! The computational core of an animated anniversary greeting: a field of
//! particles that coalesces into a heart, and a counter of the time elapsed
//! since a fixed date.
//!
//! Nothing here draws. A presentation layer takes the particle descriptors
//! and the counter text and renders them however it likes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use heartfield::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), HeartfieldError> {
//!     let mut scene = Scene::new(SceneConfig::default())?;
//!
//!     // On click:
//!     scene.begin(std::time::Instant::now());
//!
//!     // Every frame:
//!     for event in scene.update(std::time::Instant::now())? {
//!         // react to SceneEvent::GlowBurst / SceneEvent::Settled
//!     }
//!     for (id, pos) in scene.particle_positions() {
//!         // draw particle `id` at `pos` (percent of the display)
//!     }
//!     println!("{}", scene.timer_display());
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Heart layout
//!
//! [`HeartLayoutGenerator`] samples the parametric heart curve. 40% of the
//! particles are spaced evenly along the outline in a thin band; the rest
//! fill the interior with uniform area density. Positions are normalized
//! against the curve's bounding box and mapped into a display sub-region.
//! Pass your own RNG to [`HeartLayoutGenerator::generate_with_rng`] for
//! reproducible layouts.
//!
//! ### Elapsed-time counter
//!
//! [`ElapsedDurationTimer`] parses the reference instant once and, while
//! running, emits a [`DurationReading`] immediately and then once per
//! second, formatted as `D days HH:MM:SS`. Stopping is immediate and
//! idempotent.
//!
//! ### Phases
//!
//! [`AnimationPhase`] only moves forward: `Idle` → `Forming` → `Settled`.
//! [`Scene`] ties the pieces together on the scene's fixed timeline.

pub mod config;
pub mod error;
pub mod heart;
pub mod layout;
mod particle;
pub mod phase;
pub mod scene;
mod spawn;
pub mod time;
pub mod timer;
pub mod visuals;

pub use config::SceneConfig;
pub use error::{HeartfieldError, TimerError};
pub use glam::Vec2;
pub use heart::{heart_point, HeartBounds};
pub use layout::{generate, HeartLayoutGenerator, TargetRegion};
pub use particle::{ParticleDescriptor, ParticleRole};
pub use phase::AnimationPhase;
pub use scene::{Scene, SceneEvent};
pub use spawn::SpawnContext;
pub use time::{format_time, Clock, DurationReading, ManualClock, SystemClock};
pub use timer::{start, ElapsedDurationTimer, TimerSubscription};
pub use visuals::{ColorToken, Palette};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use heartfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SceneConfig;
    pub use crate::error::{HeartfieldError, TimerError};
    pub use crate::layout::{HeartLayoutGenerator, TargetRegion};
    pub use crate::particle::{ParticleDescriptor, ParticleRole};
    pub use crate::phase::AnimationPhase;
    pub use crate::scene::{Scene, SceneEvent};
    pub use crate::time::{format_time, Clock, DurationReading, SystemClock};
    pub use crate::timer::{ElapsedDurationTimer, TimerSubscription};
    pub use crate::visuals::{ColorToken, Palette};
    pub use crate::Vec2;
}
