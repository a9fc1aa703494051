//! Animation phases of the greeting scene.

use std::fmt;

/// Where the scene is in its one-way animation.
///
/// Phases are ordered and only ever move forward:
/// `Idle` → `Forming` (user action) → `Settled` (elapsed time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AnimationPhase {
    /// Particles drift at their initial positions, waiting for the user.
    #[default]
    Idle,
    /// Particles travel toward their heart positions.
    Forming,
    /// The heart is formed and the text scene with the counter is shown.
    Settled,
}

impl AnimationPhase {
    /// Move to `next` if it lies strictly ahead of the current phase.
    ///
    /// Returns `true` if the phase changed.
    pub fn advance_to(&mut self, next: AnimationPhase) -> bool {
        if next > *self {
            *self = next;
            true
        } else {
            false
        }
    }

    /// Whether particles should sit at their heart positions.
    #[inline]
    pub fn shows_heart(self) -> bool {
        self >= AnimationPhase::Forming
    }

    /// Whether the elapsed-time counter should be running.
    #[inline]
    pub fn runs_timer(self) -> bool {
        self == AnimationPhase::Settled
    }
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnimationPhase::Idle => "idle",
            AnimationPhase::Forming => "forming",
            AnimationPhase::Settled => "settled",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ordering() {
        assert!(AnimationPhase::Idle < AnimationPhase::Forming);
        assert!(AnimationPhase::Forming < AnimationPhase::Settled);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut phase = AnimationPhase::default();
        assert!(phase.advance_to(AnimationPhase::Forming));
        assert!(!phase.advance_to(AnimationPhase::Forming));
        assert!(!phase.advance_to(AnimationPhase::Idle));
        assert_eq!(phase, AnimationPhase::Forming);

        assert!(phase.advance_to(AnimationPhase::Settled));
        assert!(!phase.advance_to(AnimationPhase::Forming));
        assert_eq!(phase, AnimationPhase::Settled);
    }

    #[test]
    fn test_can_skip_forward() {
        let mut phase = AnimationPhase::Idle;
        assert!(phase.advance_to(AnimationPhase::Settled));
    }

    #[test]
    fn test_phase_flags() {
        assert!(!AnimationPhase::Idle.shows_heart());
        assert!(AnimationPhase::Forming.shows_heart());
        assert!(!AnimationPhase::Forming.runs_timer());
        assert!(AnimationPhase::Settled.runs_timer());
    }
}
