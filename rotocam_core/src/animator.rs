//! Timed interpolation of the displayed camera angle.

/// Default duration of one animated rotation.
pub const DEFAULT_TRANSITION_MS: u64 = 160;

/// One in-flight rotation, interpolating the displayed angle from
/// `start_deg` to `end_deg` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransition {
    pub start_deg: f64,
    pub end_deg: f64,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

/// What one tick observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorTick {
    /// No transition in flight.
    Idle,
    /// Still interpolating; carries the live displayed angle.
    Animating(f64),
    /// The transition completed this tick and the displayed angle was pinned
    /// exactly to its target.
    Settled(f64),
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Drives at most one transition at a time and owns the displayed angle.
///
/// The animator never touches the logical orientation; it only moves what the
/// viewer sees between two already-committed angles.
#[derive(Debug, Default)]
pub struct RotationAnimator {
    transition: Option<RotationTransition>,
    displayed_deg: f64,
}

impl RotationAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Angle currently shown; live while a transition is in flight.
    pub fn displayed_deg(&self) -> f64 {
        self.displayed_deg
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Begin a transition toward `end_deg` from the live displayed angle.
    /// A transition already in flight is superseded; its remaining ticks never
    /// run, and the displayed angle stays continuous.
    pub fn begin(&mut self, end_deg: f64, now_ms: u64, duration_ms: u64) {
        self.transition = Some(RotationTransition {
            start_deg: self.displayed_deg,
            end_deg,
            started_at_ms: now_ms,
            duration_ms,
        });
    }

    /// Advance the displayed angle with an ease-out cubic curve. The caller
    /// emits notifications matching the returned outcome.
    pub fn tick(&mut self, now_ms: u64) -> AnimatorTick {
        let transition = match self.transition {
            Some(transition) => transition,
            None => return AnimatorTick::Idle,
        };
        let t = if transition.duration_ms == 0 {
            1.0
        } else {
            let elapsed = now_ms.saturating_sub(transition.started_at_ms) as f64;
            (elapsed / transition.duration_ms as f64).min(1.0)
        };
        if t >= 1.0 {
            self.displayed_deg = transition.end_deg;
            self.transition = None;
            return AnimatorTick::Settled(transition.end_deg);
        }
        self.displayed_deg =
            transition.start_deg + (transition.end_deg - transition.start_deg) * ease_out_cubic(t);
        AnimatorTick::Animating(self.displayed_deg)
    }
}
