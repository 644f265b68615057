//! The rotation engine facade: gate, orientation, animator, and movement
//! plumbing wired together behind one host-facing surface.

use std::rc::Rc;

use crate::animator::{AnimatorTick, RotationAnimator, DEFAULT_TRANSITION_MS};
use crate::clock::Clock;
use crate::continuation::{ContinuationLoop, StopToken, DEFAULT_CADENCE_MS};
use crate::events::{RotationFrame, RotationObserver};
use crate::gate::{GateDecision, RotationGate, DEFAULT_DEBOUNCE_MS};
use crate::host::{MovementIssuer, MovementSource, SubjectQuery, ViewportQuery};
use crate::interceptor::MovementInterceptor;
use crate::orientation::{OrientationHandle, RotationError};

/// Engine tunables. Defaults mirror the shipped module: a 140 ms debounce, a
/// 110 ms held-movement cadence, and a 160 ms transition.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub debounce_ms: u64,
    pub cadence_ms: u64,
    pub transition_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            cadence_ms: DEFAULT_CADENCE_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

/// How a rotation request was resolved. Rejections are expected rate-limiting
/// outcomes, never faults; nothing surfaces to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    Accepted,
    /// Arrived inside the debounce window since the last accepted request.
    Debounced,
    /// The request's source key is still held from an earlier rotation.
    SourceHeld,
    /// The viewport cannot display a rotation right now; skipped, not queued.
    ViewportNotReady,
}

/// Host collaborators handed to the engine at construction. All are shared
/// single-threaded handles; the engine never takes ownership of host state.
#[derive(Clone)]
pub struct HostBindings {
    pub movement_source: Rc<dyn MovementSource>,
    pub movement_issuer: Rc<dyn MovementIssuer>,
    pub subject: Rc<dyn SubjectQuery>,
    pub viewport: Rc<dyn ViewportQuery>,
}

/// The 8-step rotating camera engine.
///
/// One instance per viewport, built by dependency injection; nothing here is
/// global. The host pumps [`RotatingCamera::tick`] from its frame loop; the
/// engine reads its clock once per pump and advances the animated transition
/// and the held-movement continuation in order.
pub struct RotatingCamera {
    config: EngineConfig,
    clock: Rc<dyn Clock>,
    orientation: OrientationHandle,
    gate: RotationGate,
    animator: RotationAnimator,
    interceptor: MovementInterceptor,
    continuation: ContinuationLoop,
    observers: Vec<Rc<dyn RotationObserver>>,
    movement_source: Rc<dyn MovementSource>,
    subject: Rc<dyn SubjectQuery>,
    viewport: Rc<dyn ViewportQuery>,
    had_movement_on_rotate: bool,
}

impl RotatingCamera {
    pub fn new(config: EngineConfig, clock: Rc<dyn Clock>, host: HostBindings) -> Self {
        let orientation = OrientationHandle::new();
        let interceptor = MovementInterceptor::new(
            orientation.clone(),
            host.viewport.clone(),
            host.movement_issuer.clone(),
        );
        let continuation = ContinuationLoop::new(
            config.cadence_ms,
            host.movement_source.clone(),
            host.subject.clone(),
            host.viewport.clone(),
            interceptor.clone(),
        );
        Self {
            config,
            clock,
            orientation,
            gate: RotationGate::new(config.debounce_ms),
            animator: RotationAnimator::new(),
            interceptor,
            continuation,
            observers: Vec::new(),
            movement_source: host.movement_source,
            subject: host.subject,
            viewport: host.viewport,
            had_movement_on_rotate: false,
        }
    }

    /// Current discrete step in `[0, 7]`.
    pub fn step(&self) -> u8 {
        self.orientation.step()
    }

    /// Accumulated signed angle in degrees; never wrapped.
    pub fn angle_deg(&self) -> f64 {
        self.orientation.angle_deg()
    }

    /// Angle currently shown, live during a transition.
    pub fn displayed_angle_deg(&self) -> f64 {
        self.animator.displayed_deg()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Shared read handle onto the orientation, for host-side consumers.
    pub fn orientation(&self) -> OrientationHandle {
        self.orientation.clone()
    }

    /// The decorator hosts place in their movement call path so every
    /// unit-step request is reoriented, regardless of call site.
    pub fn interceptor(&self) -> MovementInterceptor {
        self.interceptor.clone()
    }

    pub fn add_observer(&mut self, observer: Rc<dyn RotationObserver>) {
        self.observers.push(observer);
    }

    /// Cancellation handle for the held-movement loop (teardown path).
    pub fn continuation_stop_token(&self) -> StopToken {
        self.continuation.stop_token()
    }

    pub fn continuation_running(&self) -> bool {
        self.continuation.is_running()
    }

    /// Request one rotation of exactly plus or minus one step.
    ///
    /// `source` identifies a held input (a key) that stays guarded against
    /// repeats until [`RotatingCamera::release_guard`]. Policy predicates
    /// (permissions, per-area locks) are the caller's business and must be
    /// consulted before this call.
    pub fn rotate(
        &mut self,
        delta_steps: i32,
        source: Option<&str>,
    ) -> Result<RotationOutcome, RotationError> {
        self.rotate_with_duration(delta_steps, source, self.config.transition_ms)
    }

    /// Like [`RotatingCamera::rotate`] with an explicit transition duration.
    /// Zero settles synchronously, before this call returns.
    pub fn rotate_with_duration(
        &mut self,
        delta_steps: i32,
        source: Option<&str>,
        duration_ms: u64,
    ) -> Result<RotationOutcome, RotationError> {
        if delta_steps != 1 && delta_steps != -1 {
            return Err(RotationError::InvalidDelta(delta_steps));
        }
        let now = self.clock.now_ms();
        match self.gate.accept(now, source) {
            GateDecision::HeldSource => return Ok(RotationOutcome::SourceHeld),
            GateDecision::Debounced => return Ok(RotationOutcome::Debounced),
            GateDecision::Accepted => {}
        }
        if !self.viewport.is_ready() {
            return Ok(RotationOutcome::ViewportNotReady);
        }

        // Snapshot the held keys before the angle mutates; the post-settle
        // resume must not see a sample taken in the new orientation.
        self.had_movement_on_rotate = !self.movement_source.held_vector().is_zero();
        self.orientation.advance(delta_steps)?;
        self.animator
            .begin(self.orientation.angle_deg(), now, duration_ms);
        if duration_ms == 0 {
            self.pump_animator(now);
        }
        Ok(RotationOutcome::Accepted)
    }

    /// Release a rotation key hold. Must be called once per hold release or
    /// that source stays blocked forever.
    pub fn release_guard(&mut self, source: &str) {
        self.gate.release(source);
    }

    /// Reapply the current angle instantly, bypassing the gate. Hosts call
    /// this when the viewport (re)becomes ready so the display matches the
    /// logical orientation.
    pub fn sync_viewport(&mut self) {
        if !self.viewport.is_ready() {
            return;
        }
        let now = self.clock.now_ms();
        self.had_movement_on_rotate = !self.movement_source.held_vector().is_zero();
        self.animator.begin(self.orientation.angle_deg(), now, 0);
        self.pump_animator(now);
    }

    /// Cooperative pump. Advances the animated transition, then the
    /// held-movement loop; the host calls this once per frame or timer slice.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.pump_animator(now);
        self.continuation.tick(now);
    }

    /// Force-stop the held-movement loop (teardown path).
    pub fn cancel_continuation(&mut self) {
        self.continuation.cancel();
    }

    fn pump_animator(&mut self, now_ms: u64) {
        match self.animator.tick(now_ms) {
            AnimatorTick::Idle => {}
            AnimatorTick::Animating(angle_deg) => {
                let frame = RotationFrame {
                    angle_deg,
                    step: self.orientation.step(),
                };
                for observer in &self.observers {
                    observer.rotation_animating(frame);
                }
            }
            AnimatorTick::Settled(angle_deg) => {
                let frame = RotationFrame {
                    angle_deg,
                    step: self.orientation.step(),
                };
                for observer in &self.observers {
                    observer.rotation_settled(frame);
                }
                self.restore_held_movement(now_ms);
            }
        }
    }

    fn restore_held_movement(&mut self, now_ms: u64) {
        if !self.had_movement_on_rotate {
            return;
        }
        self.had_movement_on_rotate = false;
        if !self.viewport.is_ready() || !self.subject.has_controlled_subject() {
            return;
        }
        self.continuation.nudge();
        self.continuation.start(now_ms);
    }
}
