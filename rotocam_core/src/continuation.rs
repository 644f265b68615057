//! Re-issues held movement after a rotation settles.
//!
//! Rotating mid-walk must be invisible: the user keeps holding the same keys
//! and the subject keeps stepping, now aligned to the new orientation, without
//! a release-and-repress. The loop samples the host's held directions at a
//! fixed cadence and stops on its own once the keys lift, the subject is
//! deselected, or the viewport goes away.

use std::cell::Cell;
use std::rc::Rc;

use crate::host::{MovementSource, SubjectQuery, ViewportQuery};
use crate::interceptor::MovementInterceptor;

/// Interval between loop re-samples.
pub const DEFAULT_CADENCE_MS: u64 = 110;

/// Cooperative cancellation handle for the continuation loop.
///
/// The loop terminates by itself through its liveness predicates; the token
/// exists so a host can force the stop on teardown instead of waiting for the
/// next sample to notice.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    cancelled: Rc<Cell<bool>>,
}

impl StopToken {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    fn reset(&self) {
        self.cancelled.set(false);
    }
}

/// Keeps movement flowing in the new orientation after a rotation settles.
///
/// At most one loop is active at a time; starting again while running is a
/// no-op. External state changes (released keys, deselected subject) are only
/// observed at the next cadence tick, never instantaneously.
pub struct ContinuationLoop {
    cadence_ms: u64,
    running: bool,
    next_due_ms: u64,
    stop: StopToken,
    source: Rc<dyn MovementSource>,
    subject: Rc<dyn SubjectQuery>,
    viewport: Rc<dyn ViewportQuery>,
    interceptor: MovementInterceptor,
}

impl ContinuationLoop {
    pub fn new(
        cadence_ms: u64,
        source: Rc<dyn MovementSource>,
        subject: Rc<dyn SubjectQuery>,
        viewport: Rc<dyn ViewportQuery>,
        interceptor: MovementInterceptor,
    ) -> Self {
        Self {
            cadence_ms,
            running: false,
            next_due_ms: 0,
            stop: StopToken::default(),
            source,
            subject,
            viewport,
            interceptor,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token observed at every tick; cancelling it stops the loop without
    /// waiting for a predicate to fail.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Issue one immediate step from the current held sample and orientation.
    /// Host failures are logged and swallowed; the cadence continues.
    pub fn nudge(&self) {
        if !self.viewport.is_ready() || !self.subject.has_controlled_subject() {
            return;
        }
        let held = self.source.held_vector();
        if held.is_zero() {
            return;
        }
        if let Err(err) = self
            .interceptor
            .move_by(f64::from(held.dx), f64::from(held.dy))
        {
            log::warn!("held-movement nudge failed: {err}");
        }
    }

    /// Begin the cadence loop; idempotent while already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.stop.reset();
        self.running = true;
        self.next_due_ms = now_ms + self.cadence_ms;
    }

    /// Stop regardless of predicates (teardown path).
    pub fn cancel(&mut self) {
        self.stop.cancel();
        self.running = false;
    }

    /// Advance the loop. Once a cadence interval has elapsed, re-sample the
    /// held directions and either issue another step or terminate.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        if self.stop.is_cancelled() {
            self.running = false;
            return;
        }
        if now_ms < self.next_due_ms {
            return;
        }
        self.next_due_ms = now_ms + self.cadence_ms;

        let held = self.source.held_vector();
        if !self.viewport.is_ready() || !self.subject.has_controlled_subject() || held.is_zero() {
            self.running = false;
            return;
        }
        if let Err(err) = self
            .interceptor
            .move_by(f64::from(held.dx), f64::from(held.dy))
        {
            log::warn!("held-movement step failed: {err}");
        }
    }
}
