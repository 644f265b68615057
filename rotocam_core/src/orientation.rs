//! Camera orientation: the discrete step plus the accumulated display angle.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::direction::STEP_COUNT;

/// Degrees between adjacent steps.
pub const STEP_ANGLE_DEG: f64 = 45.0;

/// Raised when a rotation request carries a malformed increment. Coercing the
/// value instead would silently corrupt the step/angle invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("rotation delta must be +1 or -1, got {0}")]
    InvalidDelta(i32),
}

/// Logical camera orientation.
///
/// `step` is the canonical mod-8 projection used for all direction math.
/// `angle_deg` accumulates by exactly plus or minus 45 per rotation and never
/// wraps, so `step == round(angle_deg / 45) mod 8` holds whenever no
/// transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    step: u8,
    angle_deg: f64,
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationState {
    pub fn new() -> Self {
        Self {
            step: 0,
            angle_deg: 0.0,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Advance by exactly one clockwise (+1) or counter-clockwise (-1) step.
    pub fn advance(&mut self, delta_steps: i32) -> Result<(), RotationError> {
        if delta_steps != 1 && delta_steps != -1 {
            return Err(RotationError::InvalidDelta(delta_steps));
        }
        let count = i32::from(STEP_COUNT);
        self.step = ((i32::from(self.step) + delta_steps + count) % count) as u8;
        self.angle_deg += f64::from(delta_steps) * STEP_ANGLE_DEG;
        Ok(())
    }
}

/// Cheap cloneable handle sharing one orientation between the engine and the
/// movement interceptor. Only the engine advances it; every other holder just
/// reads the current step.
#[derive(Debug, Clone, Default)]
pub struct OrientationHandle {
    inner: Rc<RefCell<OrientationState>>,
}

impl OrientationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.inner.borrow().step()
    }

    pub fn angle_deg(&self) -> f64 {
        self.inner.borrow().angle_deg()
    }

    pub(crate) fn advance(&self, delta_steps: i32) -> Result<(), RotationError> {
        self.inner.borrow_mut().advance(delta_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_step_zero_angle_zero() {
        let state = OrientationState::new();
        assert_eq!(state.step(), 0);
        assert_eq!(state.angle_deg(), 0.0);
    }

    #[test]
    fn advance_rejects_malformed_deltas() {
        let mut state = OrientationState::new();
        assert_eq!(state.advance(0), Err(RotationError::InvalidDelta(0)));
        assert_eq!(state.advance(2), Err(RotationError::InvalidDelta(2)));
        assert_eq!(state.advance(-3), Err(RotationError::InvalidDelta(-3)));
        assert_eq!(state.step(), 0);
        assert_eq!(state.angle_deg(), 0.0);
    }

    #[test]
    fn angle_accumulates_while_step_wraps() {
        let mut state = OrientationState::new();
        for _ in 0..8 {
            state.advance(1).expect("advance");
        }
        assert_eq!(state.step(), 0);
        assert_eq!(state.angle_deg(), 360.0);
    }

    #[test]
    fn step_tracks_rounded_angle_mod_eight() {
        let mut state = OrientationState::new();
        let deltas = [1, 1, -1, 1, 1, 1, -1, -1, -1, -1, -1, -1];
        for delta in deltas {
            state.advance(delta).expect("advance");
            let projected = (state.angle_deg() / STEP_ANGLE_DEG).round() as i64;
            assert_eq!(i64::from(state.step()), projected.rem_euclid(8));
        }
    }

    #[test]
    fn handle_shares_one_state() {
        let handle = OrientationHandle::new();
        let reader = handle.clone();
        handle.advance(-1).expect("advance");
        assert_eq!(reader.step(), 7);
        assert_eq!(reader.angle_deg(), -45.0);
    }
}
