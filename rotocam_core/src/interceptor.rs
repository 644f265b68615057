//! Reorients unit-step movement requests before they reach the host.

use std::rc::Rc;

use crate::direction::{reorient, GridVector};
use crate::host::{MovementError, MovementIssuer, ViewportQuery};
use crate::orientation::OrientationHandle;

/// Decorator placed in front of the host's movement path at startup.
///
/// Requests expressed in the 8-direction scheme (finite, integral,
/// `|dx| <= 1` and `|dy| <= 1`) are reoriented with the current step before
/// being forwarded. Anything larger, fractional, or non-finite passes through
/// untouched so teleports and programmatic moves keep their meaning.
#[derive(Clone)]
pub struct MovementInterceptor {
    orientation: OrientationHandle,
    viewport: Rc<dyn ViewportQuery>,
    issuer: Rc<dyn MovementIssuer>,
}

impl MovementInterceptor {
    pub fn new(
        orientation: OrientationHandle,
        viewport: Rc<dyn ViewportQuery>,
        issuer: Rc<dyn MovementIssuer>,
    ) -> Self {
        Self {
            orientation,
            viewport,
            issuer,
        }
    }

    /// Forward a movement request, reorienting it when eligible. Failures
    /// raised by the underlying issuer propagate unchanged.
    pub fn move_by(&self, dx: f64, dy: f64) -> Result<(), MovementError> {
        if let Some(vector) = unit_step(dx, dy) {
            if self.viewport.is_ready() {
                // Read the step once so a single remap never mixes two
                // orientations.
                let step = self.orientation.step();
                let oriented = reorient(vector, step);
                return self
                    .issuer
                    .move_by(f64::from(oriented.dx), f64::from(oriented.dy));
            }
        }
        self.issuer.move_by(dx, dy)
    }
}

/// The grid vector for an eligible request, or `None` when the request lies
/// outside the 8-direction scheme.
fn unit_step(dx: f64, dy: f64) -> Option<GridVector> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.fract() != 0.0 || dy.fract() != 0.0 {
        return None;
    }
    if dx.abs() > 1.0 || dy.abs() > 1.0 {
        return None;
    }
    Some(GridVector::new(dx as i32, dy as i32))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct RecordingIssuer {
        moves: RefCell<Vec<(f64, f64)>>,
    }

    impl MovementIssuer for RecordingIssuer {
        fn move_by(&self, dx: f64, dy: f64) -> Result<(), MovementError> {
            self.moves.borrow_mut().push((dx, dy));
            Ok(())
        }
    }

    struct ReadyFlag(Cell<bool>);

    impl ViewportQuery for ReadyFlag {
        fn is_ready(&self) -> bool {
            self.0.get()
        }
    }

    fn fixture(step: u8, ready: bool) -> (MovementInterceptor, Rc<RecordingIssuer>) {
        let orientation = OrientationHandle::new();
        for _ in 0..step {
            orientation.advance(1).expect("advance");
        }
        let issuer = Rc::new(RecordingIssuer::default());
        let viewport = Rc::new(ReadyFlag(Cell::new(ready)));
        let interceptor = MovementInterceptor::new(orientation, viewport, issuer.clone());
        (interceptor, issuer)
    }

    #[test]
    fn unit_steps_are_reoriented_with_the_current_step() {
        let (interceptor, issuer) = fixture(2, true);
        interceptor.move_by(0.0, -1.0).expect("move");
        assert_eq!(issuer.moves.borrow().as_slice(), &[(-1.0, 0.0)]);
    }

    #[test]
    fn zero_passes_through_unchanged() {
        let (interceptor, issuer) = fixture(3, true);
        interceptor.move_by(0.0, 0.0).expect("move");
        assert_eq!(issuer.moves.borrow().as_slice(), &[(0.0, 0.0)]);
    }

    #[test]
    fn larger_vectors_are_not_reinterpreted() {
        let (interceptor, issuer) = fixture(2, true);
        interceptor.move_by(3.0, 0.0).expect("move");
        assert_eq!(issuer.moves.borrow().as_slice(), &[(3.0, 0.0)]);
    }

    #[test]
    fn fractional_vectors_are_not_reinterpreted() {
        let (interceptor, issuer) = fixture(2, true);
        interceptor.move_by(0.5, -0.5).expect("move");
        assert_eq!(issuer.moves.borrow().as_slice(), &[(0.5, -0.5)]);
    }

    #[test]
    fn non_finite_input_is_a_transparent_pass_through() {
        let (interceptor, issuer) = fixture(2, true);
        interceptor.move_by(f64::NAN, 1.0).expect("move");
        let moves = issuer.moves.borrow();
        assert_eq!(moves.len(), 1);
        assert!(moves[0].0.is_nan());
        assert_eq!(moves[0].1, 1.0);
    }

    #[test]
    fn not_ready_viewport_skips_reorientation() {
        let (interceptor, issuer) = fixture(2, false);
        interceptor.move_by(0.0, -1.0).expect("move");
        assert_eq!(issuer.moves.borrow().as_slice(), &[(0.0, -1.0)]);
    }

    #[test]
    fn step_zero_forwards_unchanged() {
        let (interceptor, issuer) = fixture(0, true);
        interceptor.move_by(1.0, -1.0).expect("move");
        assert_eq!(issuer.moves.borrow().as_slice(), &[(1.0, -1.0)]);
    }
}
