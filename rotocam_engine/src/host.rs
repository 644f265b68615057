//! Scripted collaborators standing in for a real host during demos and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rotocam_core::{
    GridVector, MovementError, MovementIssuer, MovementSource, SubjectQuery, ViewportQuery,
};

/// Held-direction state the demo script mutates between frames.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    held: Cell<GridVector>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&self, vector: GridVector) {
        self.held.set(vector);
    }

    pub fn release(&self) {
        self.held.set(GridVector::ZERO);
    }
}

impl MovementSource for ScriptedInput {
    fn held_vector(&self) -> GridVector {
        self.held.get()
    }
}

/// Selection stub: whether a movable subject is currently controlled.
#[derive(Debug)]
pub struct ScriptedSelection {
    controlled: Cell<bool>,
}

impl ScriptedSelection {
    pub fn new(controlled: bool) -> Self {
        Self {
            controlled: Cell::new(controlled),
        }
    }

    #[allow(dead_code)]
    pub fn set_controlled(&self, controlled: bool) {
        self.controlled.set(controlled);
    }
}

impl SubjectQuery for ScriptedSelection {
    fn has_controlled_subject(&self) -> bool {
        self.controlled.get()
    }
}

/// Viewport stub with a scriptable readiness flag.
#[derive(Debug)]
pub struct ScriptedViewport {
    ready: Cell<bool>,
}

impl ScriptedViewport {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: Cell::new(ready),
        }
    }

    #[allow(dead_code)]
    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }
}

impl ViewportQuery for ScriptedViewport {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }
}

/// Records every movement request the engine forwards to the host, tagged
/// with the simulated frame that issued it.
#[derive(Debug)]
pub struct RecordingIssuer {
    frame: Rc<Cell<u32>>,
    moves: RefCell<Vec<(u32, f64, f64)>>,
}

impl RecordingIssuer {
    pub fn new(frame: Rc<Cell<u32>>) -> Self {
        Self {
            frame,
            moves: RefCell::new(Vec::new()),
        }
    }

    pub fn moves(&self) -> Vec<(u32, f64, f64)> {
        self.moves.borrow().clone()
    }
}

impl MovementIssuer for RecordingIssuer {
    fn move_by(&self, dx: f64, dy: f64) -> Result<(), MovementError> {
        self.moves.borrow_mut().push((self.frame.get(), dx, dy));
        Ok(())
    }
}
