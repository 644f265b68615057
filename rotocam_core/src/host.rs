//! Interfaces the embedding host implements for the engine.
//!
//! The engine never owns a scene graph, an input layer, or a movable subject;
//! it talks to all three through these traits. Rotation policy (permissions,
//! per-area locks) is deliberately absent: hosts consult their own policy
//! predicate before calling into the engine at all.

use thiserror::Error;

use crate::direction::GridVector;

/// Failures surfaced by the host while applying a movement step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MovementError {
    /// Nothing is currently accepting movement, e.g. the moved subject
    /// disappeared between sampling and issuing.
    #[error("movement target unavailable")]
    TargetUnavailable,
}

/// Reports the currently-held logical directions collapsed into one canonical
/// vector (opposing directions cancel).
pub trait MovementSource {
    fn held_vector(&self) -> GridVector;
}

/// Applies one movement request to whatever is being moved. `(0, 0)` must be
/// a safe no-op.
pub trait MovementIssuer {
    fn move_by(&self, dx: f64, dy: f64) -> Result<(), MovementError>;
}

/// Whether a movable subject is currently selected/controlled.
pub trait SubjectQuery {
    fn has_controlled_subject(&self) -> bool;
}

/// Whether the viewport can currently display rotation and accept movement.
pub trait ViewportQuery {
    fn is_ready(&self) -> bool;
}
