//! Observer notifications emitted while the camera angle changes.

use serde::Serialize;

/// Snapshot carried by every notification: enough for a listener (a compass
/// overlay, a minimap) to redraw without querying back into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationFrame {
    pub angle_deg: f64,
    pub step: u8,
}

/// Listener interface for rotation progress.
///
/// `rotation_animating` fires once per tick while a transition is in flight;
/// `rotation_settled` fires exactly once when the displayed angle pins to its
/// target. Any number of listeners may register.
pub trait RotationObserver {
    fn rotation_animating(&self, _frame: RotationFrame) {}
    fn rotation_settled(&self, _frame: RotationFrame) {}
}
