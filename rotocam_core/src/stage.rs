//! Screen-to-world mapping for a rotated stage.
//!
//! After a rotation settles, hosts typically want the world point sitting
//! under the screen centre, to re-anchor panning or feed overlays. The stage's
//! world transform is the usual 2x3 affine a scene graph exposes; mapping back
//! to world space is a manual inverse, refused when the determinant collapses.

/// Affine stage transform: screen = `[a c tx; b d ty] * world`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

/// Determinants below this are treated as non-invertible.
const DET_EPSILON: f64 = 1e-8;

impl StageTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Rotation about the world origin by `angle_deg` (clockwise in screen
    /// axes, where y grows downward), translated by `(tx, ty)`.
    pub fn from_rotation_deg(angle_deg: f64, tx: f64, ty: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx,
            ty,
        }
    }

    /// Map a screen-space point back into world space, or `None` when the
    /// transform is degenerate.
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Option<(f64, f64)> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < DET_EPSILON {
            return None;
        }
        let dx = sx - self.tx;
        let dy = sy - self.ty;
        let wx = (self.d * dx - self.c * dy) / det;
        let wy = (-self.b * dx + self.a * dy) / det;
        Some((wx, wy))
    }

    /// World point under the centre of a `width` by `height` screen.
    pub fn center_world(&self, width: f64, height: f64) -> Option<(f64, f64)> {
        self.screen_to_world(width / 2.0, height / 2.0)
    }
}
