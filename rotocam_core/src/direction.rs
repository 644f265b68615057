//! The discrete 8-direction table and step-indexed vector remapping.
//!
//! Directions are listed clockwise starting at north. Grid coordinates follow
//! screen axes, so y grows downward and north is `(0, -1)`. Remapping is a
//! table rotation, never trigonometry, so a movement request resolves in O(1)
//! without floating-point drift.

use serde::Serialize;

/// Unit grid displacement expressed in screen axes (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GridVector {
    pub dx: i32,
    pub dy: i32,
}

impl GridVector {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Number of discrete camera orientations (45 degrees apart).
pub const STEP_COUNT: u8 = 8;

/// The eight canonical unit vectors, clockwise starting at north.
pub const DIRECTIONS: [GridVector; STEP_COUNT as usize] = [
    GridVector::new(0, -1),  // N
    GridVector::new(1, -1),  // NE
    GridVector::new(1, 0),   // E
    GridVector::new(1, 1),   // SE
    GridVector::new(0, 1),   // S
    GridVector::new(-1, 1),  // SW
    GridVector::new(-1, 0),  // W
    GridVector::new(-1, -1), // NW
];

/// Compass labels matching `DIRECTIONS` by index, for overlay consumers.
pub const COMPASS_POINTS: [&str; STEP_COUNT as usize] =
    ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Index of `vector` within [`DIRECTIONS`], or `None` when it is not one of
/// the eight canonical unit vectors.
pub fn direction_index(vector: GridVector) -> Option<usize> {
    DIRECTIONS.iter().position(|candidate| *candidate == vector)
}

/// Remap a canonical vector into the frame of a camera rotated clockwise by
/// `step` 45-degree increments.
///
/// The input rotates in the opposite angular sense from the camera so that a
/// request for "up" resolves to whatever direction was "up" before the camera
/// turned. Zero vectors, non-canonical vectors, and step 0 pass through
/// unchanged.
pub fn reorient(vector: GridVector, step: u8) -> GridVector {
    let step = usize::from(step % STEP_COUNT);
    if step == 0 || vector.is_zero() {
        return vector;
    }
    let base = match direction_index(vector) {
        Some(index) => index,
        None => return vector,
    };
    let count = usize::from(STEP_COUNT);
    DIRECTIONS[(base + count - step) % count]
}
