//! Helpers for re-expressing poses relative to a shared anchor.
//!
//! Every pose exchanged between devices is relative to the shared anchor:
//! the host computes `inverse(anchor) × object`, the guest recovers a world
//! pose with `anchor' × relative` using its own view of the same anchor.

use glam::{Mat4, Vec3};

const SINGULAR_EPSILON: f32 = 1.0e-8;

/// Inverse of `matrix`, or `None` when it is singular (e.g. a lost anchor
/// reporting a zero scale).
pub fn try_inverse(matrix: &Mat4) -> Option<Mat4> {
    let determinant = matrix.determinant();
    if !determinant.is_finite() || determinant.abs() < SINGULAR_EPSILON {
        return None;
    }
    Some(matrix.inverse())
}

/// `inverse(anchor) × object`
pub fn relative_pose(anchor: &Mat4, object: &Mat4) -> Option<Mat4> {
    try_inverse(anchor).map(|inverse| inverse * *object)
}

/// `anchor × relative`
pub fn rebase(anchor: &Mat4, relative: &Mat4) -> Mat4 {
    *anchor * *relative
}

/// Translation part of a model matrix
pub fn position(matrix: &Mat4) -> Vec3 {
    matrix.w_axis.truncate()
}

/// World-space forward (+Z) direction of a model matrix, normalized
pub fn forward(matrix: &Mat4) -> Vec3 {
    matrix.transform_vector3(Vec3::Z).normalize_or_zero()
}

/// Anchor inverse computed once and reused for a whole batch of objects.
pub struct AnchorSpace {
    inverse: Mat4,
}

impl AnchorSpace {
    pub fn new(anchor: &Mat4) -> Option<Self> {
        try_inverse(anchor).map(|inverse| Self { inverse })
    }

    pub fn relative(&self, object: &Mat4) -> Mat4 {
        self.inverse * *object
    }
}
