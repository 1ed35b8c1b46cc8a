mod gesture;
mod vector;
mod quaternion;
mod matrix;
pub mod error;
pub mod controller;
pub mod config;
pub mod delta;

pub use crate::vector::Vec3;
pub use crate::quaternion::Quaternion;
pub use crate::matrix::Mat4x4;
pub use crate::controller::{RotationController, Gesture};

use crate::controller::{DRAG_SLOWING, FLING_REDUCTION, FLING_DAMPING, FLING_EPSILON};

/// Describes the feel of a rotation controller. The defaults reproduce
/// the classic finger-drag tuning.
#[derive(Clone, Copy, Debug)]
pub struct RotationControllerDescriptor {
    /// Screen-space drag distance that maps to one radian.
    pub drag_slowing: f64,
    /// Divisor turning fling velocity in px/s into angular speed.
    pub fling_reduction: f64,
    /// Per-frame multiplier applied to the fling speed.
    pub fling_damping: f64,
    /// Fling speed below which the spin stops outright.
    pub fling_epsilon: f64,
}
impl Default for RotationControllerDescriptor {
    fn default() -> Self {
        Self {
            drag_slowing:    DRAG_SLOWING,
            fling_reduction: FLING_REDUCTION,
            fling_damping:   FLING_DAMPING,
            fling_epsilon:   FLING_EPSILON,
        }
    }
}
