use winit::event::*;

use log::debug;

use crate::vector::Vec3;
use crate::quaternion::Quaternion;
use crate::gesture::FlingDetector;
use crate::error::{DragspinError, DragspinResult};
use crate::RotationControllerDescriptor;

/// Screen-space drag distance that maps to one radian of rotation.
pub const DRAG_SLOWING: f64 = 90.0;

/// Divisor turning fling velocity in px/s into angular speed.
pub const FLING_REDUCTION: f64 = 5000.0;

/// Per-frame multiplier applied to the fling speed.
pub const FLING_DAMPING: f64 = 0.95;

/// Fling speed below which the spin stops outright.
pub const FLING_EPSILON: f64 = 1e-4;

/// What the pointer is currently doing. At most one gesture drives the
/// rotation at a time; a drag always wins over a fling.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Gesture {
    Idle,
    Dragging {
        start_x: f64,
        start_y: f64,
        end_x:   f64,
        end_y:   f64,
    },
    Flinging {
        axis:  Vec3,
        speed: f64,
    },
}

/// Converts dragging in the screen plane into a rotation value, which
/// lets you turn an object naturally with a finger or cursor. Assumes a
/// camera looking down z, so drags map to axes in the x-y plane.
///
/// Feed it press/move/release samples (or winit events through
/// [`RotationController::process_event`]), call
/// [`RotationController::advance`] once per rendered frame, and read
/// [`RotationController::rotation`] whenever an orientation is needed.
pub struct RotationController {
    rotation: Quaternion,
    gesture:  Gesture,
    detector: FlingDetector,
    cursor:   (f64, f64),

    drag_slowing:    f64,
    fling_reduction: f64,
    fling_damping:   f64,
    fling_epsilon:   f64,
}
impl RotationController {
    pub fn new(desc: &RotationControllerDescriptor) -> DragspinResult<Self> {
        if !(desc.fling_damping > 0.0 && desc.fling_damping < 1.0) {
            return Err(DragspinError::InvalidDamping(desc.fling_damping.to_string()));
        }
        if !(desc.drag_slowing > 0.0 && desc.drag_slowing.is_finite()) {
            return Err(DragspinError::InvalidDragSlowing(desc.drag_slowing.to_string()));
        }
        if !(desc.fling_reduction > 0.0 && desc.fling_reduction.is_finite()) {
            return Err(DragspinError::InvalidFlingReduction(desc.fling_reduction.to_string()));
        }
        if !(desc.fling_epsilon >= 0.0 && desc.fling_epsilon.is_finite()) {
            return Err(DragspinError::InvalidFlingEpsilon(desc.fling_epsilon.to_string()));
        }
        Ok(
            Self {
                rotation: Quaternion::identity(),
                gesture:  Gesture::Idle,
                detector: FlingDetector::new(),
                cursor:   (0.0, 0.0),

                drag_slowing:    desc.drag_slowing,
                fling_reduction: desc.fling_reduction,
                fling_damping:   desc.fling_damping,
                fling_epsilon:   desc.fling_epsilon,
            }
        )
    }

    /// Pointer down. Cancels any running fling.
    pub fn on_press(&mut self, x: f64, y: f64) {
        debug!("press at ({x}, {y})");
        self.gesture = Gesture::Dragging {
            start_x: x,
            start_y: y,
            end_x:   x,
            end_y:   y,
        };
    }

    /// Pointer move. Ignored unless a press is open.
    pub fn on_move(&mut self, x: f64, y: f64) {
        if let Gesture::Dragging { end_x, end_y, .. } = &mut self.gesture {
            *end_x = x;
            *end_y = y;
        }
    }

    /// Pointer up. Commits the open drag into the base rotation.
    pub fn on_release(&mut self) {
        if let Gesture::Dragging { start_x, start_y, end_x, end_y } = self.gesture {
            let dx = end_x - start_x;
            let dy = end_y - start_y;
            if let Some(delta) = drag_turn(dx, dy, self.drag_slowing) {
                self.rotation *= delta;
            }
            debug!("release, drag delta ({dx}, {dy})");
            self.gesture = Gesture::Idle;
        }
    }

    /// Start a free spin from a fling velocity in px/s. A fling only
    /// takes effect between gestures: call this after [`on_release`],
    /// never before it — a fling arriving while a drag is still open is
    /// dropped, since the drag owns the rotation until it commits. Zero
    /// velocity is also ignored, it has no spin axis.
    ///
    /// [`on_release`]: RotationController::on_release
    pub fn on_fling(&mut self, velocity_x: f64, velocity_y: f64) {
        if let Gesture::Dragging { .. } = self.gesture {
            return;
        }
        let mut axis = Vec3::new(-velocity_y, -velocity_x, 0.0);
        let mag = axis.magnitude();
        if mag == 0.0 {
            return;
        }
        axis.normalize();

        let speed = mag / self.fling_reduction;
        debug!("fling, axis ({}, {}, {}), speed {speed}", axis.x, axis.y, axis.z);
        self.gesture = Gesture::Flinging { axis, speed };
    }

    /// Step the fling animation. Call exactly once per rendered frame;
    /// drags are unaffected, so calling while one is open does nothing.
    pub fn advance(&mut self) {
        if let Gesture::Flinging { axis, speed } = self.gesture {
            let speed = speed * self.fling_damping;
            if speed < self.fling_epsilon {
                debug!("fling decayed to rest");
                self.gesture = Gesture::Idle;
            }
            else {
                self.rotation *= Quaternion::from_axis_angle(axis, speed);
                self.gesture = Gesture::Flinging { axis, speed };
            }
        }
    }

    /// The current orientation: the committed base rotation composed
    /// with the live drag delta, if any. Pure; does not step the fling.
    pub fn rotation(&self) -> Quaternion {
        if let Gesture::Dragging { start_x, start_y, end_x, end_y } = self.gesture {
            let dx = end_x - start_x;
            let dy = end_y - start_y;
            if let Some(delta) = drag_turn(dx, dy, self.drag_slowing) {
                return self.rotation * delta;
            }
        }
        self.rotation
    }

    /// Step the fling and return the orientation in one call, shaped
    /// for a caller that queries exactly once per frame.
    pub fn current_rotation(&mut self) -> Quaternion {
        self.advance();
        self.rotation()
    }

    /// Step the fling and write the orientation into `out` as a
    /// column-major rotation matrix with identity translation.
    pub fn to_matrix(&mut self, out: &mut [f32; 16]) {
        self.current_rotation().to_matrix(out);
    }

    /// The committed orientation, excluding any live drag delta.
    pub fn base_rotation(&self) -> Quaternion {
        self.rotation
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Map winit mouse events onto the controller, recognizing flings
    /// from the release velocity. Returns true if the event was
    /// consumed.
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                if let Gesture::Dragging { .. } = self.gesture {
                    self.detector.record(position.x, position.y);
                    self.on_move(position.x, position.y);
                    true
                }
                else {
                    false
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                match state {
                    ElementState::Pressed => {
                        self.detector.begin(self.cursor.0, self.cursor.1);
                        self.on_press(self.cursor.0, self.cursor.1);
                    }
                    ElementState::Released => {
                        let fling = self.detector.finish();
                        self.on_release();
                        if let Some((vx, vy)) = fling {
                            self.on_fling(vx, vy);
                        }
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self {
            rotation: Quaternion::identity(),
            gesture:  Gesture::Idle,
            detector: FlingDetector::new(),
            cursor:   (0.0, 0.0),

            drag_slowing:    DRAG_SLOWING,
            fling_reduction: FLING_REDUCTION,
            fling_damping:   FLING_DAMPING,
            fling_epsilon:   FLING_EPSILON,
        }
    }
}

/// The rotation implied by a screen-space drag of `(dx, dy)`: the axis
/// lies in the screen plane perpendicular to the motion, and the angle
/// is the drag distance over `slowing`. None for a motionless drag,
/// which has no axis to rotate about.
fn drag_turn(dx: f64, dy: f64, slowing: f64) -> Option<Quaternion> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let mut axis = Vec3::new(-dy, -dx, 0.0);
    let mag = axis.magnitude();
    axis.normalize();
    Some(Quaternion::from_axis_angle(axis, mag / slowing))
}


#[cfg(test)]
fn approx_eq(a: Quaternion, b: Quaternion) -> bool {
    (a.x - b.x).abs() < 1e-9
    && (a.y - b.y).abs() < 1e-9
    && (a.z - b.z).abs() < 1e-9
    && (a.w - b.w).abs() < 1e-9
}

#[test]
fn starts_idle_at_identity() {
    let ctl = RotationController::default();
    assert!(ctl.gesture() == Gesture::Idle);
    assert!(ctl.rotation() == Quaternion::identity());
}

#[test]
fn drag_commits_on_release() {
    let mut ctl = RotationController::default();
    ctl.on_press(0.0, 0.0);
    ctl.on_move(90.0, 0.0);
    ctl.on_release();

    // dx = 90, dy = 0: one radian about (0, -1, 0).
    let expected = Quaternion::from_axis_angle(Vec3::new(0.0, -1.0, 0.0), 1.0);
    assert!(approx_eq(ctl.base_rotation(), expected));
    assert!(ctl.gesture() == Gesture::Idle);
}

#[test]
fn motionless_release_commits_nothing() {
    let mut ctl = RotationController::default();
    ctl.on_press(40.0, 40.0);
    ctl.on_release();

    assert!(ctl.base_rotation() == Quaternion::identity());
    assert!(ctl.gesture() == Gesture::Idle);
}

#[test]
fn query_during_drag_does_not_commit() {
    let mut ctl = RotationController::default();
    ctl.on_press(0.0, 0.0);
    ctl.on_move(50.0, 10.0);

    let base = ctl.base_rotation();
    let live = ctl.rotation();
    for _ in 0..5 {
        ctl.advance();
        assert!(ctl.rotation() == live);
    }
    assert!(ctl.base_rotation() == base);
    assert!(!approx_eq(live, base));
}

#[test]
fn live_drag_matches_committed_delta() {
    let mut ctl = RotationController::default();
    ctl.on_press(10.0, 20.0);
    ctl.on_move(100.0, 20.0);

    let live = ctl.rotation();
    ctl.on_release();
    assert!(approx_eq(live, ctl.base_rotation()));
}

#[test]
fn move_without_press_is_ignored() {
    let mut ctl = RotationController::default();
    ctl.on_move(300.0, 300.0);

    assert!(ctl.gesture() == Gesture::Idle);
    assert!(ctl.rotation() == Quaternion::identity());
}

#[test]
fn fling_initializes_axis_and_speed() {
    let mut ctl = RotationController::default();
    ctl.on_fling(0.0, -5000.0);

    match ctl.gesture() {
        Gesture::Flinging { axis, speed } => {
            assert!(axis == Vec3::new(1.0, 0.0, 0.0));
            assert!(speed == 1.0);
        }
        other => panic!("expected a fling, got {other:?}"),
    }
}

#[test]
fn fling_decays_geometrically() {
    let mut ctl = RotationController::default();
    ctl.on_fling(0.0, -5000.0);

    let base = ctl.base_rotation();
    for _ in 0..10 {
        ctl.advance();
    }
    match ctl.gesture() {
        Gesture::Flinging { speed, .. } => {
            assert!((speed - 0.95f64.powi(10)).abs() < 1e-12);
        }
        other => panic!("expected a fling, got {other:?}"),
    }
    // Every step also turned the base rotation a little.
    assert!(!approx_eq(ctl.base_rotation(), base));
}

#[test]
fn fling_clamps_to_idle() {
    let mut ctl = RotationController::default();
    ctl.on_fling(0.0, -5000.0);

    // 0.95^n drops below 1e-4 within 200 frames.
    for _ in 0..200 {
        ctl.advance();
    }
    assert!(ctl.gesture() == Gesture::Idle);

    let settled = ctl.base_rotation();
    ctl.advance();
    assert!(ctl.base_rotation() == settled);
}

#[test]
fn press_cancels_fling() {
    let mut ctl = RotationController::default();
    ctl.on_fling(2000.0, 3000.0);
    ctl.on_press(5.0, 5.0);

    assert!(matches!(ctl.gesture(), Gesture::Dragging { .. }));
    ctl.advance();
    assert!(ctl.base_rotation() == Quaternion::identity());
}

#[test]
fn fling_during_drag_is_ignored() {
    let mut ctl = RotationController::default();
    ctl.on_press(0.0, 0.0);
    ctl.on_fling(0.0, -5000.0);

    assert!(matches!(ctl.gesture(), Gesture::Dragging { .. }));
}

#[test]
fn zero_velocity_fling_is_ignored() {
    let mut ctl = RotationController::default();
    ctl.on_fling(0.0, 0.0);

    assert!(ctl.gesture() == Gesture::Idle);
    assert!(ctl.rotation() == Quaternion::identity());
}

#[test]
fn current_rotation_advances_once() {
    let mut ctl = RotationController::default();
    ctl.on_fling(0.0, -5000.0);
    ctl.current_rotation();

    match ctl.gesture() {
        Gesture::Flinging { speed, .. } => assert!(speed == 0.95),
        other => panic!("expected a fling, got {other:?}"),
    }
}

#[test]
fn successive_drags_accumulate() {
    let mut ctl = RotationController::default();
    ctl.on_press(0.0, 0.0);
    ctl.on_move(45.0, 0.0);
    ctl.on_release();
    ctl.on_press(0.0, 0.0);
    ctl.on_move(45.0, 0.0);
    ctl.on_release();

    // Two half-radian turns about the same axis equal one full radian.
    let expected = Quaternion::from_axis_angle(Vec3::new(0.0, -1.0, 0.0), 1.0);
    assert!(approx_eq(ctl.base_rotation(), expected));
}

#[test]
fn rejects_bad_descriptors() {
    let mut desc = RotationControllerDescriptor::default();
    desc.fling_damping = 1.5;
    assert!(RotationController::new(&desc).is_err());

    let mut desc = RotationControllerDescriptor::default();
    desc.drag_slowing = 0.0;
    assert!(RotationController::new(&desc).is_err());

    let mut desc = RotationControllerDescriptor::default();
    desc.fling_reduction = -1.0;
    assert!(RotationController::new(&desc).is_err());

    assert!(RotationController::new(&RotationControllerDescriptor::default()).is_ok());
}

#[test]
fn to_matrix_writes_the_current_orientation() {
    let mut ctl = RotationController::default();
    ctl.on_press(0.0, 0.0);
    ctl.on_move(90.0, 0.0);
    ctl.on_release();

    let mut out = [0.0f32; 16];
    ctl.to_matrix(&mut out);

    let mut expected = [0.0f32; 16];
    ctl.base_rotation().to_matrix(&mut expected);
    assert!(out == expected);
}
