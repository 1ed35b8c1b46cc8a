use std::ops::{Mul, MulAssign};
use std::fmt;

use crate::vector::Vec3;

/// A rotation about an arbitrary axis, stored as x*i + y*j + z*k + w.
/// Only unit quaternions represent rotations; every constructor here
/// preserves unit norm up to floating point drift.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}
impl Quaternion {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The rotation that maps every vector to itself.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Build a rotation of `angle` radians about `axis`.
    /// `axis` must already be unit length, it is not normalized here.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let mut quat = Self::identity();
        quat.set_axis_angle(axis, angle);
        quat
    }

    /// In-place form of [`Quaternion::from_axis_angle`].
    pub fn set_axis_angle(&mut self, axis: Vec3, angle: f64) {
        debug_assert!(
            (axis.magnitude() - 1.0).abs() < 1e-4,
            "rotation axis must be unit length"
        );
        let s = (angle / 2.0).sin();
        self.w = (angle / 2.0).cos();
        self.x = axis.x * s;
        self.y = axis.y * s;
        self.z = axis.z * s;
    }

    pub fn dot(&self, q: Quaternion) -> f64 {
        self.x*q.x + self.y*q.y + self.z*q.z + self.w*q.w
    }

    pub fn norm(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Multiply all four components in place.
    pub fn scale(&mut self, f: f64) {
        if f != 1.0 {
            self.x *= f;
            self.y *= f;
            self.z *= f;
            self.w *= f;
        }
    }

    /// Divide all four components in place.
    pub fn div(&mut self, f: f64) {
        if f != 1.0 {
            self.x /= f;
            self.y /= f;
            self.z /= f;
            self.w /= f;
        }
    }

    /// Restore unit norm in place.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        self.div(norm);
    }

    /// Spherical linear interpolation from `self` toward `q`, in place.
    /// Interpolates along the shorter arc; `q` and `-q` are the same
    /// rotation, so `q` is negated first when the dot product is negative.
    /// Near-coincident rotations fall back to a plain linear blend, which
    /// is left unnormalized.
    pub fn slerp_with(&mut self, q: Quaternion, t: f64) {
        self.debug_assert_unit();
        q.debug_assert_unit();

        if *self == q {
            return;
        }
        let mut d = self.dot(q);
        let (qx, qy, qz, qw) = if d < 0.0 {
            d = -d;
            (-q.x, -q.y, -q.z, -q.w)
        }
        else {
            (q.x, q.y, q.z, q.w)
        };

        let (f0, f1) = if 1.0 - d > 0.1 {
            let angle = d.acos();
            let s = angle.sin();
            let t_angle = t * angle;
            ((angle - t_angle).sin() / s, t_angle.sin() / s)
        }
        else {
            (1.0 - t, t)
        };

        self.x = f0 * self.x + f1 * qx;
        self.y = f0 * self.y + f1 * qy;
        self.z = f0 * self.z + f1 * qz;
        self.w = f0 * self.w + f1 * qw;
    }

    /// Value-returning form of [`Quaternion::slerp_with`].
    pub fn slerp(&self, q: Quaternion, t: f64) -> Self {
        let mut quat = *self;
        quat.slerp_with(q, t);
        quat
    }

    /// Write this rotation into a column-major 4 x 4 homogeneous matrix
    /// with an identity translation part. Must be unit norm; the result
    /// is not a rotation matrix otherwise.
    pub fn to_matrix(&self, out: &mut [f32; 16]) {
        self.debug_assert_unit();

        let Self { x, y, z, w } = *self;

        out[3]  = 0.0;
        out[7]  = 0.0;
        out[11] = 0.0;
        out[12] = 0.0;
        out[13] = 0.0;
        out[14] = 0.0;
        out[15] = 1.0;

        out[0]  = (1.0 - 2.0 * (y*y + z*z)) as f32;
        out[1]  = (2.0 * (x*y - z*w)) as f32;
        out[2]  = (2.0 * (x*z + y*w)) as f32;

        out[4]  = (2.0 * (x*y + z*w)) as f32;
        out[5]  = (1.0 - 2.0 * (x*x + z*z)) as f32;
        out[6]  = (2.0 * (y*z - x*w)) as f32;

        out[8]  = (2.0 * (x*z - y*w)) as f32;
        out[9]  = (2.0 * (y*z + x*w)) as f32;
        out[10] = (1.0 - 2.0 * (x*x + y*y)) as f32;
    }

    fn debug_assert_unit(&self) {
        debug_assert!(
            (self.norm() - 1.0).abs() < 1e-4,
            "quaternion is not unit norm: {self}"
        );
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Hamilton product. `a * b` is `a` composed with `b`, with `b` applied
/// first; not commutative.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        let mut quat = self;
        quat *= other;
        quat
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, q: Self) {
        // All four outputs read the pre-assignment components of both
        // operands, so stage them before storing any.
        let nw = self.w*q.w - self.x*q.x - self.y*q.y - self.z*q.z;
        let nx = self.w*q.x + self.x*q.w + self.y*q.z - self.z*q.y;
        let ny = self.w*q.y + self.y*q.w + self.z*q.x - self.x*q.z;
        let nz = self.w*q.z + self.z*q.w + self.x*q.y - self.y*q.x;
        self.x = nx;
        self.y = ny;
        self.z = nz;
        self.w = nw;
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rx: {}
            \ry: {},
            \rz: {}
            \rw: {}\n",
            self.x,
            self.y,
            self.z,
            self.w
        )
    }
}


#[cfg(test)]
fn approx_eq(a: Quaternion, b: Quaternion) -> bool {
    (a.x - b.x).abs() < 1e-9
    && (a.y - b.y).abs() < 1e-9
    && (a.z - b.z).abs() < 1e-9
    && (a.w - b.w).abs() < 1e-9
}

#[test]
fn axis_angle_is_unit_norm() {
    let axes = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.6, 0.8, 0.0),
        Vec3::new(1.0, 2.0, -2.0).normalized(),
    ];
    for axis in axes {
        for angle in [0.0, 0.5, 1.0, 3.0, -2.5] {
            let q = Quaternion::from_axis_angle(axis, angle);
            assert!((q.norm() - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn identity_is_neutral() {
    let q = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.7);
    let id = Quaternion::identity();

    assert!(approx_eq(q * id, q));
    assert!(approx_eq(id * q, q));
}

#[test]
fn product_is_not_commutative() {
    let a = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 1.0);
    let b = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 1.0);

    assert!(!approx_eq(a * b, b * a));
}

#[test]
fn product_of_half_turns() {
    // Quarter turns about x and y compose to the known closed form
    // (1/2, 1/2, 1/2, 1/2).
    use std::f64::consts::FRAC_PI_2;
    let a = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2);
    let b = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2);

    let ab = a * b;
    assert!(approx_eq(ab, Quaternion::new(0.5, 0.5, 0.5, 0.5)));
}

#[test]
fn in_place_product_matches_value_product() {
    let a = Quaternion::from_axis_angle(Vec3::new(0.6, 0.8, 0.0), 0.9);
    let b = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), -1.3);

    let mut c = a;
    c *= b;
    assert!(approx_eq(c, a * b));
    assert!((c.norm() - 1.0).abs() < 1e-12);
}

#[test]
fn slerp_endpoints() {
    let a = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 0.4);
    let b = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 1.9);

    assert!(approx_eq(a.slerp(b, 0.0), a));
    assert!(approx_eq(a.slerp(b, 1.0), b));
}

#[test]
fn slerp_takes_shorter_arc() {
    let a = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 0.3);
    let b = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 2.9);
    let neg_b = Quaternion::new(-b.x, -b.y, -b.z, -b.w);

    // b and -b are the same rotation, so both interpolations must land
    // on the same endpoint up to sign.
    let end = a.slerp(neg_b, 1.0);
    assert!(approx_eq(end, b) || approx_eq(end, neg_b));
}

#[test]
fn slerp_blends_nearly_coincident_rotations() {
    let axis = Vec3::new(0.0, 1.0, 0.0);
    let a = Quaternion::from_axis_angle(axis, 0.3);
    let b = Quaternion::from_axis_angle(axis, 0.31);

    // The dot product is cos(0.005), far inside the linear-blend
    // region, so the result is the plain component-wise blend.
    let t = 0.25;
    let blended = a.slerp(b, t);
    let expected = Quaternion::new(
        (1.0 - t) * a.x + t * b.x,
        (1.0 - t) * a.y + t * b.y,
        (1.0 - t) * a.z + t * b.z,
        (1.0 - t) * a.w + t * b.w,
    );
    assert!(approx_eq(blended, expected));

    // Endpoints still come back exactly.
    assert!(approx_eq(a.slerp(b, 0.0), a));
    assert!(approx_eq(a.slerp(b, 1.0), b));
}

#[test]
fn slerp_of_equal_rotations() {
    let a = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.8);
    assert!(a.slerp(a, 0.5) == a);
}

#[test]
fn slerp_midpoint_is_unit_for_distant_rotations() {
    use std::f64::consts::FRAC_PI_2;
    let a = Quaternion::identity();
    let b = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2);

    let mid = a.slerp(b, 0.5);
    assert!((mid.norm() - 1.0).abs() < 1e-9);
}

#[test]
fn normalize_restores_unit_norm() {
    let unit = Quaternion::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 0.8);

    let mut q = unit;
    q.scale(3.0);
    assert!((q.norm() - 3.0).abs() < 1e-12);

    q.normalize();
    assert!((q.norm() - 1.0).abs() < 1e-12);
    assert!(approx_eq(q, unit));
}

#[test]
fn identity_to_matrix() {
    let mut m = [0.0f32; 16];
    Quaternion::identity().to_matrix(&mut m);

    let mut id = [0.0f32; 16];
    id[0] = 1.0;
    id[5] = 1.0;
    id[10] = 1.0;
    id[15] = 1.0;
    assert!(m == id);
}

#[test]
fn matrix_columns_are_orthonormal() {
    let q = Quaternion::from_axis_angle(Vec3::new(0.6, 0.0, 0.8), 1.1);
    let mut m = [0.0f32; 16];
    q.to_matrix(&mut m);

    let c0 = Vec3::new(m[0] as f64, m[1] as f64, m[2] as f64);
    let c1 = Vec3::new(m[4] as f64, m[5] as f64, m[6] as f64);
    let c2 = Vec3::new(m[8] as f64, m[9] as f64, m[10] as f64);

    for c in [c0, c1, c2] {
        assert!((c.magnitude() - 1.0).abs() < 1e-6);
    }
    assert!(c0.dot(c1).abs() < 1e-6);
    assert!(c1.dot(c2).abs() < 1e-6);
    assert!(c2.dot(c0).abs() < 1e-6);
}
