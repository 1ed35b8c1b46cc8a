use std::ops::{Index, IndexMut};

use crate::quaternion::Quaternion;

/// Column-major 4 x 4 homogeneous matrix, laid out the way GPU uniform
/// uploads expect it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Mat4x4 {
    pub m: [f32; 16],
}
impl Mat4x4 {
    pub fn identity() -> Self {
        let mut m = [0.0; 16];
        m[0]  = 1.0;
        m[5]  = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        Self { m }
    }
}

impl From<Quaternion> for Mat4x4 {
    /// Convert the quaternion to a 4 x 4 rotation matrix.
    fn from(quat: Quaternion) -> Mat4x4 {
        let mut mat = Mat4x4::identity();
        quat.to_matrix(&mut mat.m);
        mat
    }
}

impl From<Mat4x4> for [[f32; 4]; 4] {
    fn from(mat: Mat4x4) -> [[f32; 4]; 4] {
        let c0 = [mat.m[0],  mat.m[1],  mat.m[2],  mat.m[3]];
        let c1 = [mat.m[4],  mat.m[5],  mat.m[6],  mat.m[7]];
        let c2 = [mat.m[8],  mat.m[9],  mat.m[10], mat.m[11]];
        let c3 = [mat.m[12], mat.m[13], mat.m[14], mat.m[15]];

        [c0, c1, c2, c3]
    }
}

impl Index<usize> for Mat4x4 {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.m[i]
    }
}

impl IndexMut<usize> for Mat4x4 {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.m[i]
    }
}


#[test]
fn identity_quaternion_to_identity_matrix() {
    let mat = Mat4x4::from(Quaternion::identity());
    assert!(mat == Mat4x4::identity());
}

#[test]
fn translation_part_stays_identity() {
    use crate::vector::Vec3;

    let quat = Quaternion::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 1.3);
    let mat = Mat4x4::from(quat);

    for i in [3, 7, 11, 12, 13, 14] {
        assert!(mat[i] == 0.0);
    }
    assert!(mat[15] == 1.0);
}

#[test]
fn quarter_turn_about_z() {
    use crate::vector::Vec3;
    use std::f64::consts::FRAC_PI_2;

    let quat = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
    let mat = Mat4x4::from(quat);

    // A quarter turn about z leaves the z column untouched and swaps
    // the x and y columns with one sign flip.
    assert!(mat[0].abs() < 1e-6);
    assert!((mat[1] + 1.0).abs() < 1e-6);
    assert!(mat[2].abs() < 1e-6);
    assert!((mat[4] - 1.0).abs() < 1e-6);
    assert!(mat[5].abs() < 1e-6);
    assert!((mat[10] - 1.0).abs() < 1e-6);
}
