#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    pub fn magnitude_sq(&self) -> f64 {
        self.x*self.x + self.y*self.y + self.z*self.z
    }

    pub fn dot(&self, vec: Vec3) -> f64 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z
    }

    /// Scale all three components in place.
    pub fn scale(&mut self, f: f64) {
        self.x *= f;
        self.y *= f;
        self.z *= f;
    }

    /// Rescale to unit length in place. The vector must not be zero-length.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        debug_assert!(mag > 0.0, "normalize called on a zero-length vector");
        self.x /= mag;
        self.y /= mag;
        self.z /= mag;
    }

    pub fn normalized(&self) -> Self {
        let mut vec = *self;
        vec.normalize();
        vec
    }
}


#[test]
fn dot_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let dot = v.dot(v2);
    assert!(dot == 53.0);
}

#[test]
fn magnitude_test() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(v.magnitude() == 5.0);

    assert!(Vec3::zero().magnitude() == 0.0);
}

#[test]
fn normalize_test() {
    let mut v = Vec3::new(0.0, -90.0, 0.0);
    v.normalize();
    assert!(v == Vec3::new(0.0, -1.0, 0.0));

    let mut v = Vec3::new(1.0, 2.0, 2.0);
    v.normalize();
    assert!((v.magnitude() - 1.0).abs() < 1e-12);
}

#[test]
fn scale_test() {
    let mut v = Vec3::new(1.0, -2.0, 3.0);
    v.scale(2.0);
    assert!(v == Vec3::new(2.0, -4.0, 6.0));
}
