use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// 3D vector used for world positions, camera poses and colours.
///
/// Deserializes from a YAML sequence `[x, y, z]` so configuration files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on a horizontal circle of `radius` at polar `angle`, lifted to `height`.
    pub fn from_polar(radius: f32, angle: f32, height: f32) -> Self {
        Self {
            x: radius * angle.cos(),
            y: height,
            z: radius * angle.sin(),
        }
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            *self
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Move `t` of the way toward `other` (t = 0 keeps self, t = 1 lands on other).
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self).scale(t)
    }

    pub fn scale(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Horizontal distance from the Y axis
    pub fn radial_xz(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_from_polar_quadrants() {
        let east = Vec3::from_polar(8.0, 0.0, 8.0);
        assert!((east.x - 8.0).abs() < 1e-5);
        assert!(east.z.abs() < 1e-5);

        let south = Vec3::from_polar(8.0, FRAC_PI_2, 8.0);
        assert!(south.x.abs() < 1e-5);
        assert!((south.z - 8.0).abs() < 1e-5);

        let west = Vec3::from_polar(8.0, PI, 2.0);
        assert!((west.x + 8.0).abs() < 1e-5);
        assert_eq!(west.y, 2.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-3.0, 6.0, 0.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        let end = a.lerp(&b, 1.0);
        assert!(end.distance(&b) < 1e-6);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.x + 1.0).abs() < 1e-6);
        assert!((mid.y - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        let n = Vec3::new(0.0, 3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cross_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let z = x.cross(&Vec3::UP);
        assert!((z.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaml_sequence_form() {
        let v: Vec3 = serde_yaml::from_str("[2.0, 1.5, 2.0]").unwrap();
        assert_eq!(v, Vec3::new(2.0, 1.5, 2.0));
    }

    #[test]
    fn test_radial_xz() {
        let v = Vec3::new(3.0, 100.0, 4.0);
        assert!((v.radial_xz() - 5.0).abs() < 1e-6);
    }
}
