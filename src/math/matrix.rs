use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(t: Vec3) -> Self {
        let mut m = Self::identity();
        m.data[12] = t.x;
        m.data[13] = t.y;
        m.data[14] = t.z;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Rotation from XYZ-ordered Euler angles (x applied last, as in scene-graph conventions)
    pub fn from_euler(euler: Vec3) -> Self {
        Self::rotation_x(euler.x)
            .mul(&Self::rotation_y(euler.y))
            .mul(&Self::rotation_z(euler.z))
    }

    /// Translation * rotation * uniform scale, the layout used for per-instance transforms
    pub fn compose(translation: Vec3, euler: Vec3, scale: f32) -> Self {
        let mut m = Self::from_euler(euler);
        for i in 0..12 {
            if i % 4 != 3 {
                m.data[i] *= scale;
            }
        }
        m.data[12] = translation.x;
        m.data[13] = translation.y;
        m.data[14] = translation.z;
        m
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                result[row + col * 4] = (0..4)
                    .map(|k| self.data[row + k * 4] * other.data[k + col * 4])
                    .sum();
            }
        }
        Self { data: result }
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}
