use crate::math::Vec3;

/// Pulsing emissive surface of the central star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunSurface {
    /// Small wobble about X, radians
    pub tilt_x: f32,
    pub emissive_intensity: f32,
    pub emissive_color: Vec3,
}

impl Default for SunSurface {
    fn default() -> Self {
        Self {
            tilt_x: 0.0,
            emissive_intensity: 4.0,
            emissive_color: Vec3::new(1.0, 0.4, 0.1),
        }
    }
}

impl SunSurface {
    pub fn update(&mut self, time: f32) {
        self.tilt_x = (time * 0.1).sin() * 0.02;

        let pulse = 4.0 + (time * 2.0).sin() * 0.8;
        self.emissive_intensity = pulse + (time * 8.0).sin() * 0.3 + (time * 12.0).sin() * 0.2;

        let heat = 0.1 + (time * 3.0).sin() * 0.05;
        self.emissive_color = Vec3::new(1.0, 0.4 + heat, 0.1 + heat * 0.5);
    }

    /// Emissive colour already multiplied by intensity
    pub fn emissive(&self) -> Vec3 {
        self.emissive_color.scale(self.emissive_intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_bounds() {
        let mut sun = SunSurface::default();
        for i in 0..500 {
            sun.update(i as f32 * 0.013);
            assert!(sun.emissive_intensity >= 2.7 && sun.emissive_intensity <= 5.3);
            assert!(sun.tilt_x.abs() <= 0.02);
            assert!(sun.emissive_color.y >= 0.45 - 1e-6 && sun.emissive_color.y <= 0.55 + 1e-6);
        }
    }

    #[test]
    fn test_time_zero() {
        let mut sun = SunSurface::default();
        sun.update(0.0);
        assert_eq!(sun.emissive_intensity, 4.0);
        assert!(sun.emissive_color.distance(&Vec3::new(1.0, 0.5, 0.15)) < 1e-6);
    }
}
