use serde::Deserialize;
use std::f32::consts::FRAC_PI_6;
use crate::math::Vec3;

/// Camera behaviour knobs, all overridable from YAML
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Where the follow camera sits relative to the focused body
    pub follow_offset: Vec3,
    /// Lerp factor per second of frame time
    pub follow_gain: f32,
    /// Upper bound on a single frame's lerp factor
    pub max_lerp_factor: f32,
    /// Distance under which the rig snaps and settles
    pub settle_epsilon: f32,
    pub transition_duration: f32,
    /// Horizontal angle of the approach vector, radians
    pub approach_angle: f32,
    /// Approach height as a fraction of the approach distance
    pub approach_height_ratio: f32,
    pub default_approach_distance: f32,
    pub reset_duration: f32,
    pub overview_position: Vec3,
    pub overview_target: Vec3,
    /// Delay before the camera starts moving toward a star
    pub star_prelude_delay: f32,
    pub fov_degrees: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            follow_offset: Vec3::new(2.0, 1.5, 2.0),
            follow_gain: 3.0,
            max_lerp_factor: 0.15,
            settle_epsilon: 0.01,
            transition_duration: 1.2,
            approach_angle: FRAC_PI_6,
            approach_height_ratio: 0.4,
            default_approach_distance: 5.0,
            reset_duration: 1.8,
            overview_position: Vec3::new(0.0, 25.0, 50.0),
            overview_target: Vec3::new(0.0, 8.0, 0.0),
            star_prelude_delay: 0.5,
            fov_degrees: 45.0,
        }
    }
}

impl CameraTuning {
    /// Offset from a body to the camera's parking spot for a given approach distance
    pub fn approach_vector(&self, distance: f32) -> Vec3 {
        Vec3::new(
            distance * self.approach_angle.cos(),
            distance * self.approach_height_ratio,
            distance * self.approach_angle.sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let tuning: CameraTuning = serde_yaml::from_str("follow_gain: 5.0").unwrap();
        assert_eq!(tuning.follow_gain, 5.0);
        assert_eq!(tuning.follow_offset, Vec3::new(2.0, 1.5, 2.0));
        assert_eq!(tuning.transition_duration, 1.2);
    }

    #[test]
    fn test_approach_vector() {
        let tuning = CameraTuning::default();
        let v = tuning.approach_vector(4.2);
        assert!((v.x - 4.2 * (3.0f32).sqrt() / 2.0).abs() < 1e-4);
        assert!((v.y - 1.68).abs() < 1e-4);
        assert!((v.z - 2.1).abs() < 1e-4);
    }
}
