//! Continuous follow camera
//!
//! The rig is a pure step function over [`CameraPose`]; the caller copies the
//! returned pose into [`OrbitControls`] with [`RigStep::apply`].

use crate::math::Vec3;
use crate::scene::CameraTuning;
use super::controls::OrbitControls;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn from_controls(controls: &OrbitControls) -> Self {
        Self::new(controls.position, controls.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RigState {
    /// Nothing to follow
    #[default]
    Idle,
    /// Lerping toward the follow pose
    Following,
    /// Snapped onto the follow pose
    Settled,
}

/// Result of one rig step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigStep {
    pub state: RigState,
    pub pose: CameraPose,
    /// Whether the controls need an `update()` this frame
    pub update_controls: bool,
}

impl RigStep {
    /// Copy the pose into the live controls, updating them when asked to
    pub fn apply(&self, controls: &mut OrbitControls) {
        controls.position = self.pose.position;
        controls.target = self.pose.look_at;
        if self.update_controls {
            controls.update();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub offset: Vec3,
    pub gain: f32,
    pub max_lerp: f32,
    pub epsilon: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_tuning(&CameraTuning::default())
    }
}

impl CameraRig {
    pub fn from_tuning(tuning: &CameraTuning) -> Self {
        Self {
            offset: tuning.follow_offset,
            gain: tuning.follow_gain,
            max_lerp: tuning.max_lerp_factor,
            epsilon: tuning.settle_epsilon,
        }
    }

    /// Pose the camera aims for when trailing a body at `target`
    pub fn follow_pose(&self, target: Vec3) -> CameraPose {
        CameraPose::new(target + self.offset, target)
    }

    /// Advance the follow camera by one frame
    pub fn step(&self, state: RigState, pose: CameraPose, target: Option<Vec3>, dt: f32) -> RigStep {
        let Some(target) = target else {
            return RigStep {
                state: RigState::Idle,
                pose,
                update_controls: false,
            };
        };

        let desired = self.follow_pose(target);
        let position_gap = pose.position.distance(&desired.position);
        let look_gap = pose.look_at.distance(&desired.look_at);

        if position_gap > self.epsilon || look_gap > self.epsilon {
            let t = (dt.max(0.0) * self.gain).min(self.max_lerp);
            return RigStep {
                state: RigState::Following,
                pose: CameraPose::new(
                    pose.position.lerp(&desired.position, t),
                    pose.look_at.lerp(&desired.look_at, t),
                ),
                update_controls: true,
            };
        }

        match state {
            RigState::Following => RigStep {
                state: RigState::Settled,
                pose: desired,
                update_controls: true,
            },
            RigState::Idle | RigState::Settled => RigStep {
                state: RigState::Settled,
                pose,
                update_controls: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_no_target_is_idle() {
        let rig = CameraRig::default();
        let pose = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let step = rig.step(RigState::Following, pose, None, FRAME);
        assert_eq!(step.state, RigState::Idle);
        assert_eq!(step.pose, pose);
        assert!(!step.update_controls);
    }

    #[test]
    fn test_lerp_factor_is_capped() {
        let rig = CameraRig::default();
        let target = Vec3::new(10.0, 8.0, 0.0);
        let pose = CameraPose::new(Vec3::ZERO, Vec3::ZERO);

        // 1s * 3 would overshoot; the cap holds it at 0.15
        let step = rig.step(RigState::Idle, pose, Some(target), 1.0);
        let expected = Vec3::ZERO.lerp(&(target + rig.offset), 0.15);
        assert!(step.pose.position.distance(&expected) < 1e-5);
        assert_eq!(step.state, RigState::Following);
        assert!(step.update_controls);
    }

    #[test]
    fn test_converges_then_stays_put() {
        let rig = CameraRig::default();
        let target = Vec3::new(8.0, 8.0, 0.0);
        let mut state = RigState::Idle;
        let mut pose = CameraPose::new(Vec3::new(0.0, 25.0, 50.0), Vec3::new(0.0, 8.0, 0.0));

        let mut frames = 0;
        while state != RigState::Settled {
            let step = rig.step(state, pose, Some(target), FRAME);
            state = step.state;
            pose = step.pose;
            frames += 1;
            assert!(frames < 2000, "rig never settled");
        }

        assert_eq!(pose, rig.follow_pose(target));

        for _ in 0..10 {
            let step = rig.step(state, pose, Some(target), FRAME);
            assert_eq!(step.pose, pose);
            assert_eq!(step.state, RigState::Settled);
            assert!(!step.update_controls);
        }
    }

    #[test]
    fn test_settled_rig_follows_moving_target() {
        let rig = CameraRig::default();
        let target = Vec3::new(8.0, 8.0, 0.0);
        let pose = rig.follow_pose(target);

        let moved = target + Vec3::new(0.5, 0.0, 0.0);
        let step = rig.step(RigState::Settled, pose, Some(moved), FRAME);
        assert_eq!(step.state, RigState::Following);
        assert!(step.pose.position.x > pose.position.x);
    }

    #[test]
    fn test_apply_copies_pose() {
        let rig = CameraRig::default();
        let mut controls = OrbitControls::new(Vec3::new(0.0, 25.0, 50.0), Vec3::new(0.0, 8.0, 0.0));
        let step = rig.step(
            RigState::Idle,
            CameraPose::from_controls(&controls),
            Some(Vec3::new(4.0, 8.0, 0.0)),
            FRAME,
        );
        step.apply(&mut controls);
        assert!(controls.target.distance(&step.pose.look_at) < 1e-5);
        assert!(controls.position.distance(&step.pose.position) < 1e-3);
    }
}
