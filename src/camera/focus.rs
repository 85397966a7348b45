//! Focus transitions: the cinematic fly-to when a body is selected
//!
//! At most one transition runs at a time. While one is in flight the
//! controller owns the camera through its tweens and the follow rig is
//! suspended; once it returns to `Idle` the rig takes over again.

use log::{debug, info, warn};
use crate::animation::{Easing, SunApproachSequence, SunPhase, TweenHandle, TweenOptions, TweenTarget, Tweener};
use crate::error::FocusError;
use crate::math::Vec3;
use crate::scene::{BodyHandle, CameraTuning, Scene};
use super::controls::OrbitControls;
use super::rig::{CameraPose, CameraRig, RigState};

/// What a transition is flying toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Focus(BodyHandle),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// Waiting before the camera starts moving
    Prelude { remaining: f32 },
    Tweening { position: TweenHandle, target: TweenHandle },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    stage: Stage,
}

impl Transition {
    pub fn in_prelude(&self) -> bool {
        matches!(self.stage, Stage::Prelude { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FocusPhase {
    #[default]
    Idle,
    Transitioning(Transition),
}

/// Things the page may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum FocusEvent {
    Arrived(String),
    ViewReset,
    SunPhase(SunPhase),
}

/// Owns the focus pointer, the camera tweens and the follow rig
#[derive(Debug)]
pub struct FocusController {
    phase: FocusPhase,
    focus: Option<BodyHandle>,
    rig: CameraRig,
    rig_state: RigState,
    tweens: Tweener,
    sun_sequence: SunApproachSequence,
    tuning: CameraTuning,
}

impl FocusController {
    pub fn new(tuning: CameraTuning) -> Self {
        Self {
            phase: FocusPhase::Idle,
            focus: None,
            rig: CameraRig::from_tuning(&tuning),
            rig_state: RigState::Idle,
            tweens: Tweener::new(),
            sun_sequence: SunApproachSequence::new(),
            tuning,
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, FocusPhase::Transitioning(_))
    }

    pub fn focused(&self) -> Option<BodyHandle> {
        self.focus
    }

    pub fn rig_state(&self) -> RigState {
        self.rig_state
    }

    pub fn sun_phase(&self) -> Option<SunPhase> {
        self.sun_sequence.phase()
    }

    /// Single entry point for claiming the camera. Returns false while busy.
    ///
    /// The transition starts in `stage`, so every claimed flag has a stage
    /// that `update` drives back to `Idle`.
    fn try_begin_transition(&mut self, kind: TransitionKind, stage: Stage) -> bool {
        if self.is_transitioning() {
            return false;
        }
        self.phase = FocusPhase::Transitioning(Transition { kind, stage });
        true
    }

    /// Resolve a name and fly to it
    pub fn request_focus_by_name(
        &mut self,
        name: &str,
        scene: &Scene,
        controls: &mut OrbitControls,
    ) -> Result<BodyHandle, FocusError> {
        if self.is_transitioning() {
            warn!("Focus request for '{}' rejected: transition in progress", name);
            return Err(FocusError::TransitionInProgress);
        }
        let handle = scene.registry().lookup(name).ok_or_else(|| {
            warn!("Focus request for unknown body '{}'", name);
            FocusError::UnknownBody(name.to_string())
        })?;
        self.request_focus(handle, scene, controls)?;
        Ok(handle)
    }

    pub fn request_focus(
        &mut self,
        handle: BodyHandle,
        scene: &Scene,
        controls: &mut OrbitControls,
    ) -> Result<(), FocusError> {
        let name = scene
            .registry()
            .name(handle)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", handle.index()));

        if self.is_transitioning() {
            warn!("Focus request for '{}' rejected: transition in progress", name);
            return Err(FocusError::TransitionInProgress);
        }

        let (Some(body), Some(position), Some(distance)) = (
            scene.body(handle),
            scene.position(handle),
            scene.approach_distance(handle),
        ) else {
            warn!("Focus request for unmounted body {:?}", handle);
            return Err(FocusError::UnknownBody(name));
        };

        let stage = if body.is_star() {
            debug!("Star focus on '{}': {}s prelude", name, self.tuning.star_prelude_delay);
            self.sun_sequence.start();
            Stage::Prelude {
                remaining: self.tuning.star_prelude_delay,
            }
        } else {
            debug!("Focus transition to '{}' (approach {})", name, distance);
            self.start_fly_to(position, distance, controls)
        };

        if !self.try_begin_transition(TransitionKind::Focus(handle), stage) {
            return Err(FocusError::TransitionInProgress);
        }
        self.focus = Some(handle);
        self.rig_state = RigState::Idle;

        Ok(())
    }

    /// Fly back to the overview pose, superseding any transition in flight
    pub fn reset_view(&mut self, controls: &mut OrbitControls) {
        if let FocusPhase::Transitioning(t) = self.phase {
            debug!("Reset view supersedes {:?}", t.kind);
        }
        self.phase = FocusPhase::Idle;
        self.focus = None;
        self.rig_state = RigState::Idle;
        self.sun_sequence.cancel();

        controls.enabled = false;
        controls.stop();
        let options = TweenOptions::new(self.tuning.reset_duration, Easing::Power3Out);
        let stage = self.tween_camera(
            CameraPose::new(self.tuning.overview_position, self.tuning.overview_target),
            options,
            controls,
        );
        self.try_begin_transition(TransitionKind::Reset, stage);
    }

    /// Jump straight to the overview pose with nothing in flight
    pub fn snap_to_overview(&mut self, controls: &mut OrbitControls) {
        self.tweens.kill_tweens_of(TweenTarget::CameraPosition);
        self.tweens.kill_tweens_of(TweenTarget::ControlsTarget);
        self.sun_sequence.cancel();
        self.phase = FocusPhase::Idle;
        self.focus = None;
        self.rig_state = RigState::Idle;

        controls.stop();
        controls.position = self.tuning.overview_position;
        controls.target = self.tuning.overview_target;
        controls.enabled = true;
        controls.enable_damping = true;
        controls.damping_factor = 0.008;
        controls.update();
    }

    /// Per-frame step: transition tweens, or the follow rig when idle
    pub fn update(&mut self, dt: f32, scene: &Scene, controls: &mut OrbitControls) -> Vec<FocusEvent> {
        let dt = dt.max(0.0);
        let mut events = Vec::new();

        if let Some(phase) = self.sun_sequence.update(dt) {
            events.push(FocusEvent::SunPhase(phase));
        }

        match self.phase {
            FocusPhase::Idle => self.follow(dt, scene, controls),
            FocusPhase::Transitioning(transition) => match transition.stage {
                Stage::Prelude { remaining } => {
                    self.advance_prelude(transition.kind, remaining - dt, scene, controls);
                }
                Stage::Tweening { position, target } => {
                    self.advance_tweens(dt, controls);
                    if !self.tweens.is_active(position) && !self.tweens.is_active(target) {
                        events.extend(self.finish(transition.kind, scene, controls));
                    }
                }
            },
        }

        events
    }

    fn follow(&mut self, dt: f32, scene: &Scene, controls: &mut OrbitControls) {
        let target = self.focus.and_then(|h| scene.position(h));
        if target.is_none() {
            self.rig_state = RigState::Idle;
            return;
        }
        let step = self.rig.step(self.rig_state, CameraPose::from_controls(controls), target, dt);
        self.rig_state = step.state;
        step.apply(controls);
    }

    fn advance_prelude(&mut self, kind: TransitionKind, remaining: f32, scene: &Scene, controls: &mut OrbitControls) {
        if remaining > 0.0 {
            self.set_stage(Stage::Prelude { remaining });
            return;
        }

        let TransitionKind::Focus(handle) = kind else {
            self.phase = FocusPhase::Idle;
            return;
        };
        match (scene.position(handle), scene.approach_distance(handle)) {
            (Some(position), Some(distance)) => {
                let stage = self.start_fly_to(position, distance, controls);
                self.set_stage(stage);
            }
            _ => {
                warn!("Focused body {:?} vanished during prelude", handle);
                self.phase = FocusPhase::Idle;
                self.focus = None;
            }
        }
    }

    fn start_fly_to(&mut self, body_position: Vec3, distance: f32, controls: &mut OrbitControls) -> Stage {
        controls.enabled = false;
        controls.enable_damping = true;
        controls.damping_factor = 0.05;
        controls.stop();

        let pose = CameraPose::new(body_position + self.tuning.approach_vector(distance), body_position);
        let options = TweenOptions::new(self.tuning.transition_duration, Easing::Power3Out);
        self.tween_camera(pose, options, controls)
    }

    fn tween_camera(&mut self, pose: CameraPose, options: TweenOptions, controls: &OrbitControls) -> Stage {
        self.tweens.kill_tweens_of(TweenTarget::CameraPosition);
        self.tweens.kill_tweens_of(TweenTarget::ControlsTarget);

        Stage::Tweening {
            position: self.tweens.animate(TweenTarget::CameraPosition, controls.position, pose.position, options),
            target: self.tweens.animate(TweenTarget::ControlsTarget, controls.target, pose.look_at, options),
        }
    }

    fn advance_tweens(&mut self, dt: f32, controls: &mut OrbitControls) {
        let frame = self.tweens.tick(dt);
        for (target, value) in &frame.updates {
            match target {
                TweenTarget::CameraPosition => controls.position = *value,
                TweenTarget::ControlsTarget => controls.target = *value,
            }
        }
        if !frame.updates.is_empty() {
            controls.update();
        }
    }

    fn finish(&mut self, kind: TransitionKind, scene: &Scene, controls: &mut OrbitControls) -> Option<FocusEvent> {
        self.phase = FocusPhase::Idle;
        controls.enabled = true;
        controls.enable_damping = true;

        match kind {
            TransitionKind::Focus(handle) => {
                controls.damping_factor = 0.012;
                controls.rotate_speed = 0.5;
                controls.zoom_speed = 0.8;
                controls.pan_speed = 0.8;
                controls.update();

                let name = scene.registry().name(handle)?.to_string();
                info!("Arrived at {}", name);
                Some(FocusEvent::Arrived(name))
            }
            TransitionKind::Reset => {
                controls.damping_factor = 0.008;
                info!("View reset to overview");
                Some(FocusEvent::ViewReset)
            }
        }
    }

    fn set_stage(&mut self, stage: Stage) {
        if let FocusPhase::Transitioning(transition) = &mut self.phase {
            transition.stage = stage;
        }
    }
}
