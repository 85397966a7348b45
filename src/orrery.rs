//! Frame driver tying the scene, camera and input together
//!
//! [`Orrery`] has no GPU state, so everything the page can ask for is
//! reachable (and testable) without a WebGL context.

use log::{debug, info};
use crate::animation::SunPhase;
use crate::camera::{CameraPose, FocusController, FocusEvent, OrbitControls};
use crate::error::{ConfigError, FocusError};
use crate::interaction::{PickCamera, RayPicker};
use crate::navigation::{KeyboardNavigator, NavigationCommand};
use crate::scene::{BodyHandle, Scene, SystemConfig};

pub struct Orrery {
    scene: Scene,
    controls: OrbitControls,
    focus: FocusController,
    picker: RayPicker,
    navigator: KeyboardNavigator,
}

impl Orrery {
    /// Mount a configuration, checking it first
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let tuning = config.camera;
        let scene = Scene::new(config);
        let navigator = KeyboardNavigator::new(scene.registry());
        info!(
            "Mounted '{}': {} bodies",
            scene.config().name,
            scene.registry().len()
        );

        Ok(Self {
            scene,
            controls: OrbitControls::new(tuning.overview_position, tuning.overview_target),
            focus: FocusController::new(tuning),
            picker: RayPicker::new(),
            navigator,
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::new(SystemConfig::from_yaml(yaml)?)
    }

    /// Advance one frame and return what happened to the focus
    pub fn frame(&mut self, dt: f32) -> Vec<FocusEvent> {
        self.scene.advance(dt);
        let events = self.focus.update(dt, &self.scene, &mut self.controls);
        if self.controls.enabled && self.controls.has_pending_motion() {
            self.controls.update();
        }
        self.scene.update_starfield();

        for event in &events {
            if let FocusEvent::SunPhase(phase) = event {
                debug!("Sun sequence: {}", phase.as_str());
            }
        }
        events
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::from_controls(&self.controls)
    }

    pub fn focus_body(&mut self, name: &str) -> Result<BodyHandle, FocusError> {
        self.focus.request_focus_by_name(name, &self.scene, &mut self.controls)
    }

    pub fn reset_view(&mut self) {
        self.focus.reset_view(&mut self.controls);
    }

    pub fn snap_to_overview(&mut self) {
        self.focus.snap_to_overview(&mut self.controls);
    }

    /// Focus the body under a screen point and return its name.
    ///
    /// `Ok(None)` means empty sky. A hit that the controller refuses is an
    /// error, so the caller never sees a name for a body that was not focused.
    pub fn click(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fov: f32,
    ) -> Result<Option<String>, FocusError> {
        self.picker.sync(&self.scene);
        let camera = PickCamera {
            position: self.controls.position,
            target: self.controls.target,
            fov,
            aspect: if height > 0.0 { width / height } else { 1.0 },
        };
        let Some(hit) = self.picker.pick(x, y, width, height, &camera) else {
            return Ok(None);
        };

        self.focus.request_focus(hit.handle, &self.scene, &mut self.controls)?;
        Ok(self.name_of(hit.handle))
    }

    /// Apply a key press; returns the name of the highlighted or selected body.
    /// A selection the controller refuses comes back as the error.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Result<Option<String>, FocusError> {
        let Some(command) = self.navigator.handle_key(key, ctrl) else {
            return Ok(None);
        };
        match command {
            NavigationCommand::Highlight(handle) => Ok(self.name_of(handle)),
            NavigationCommand::Select(handle) => {
                self.focus.request_focus(handle, &self.scene, &mut self.controls)?;
                Ok(self.name_of(handle))
            }
            NavigationCommand::Reset => {
                self.reset_view();
                Ok(None)
            }
        }
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.controls.orbit(dx, dy);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.controls.zoom(delta);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.controls.pan(dx, dy);
    }

    pub fn focused_body(&self) -> Option<String> {
        self.focus.focused().and_then(|h| self.name_of(h))
    }

    pub fn is_transitioning(&self) -> bool {
        self.focus.is_transitioning()
    }

    pub fn sun_phase(&self) -> Option<SunPhase> {
        self.focus.sun_phase()
    }

    pub fn body_names(&self) -> Vec<String> {
        self.scene.registry().names().to_vec()
    }

    fn name_of(&self, handle: BodyHandle) -> Option<String> {
        self.scene.registry().name(handle).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FocusPhase;

    const FRAME: f32 = 1.0 / 60.0;
    const FOV: f32 = std::f32::consts::FRAC_PI_4;

    fn run(orrery: &mut Orrery, seconds: f32) -> Vec<FocusEvent> {
        let mut events = Vec::new();
        for _ in 0..(seconds / FRAME).ceil() as usize {
            events.extend(orrery.frame(FRAME));
        }
        events
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SystemConfig { bodies: Vec::new(), ..SystemConfig::default() };
        assert!(matches!(Orrery::new(config), Err(ConfigError::Empty)));
    }

    #[test]
    fn test_focus_then_arrive() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        orrery.focus_body("Earth").unwrap();
        assert!(orrery.is_transitioning());
        assert!(!orrery.controls().enabled);

        let events = run(&mut orrery, 1.5);
        assert!(events.contains(&FocusEvent::Arrived("Earth".to_string())));
        assert_eq!(orrery.focus().phase(), FocusPhase::Idle);
        assert_eq!(orrery.focused_body().as_deref(), Some("Earth"));
        assert!(orrery.controls().enabled);
    }

    #[test]
    fn test_second_request_rejected_while_flying() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        orrery.focus_body("mars").unwrap();
        assert_eq!(orrery.focus_body("venus"), Err(FocusError::TransitionInProgress));
        assert_eq!(orrery.focused_body().as_deref(), Some("Mars"));
    }

    #[test]
    fn test_click_at_centre_focuses_body_in_view() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        orrery.focus_body("Jupiter").unwrap();
        run(&mut orrery, 4.0);
        assert!(!orrery.is_transitioning());

        // Camera looks at Jupiter now; a click in the middle hits it
        let name = orrery.click(400.0, 300.0, 800.0, 600.0, FOV).unwrap();
        assert_eq!(name.as_deref(), Some("Jupiter"));
    }

    #[test]
    fn test_click_while_busy_reports_rejection() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        orrery.focus_body("Jupiter").unwrap();
        run(&mut orrery, 4.0);
        orrery.focus_body("Mars").unwrap();

        // Jupiter is still under the centre but the camera is committed to Mars
        assert_eq!(
            orrery.click(400.0, 300.0, 800.0, 600.0, FOV),
            Err(FocusError::TransitionInProgress)
        );
        assert_eq!(orrery.focused_body().as_deref(), Some("Mars"));
    }

    #[test]
    fn test_click_on_empty_sky() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        assert_eq!(orrery.click(2.0, 2.0, 800.0, 600.0, FOV), Ok(None));
        assert!(!orrery.is_transitioning());
    }

    #[test]
    fn test_keys_drive_focus() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        assert_eq!(orrery.handle_key("ArrowRight", false), Ok(Some("Venus".to_string())));
        assert!(!orrery.is_transitioning());

        assert_eq!(orrery.handle_key("Enter", false), Ok(Some("Venus".to_string())));
        assert!(orrery.is_transitioning());
        assert_eq!(orrery.handle_key("Enter", false), Err(FocusError::TransitionInProgress));

        assert_eq!(orrery.handle_key("Escape", false), Ok(None));
        assert!(orrery.is_transitioning());
        assert_eq!(orrery.focused_body(), None);
    }

    #[test]
    fn test_user_input_moves_camera_when_idle() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        let before = orrery.controls().position;
        orrery.orbit(40.0, 0.0);
        run(&mut orrery, 0.5);
        assert!(orrery.controls().position.distance(&before) > 1e-3);
    }

    #[test]
    fn test_snap_clears_everything() {
        let mut orrery = Orrery::new(SystemConfig::default()).unwrap();
        orrery.focus_body("Sun").unwrap();
        run(&mut orrery, 0.2);
        assert!(orrery.sun_phase().is_some());

        orrery.snap_to_overview();
        assert!(!orrery.is_transitioning());
        assert_eq!(orrery.focused_body(), None);
        assert_eq!(orrery.sun_phase(), None);
        assert_eq!(orrery.body_names().len(), 10);
    }
}
