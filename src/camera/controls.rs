use std::f32::consts::PI;
use crate::math::Vec3;

/// Radians of orbit per pixel of drag at rotate speed 1
const ORBIT_RADIANS_PER_PIXEL: f32 = 0.025;
/// World units of pan per pixel per unit of camera distance at pan speed 1
const PAN_UNITS_PER_PIXEL: f32 = 0.002;
/// Dolly factor for one wheel step at zoom speed 1
const ZOOM_STEP: f32 = 0.95;
/// Keeps the camera off the poles so the up vector stays defined
const POLE_EPSILON: f32 = 1e-4;

/// Orbit-style camera handle: a camera position circling a look-at target.
///
/// User input only accumulates while `enabled`; [`OrbitControls::update`]
/// applies the pending motion (spread over frames when damping is on) and
/// clamps the camera distance.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub position: Vec3,
    pub target: Vec3,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    dolly: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            enabled: true,
            enable_damping: true,
            damping_factor: 0.008,
            rotate_speed: 0.2,
            zoom_speed: 0.35,
            pan_speed: 0.25,
            min_distance: 1.0,
            max_distance: 100.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
            dolly: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(&self.target)
    }

    /// Rotate around the target by a pointer drag in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        self.delta_theta -= dx * ORBIT_RADIANS_PER_PIXEL * self.rotate_speed;
        self.delta_phi -= dy * ORBIT_RADIANS_PER_PIXEL * self.rotate_speed;
    }

    /// Positive steps move away from the target
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled {
            return;
        }
        self.dolly *= ZOOM_STEP.powf(-steps * self.zoom_speed);
    }

    /// Slide target and camera together across the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&Vec3::UP).normalize();
        let up = right.cross(&forward);
        let scale = self.distance() * PAN_UNITS_PER_PIXEL * self.pan_speed;

        self.pan_offset += right.scale(-dx * scale) + up.scale(dy * scale);
    }

    /// Drop any motion still pending from user input
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.dolly = 1.0;
        self.pan_offset = Vec3::ZERO;
    }

    pub fn has_pending_motion(&self) -> bool {
        self.delta_theta.abs() > 1e-6
            || self.delta_phi.abs() > 1e-6
            || (self.dolly - 1.0).abs() > 1e-6
            || self.pan_offset.length() > 1e-6
    }

    /// Apply pending input and distance limits to the camera position
    pub fn update(&mut self) {
        let offset = self.position - self.target;
        let radius = offset.length();

        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let step = if self.enable_damping { self.damping_factor } else { 1.0 };

        theta += self.delta_theta * step;
        phi = (phi + self.delta_phi * step).clamp(POLE_EPSILON, PI - POLE_EPSILON);

        let dolly = 1.0 + (self.dolly - 1.0) * step;
        let radius = (radius * dolly).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset.scale(step);

        self.position = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.dolly = 1.0 + (self.dolly - 1.0) * keep;
            self.pan_offset = self.pan_offset.scale(keep);
        } else {
            self.stop();
        }
    }
}
