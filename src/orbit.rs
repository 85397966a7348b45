//! Circular orbit model
//!
//! Every body travels a circle in the horizontal plane at `ORBIT_PLANE_HEIGHT`.
//! The angle grows with frame time and is never wrapped; trig handles it.

use crate::math::Vec3;
use crate::scene::CelestialBody;

/// Converts configured speeds into radians per second
pub const ORBIT_SPEED_SCALE: f32 = 0.2;

/// Height of the orbital plane above the world origin
pub const ORBIT_PLANE_HEIGHT: f32 = 8.0;

/// Axial spin added every frame, independent of frame time
pub const PLANET_SPIN_PER_FRAME: f32 = 0.01;
pub const STAR_SPIN_PER_FRAME: f32 = 0.002;

/// Mutable per-frame state of one body
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitState {
    /// Accumulated orbital angle, radians
    pub angle: f32,
    /// Accumulated self-rotation about the local Y axis
    pub spin: f32,
}

impl OrbitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the orbit by `dt` seconds and return the body's new position.
    /// Negative `dt` is treated as zero.
    pub fn advance(&mut self, body: &CelestialBody, dt: f32) -> Vec3 {
        self.angle += body.speed * dt.max(0.0) * ORBIT_SPEED_SCALE;
        self.spin += if body.is_star() {
            STAR_SPIN_PER_FRAME
        } else {
            PLANET_SPIN_PER_FRAME
        };
        self.position(body)
    }

    pub fn position(&self, body: &CelestialBody) -> Vec3 {
        position_at(body.distance, self.angle)
    }
}

/// Point on an orbit of radius `distance` at `angle`
pub fn position_at(distance: f32, angle: f32) -> Vec3 {
    Vec3::from_polar(distance, angle, ORBIT_PLANE_HEIGHT)
}
