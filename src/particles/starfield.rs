use std::f32::consts::TAU;
use rand::Rng;
use crate::math::{Mat4, Vec3};

/// Background stars seeded in three spherical shells
pub const DEFAULT_STAR_COUNT: usize = 8000;

#[derive(Debug, Clone, Copy)]
struct Star {
    position: Vec3,
    size: f32,
    color: Vec3,
}

impl Star {
    fn seed(rng: &mut impl Rng) -> Self {
        let layer = rng.gen::<f32>();
        let radius = if layer < 0.3 {
            350.0 + rng.gen::<f32>() * 50.0
        } else if layer < 0.7 {
            420.0 + rng.gen::<f32>() * 60.0
        } else {
            500.0 + rng.gen::<f32>() * 80.0
        };

        // Uniform direction on the sphere
        let theta = rng.gen::<f32>() * TAU;
        let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
        let position = Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        );

        Self {
            position,
            size: star_size(rng),
            color: star_color(rng),
        }
    }
}

fn star_size(rng: &mut impl Rng) -> f32 {
    let tier = rng.gen::<f32>();
    if tier < 0.7 {
        1.0 + rng.gen::<f32>() * 1.5
    } else if tier < 0.9 {
        2.5 + rng.gen::<f32>() * 1.0
    } else {
        4.0 + rng.gen::<f32>() * 2.0
    }
}

fn star_color(rng: &mut impl Rng) -> Vec3 {
    let kind = rng.gen::<f32>();
    let b = 0.7 + rng.gen::<f32>() * 0.3;
    if kind < 0.6 {
        Vec3::new(b, b, b)
    } else if kind < 0.8 {
        // blue-white
        Vec3::new(b * 0.9, b * 0.95, b)
    } else if kind < 0.95 {
        // yellow-white
        Vec3::new(b, b * 0.95, b * 0.8)
    } else {
        Vec3::ONE
    }
}

/// Slowly turning, gently breathing star backdrop
pub struct Starfield {
    stars: Vec<Star>,
    rotation: f32,
    opacity: f32,
}

impl Starfield {
    pub fn seed(count: usize, rng: &mut impl Rng) -> Self {
        Self {
            stars: (0..count).map(|_| Star::seed(rng)).collect(),
            rotation: 0.0,
            opacity: 0.7,
        }
    }

    pub fn update(&mut self, time: f32) {
        self.rotation = time * 0.00003;
        self.opacity = 0.7 + (time * 0.5).sin() * 0.1;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Model matrix for the whole field
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.rotation)
    }

    /// Get particle data for GPU upload
    /// Format: position(3) + size(1) + alpha(1) + color(3) = 8 floats per particle
    ///
    /// Per-star alpha is 1.0; the field-wide breathing is `opacity()`, applied at draw time.
    pub fn get_particle_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.stars.len() * 8);

        for s in &self.stars {
            data.extend_from_slice(&[s.position.x, s.position.y, s.position.z]);
            data.push(s.size);
            data.push(1.0);
            data.extend_from_slice(&[s.color.x, s.color.y, s.color.z]);
        }

        data
    }

    pub fn count(&self) -> usize {
        self.stars.len()
    }
}
