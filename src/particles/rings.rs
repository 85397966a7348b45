//! Procedural ring particles, one instanced draw per band
//!
//! Each band seeds its particles once and then animates them analytically from
//! elapsed time, so no per-frame state accumulates and the particle count and
//! radius bounds never change after seeding.

use std::f32::consts::TAU;
use rand::Rng;
use crate::math::{Mat4, Vec3};
use crate::scene::RingBandConfig;

/// Floats written per instance (one column-major 4x4 matrix)
pub const FLOATS_PER_INSTANCE: usize = 16;

/// Largest radial excursion added by the breathing motion
pub const RADIAL_WOBBLE: f32 = 0.008;

const HEIGHT_SPREAD: f32 = 0.015;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParticle {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    pub original_angle: f32,
    pub rotation_speed: f32,
    pub size: f32,
}

impl RingParticle {
    fn seed(inner: f32, outer: f32, rng: &mut impl Rng) -> Self {
        let angle = rng.gen::<f32>() * TAU;
        let radius = inner + rng.gen::<f32>() * (outer - inner);
        let height = (rng.gen::<f32>() - 0.5) * 2.0 * HEIGHT_SPREAD;

        // Guard the 1/r terms for a band that touches the body centre
        let inv_radius = 1.0 / radius.max(1e-3);
        let rotation_speed = 0.0003 + inv_radius * 0.0002;

        let base = 0.004 + rng.gen::<f32>() * 0.008;
        let size = (base + inv_radius * 0.006 + rng.gen::<f32>() * 0.004) * size_factor(rng);

        Self {
            angle,
            radius,
            height,
            original_angle: angle,
            rotation_speed,
            size,
        }
    }

    /// Orbital angle at `time`, including the slow drift terms
    pub fn angle_at(&self, index: usize, time: f32) -> f32 {
        let i = index as f32;
        self.original_angle
            + time * self.rotation_speed
            + (time * 0.3 + i * 0.03).sin() * 0.01
            + (time * 0.12 + self.radius * 0.05).sin() * 0.005
    }

    /// Animated instance transform at `time` for the particle at `index`
    pub fn transform(&self, index: usize, time: f32) -> Mat4 {
        let i = index as f32;
        let r = self.radius;
        let s = self.rotation_speed;

        let angle = self.angle_at(index, time);
        let y = self.height
            + (time * 0.4 + i * 0.02).sin() * 0.002
            + (time * 0.15 + r * 0.1).sin() * 0.001;
        let radius = r + (time * 0.25 + i * 0.05).sin() * RADIAL_WOBBLE;

        let tumble = Vec3::new(
            time * s * 0.8 + i * 0.03,
            time * s + i * 0.05,
            time * s * 0.6 + i * 0.02,
        );

        Mat4::compose(Vec3::from_polar(radius, angle, y), tumble, self.size)
    }
}

/// Size multiplier: mostly pebbles, some rocks, a few boulders
fn size_factor(rng: &mut impl Rng) -> f32 {
    let tier = rng.gen::<f32>();
    if tier < 0.7 {
        0.8 + rng.gen::<f32>() * 0.4
    } else if tier < 0.9 {
        1.2 + rng.gen::<f32>() * 0.6
    } else {
        1.8 + rng.gen::<f32>() * 1.0
    }
}

/// Particles of one ring band plus their instance buffer
#[derive(Debug, Clone)]
pub struct RingField {
    particles: Vec<RingParticle>,
    instances: Vec<f32>,
}

impl RingField {
    pub fn seed(config: &RingBandConfig, rng: &mut impl Rng) -> Self {
        let (inner, outer) = (config.inner_radius, config.outer_radius);
        let particles: Vec<RingParticle> = (0..config.particle_count)
            .map(|_| RingParticle::seed(inner, outer, rng))
            .collect();

        let mut field = Self {
            instances: vec![0.0; particles.len() * FLOATS_PER_INSTANCE],
            particles,
        };
        field.advance(0.0);
        field
    }

    /// Rewrite every instance matrix for absolute time `elapsed`
    pub fn advance(&mut self, elapsed: f32) {
        for (index, (particle, slot)) in self
            .particles
            .iter_mut()
            .zip(self.instances.chunks_exact_mut(FLOATS_PER_INSTANCE))
            .enumerate()
        {
            particle.angle = particle.angle_at(index, elapsed);
            slot.copy_from_slice(particle.transform(index, elapsed).as_slice());
        }
    }

    pub fn particles(&self) -> &[RingParticle] {
        &self.particles
    }

    /// Flat column-major matrices, 16 floats per particle
    pub fn instance_data(&self) -> &[f32] {
        &self.instances
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }
}
