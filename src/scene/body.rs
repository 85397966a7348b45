use serde::Deserialize;
use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    #[default]
    Planet,
}

/// Static description of one celestial body
#[derive(Debug, Clone, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    #[serde(default)]
    pub kind: BodyKind,
    /// Orbital radius around the system centre
    #[serde(default)]
    pub distance: f32,
    /// Relative angular speed (scaled by the orbit model)
    #[serde(default)]
    pub speed: f32,
    /// Sphere radius
    pub size: f32,
    #[serde(default)]
    pub tilt_degrees: f32,
    pub color: Vec3,
    /// Premultiplied emissive colour
    #[serde(default)]
    pub emissive: Vec3,
    /// How far the camera parks from this body when focusing it
    #[serde(default)]
    pub approach_distance: Option<f32>,
    #[serde(default)]
    pub rings: Option<RingSystem>,
}

impl CelestialBody {
    pub fn planet(name: &str, distance: f32, size: f32, speed: f32, tilt_degrees: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: BodyKind::Planet,
            distance,
            speed,
            size,
            tilt_degrees,
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            approach_distance: None,
            rings: None,
        }
    }

    pub fn star(name: &str, size: f32) -> Self {
        Self {
            kind: BodyKind::Star,
            ..Self::planet(name, 0.0, size, 0.0, 0.0)
        }
    }

    pub fn with_color(mut self, color: Vec3, emissive: Vec3) -> Self {
        self.color = color;
        self.emissive = emissive;
        self
    }

    pub fn with_approach_distance(mut self, distance: f32) -> Self {
        self.approach_distance = Some(distance);
        self
    }

    pub fn with_rings(mut self, rings: RingSystem) -> Self {
        self.rings = Some(rings);
        self
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    pub fn tilt_radians(&self) -> f32 {
        self.tilt_degrees.to_radians()
    }
}

/// Layered particle rings attached to a body, in body-local units
#[derive(Debug, Clone, Deserialize)]
pub struct RingSystem {
    /// Euler rotation of the ring plane relative to the body
    #[serde(default)]
    pub orientation: Vec3,
    pub bands: Vec<RingBandConfig>,
}

/// One contiguous band of identically shaped and shaded particles
#[derive(Debug, Clone, Deserialize)]
pub struct RingBandConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub particle_count: usize,
    pub geometry: RockShape,
    pub material: RingMaterial,
}

impl RingBandConfig {
    pub fn new(inner_radius: f32, outer_radius: f32, particle_count: usize, geometry: RockShape, material: RingMaterial) -> Self {
        Self {
            inner_radius,
            outer_radius,
            particle_count,
            geometry,
            material,
        }
    }
}

/// Base geometry shared by every particle of a band
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RockShape {
    Icosahedron { radius: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RingMaterial {
    pub color: Vec3,
    #[serde(default = "opaque")]
    pub opacity: f32,
    #[serde(default)]
    pub emissive: Vec3,
}

fn opaque() -> f32 {
    1.0
}

impl RingMaterial {
    pub const fn new(color: Vec3, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            emissive: Vec3::ZERO,
        }
    }

    pub const fn glowing(color: Vec3, opacity: f32, emissive: Vec3) -> Self {
        Self { color, opacity, emissive }
    }
}

/// `0xRRGGBB` to a linear-ish colour vector
pub fn hex(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_channels() {
        let c = hex(0xff8000);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn test_tilt_conversion() {
        let earth = CelestialBody::planet("Earth", 8.0, 0.35, 1.2, 180.0);
        assert!((earth.tilt_radians() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_star_builder() {
        let sun = CelestialBody::star("Sun", 1.5).with_approach_distance(8.0);
        assert!(sun.is_star());
        assert_eq!(sun.distance, 0.0);
        assert_eq!(sun.approach_distance, Some(8.0));
    }

    #[test]
    fn test_rock_shape_yaml() {
        let shape: RockShape = serde_yaml::from_str("{ shape: box, width: 1.0, height: 0.8, depth: 1.2 }").unwrap();
        assert_eq!(shape, RockShape::Box { width: 1.0, height: 0.8, depth: 1.2 });
    }

    #[test]
    fn test_material_default_opacity() {
        let m: RingMaterial = serde_yaml::from_str("color: [1.0, 1.0, 1.0]").unwrap();
        assert_eq!(m.opacity, 1.0);
        assert_eq!(m.emissive, Vec3::ZERO);
    }
}
