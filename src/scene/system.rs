//! Solar-system description: the body table plus camera tuning
//!
//! `SystemConfig::default()` is the builtin Sol system. Custom systems load
//! from YAML through [`SystemConfig::from_yaml`] and are validated before any
//! runtime state is built from them.

use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;
use serde::Deserialize;
use super::body::{hex, CelestialBody, RingBandConfig, RingMaterial, RingSystem, RockShape};
use super::tuning::CameraTuning;
use crate::error::ConfigError;
use crate::math::Vec3;
use crate::particles::DEFAULT_STAR_COUNT;

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub bodies: Vec<CelestialBody>,
    #[serde(default)]
    pub camera: CameraTuning,
    /// Seed for ring and starfield generation
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_background_stars")]
    pub background_stars: usize,
}

fn default_name() -> String {
    "Unnamed system".to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_background_stars() -> usize {
    DEFAULT_STAR_COUNT
}

impl SystemConfig {
    /// Parse and validate a YAML system description
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SystemConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::Empty);
        }

        let stars = self.bodies.iter().filter(|b| b.is_star()).count();
        if stars != 1 {
            return Err(ConfigError::StarCount(stars));
        }

        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.name.to_lowercase()) {
                return Err(ConfigError::DuplicateBody(body.name.clone()));
            }
            validate_body(body)?;
        }

        Ok(())
    }

    pub fn star(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.is_star())
    }

    /// Approach distance for a body, falling back to the tuning default
    pub fn approach_distance(&self, body: &CelestialBody) -> f32 {
        body.approach_distance
            .unwrap_or(self.camera.default_approach_distance)
    }
}

fn invalid(body: &CelestialBody, reason: &str) -> ConfigError {
    ConfigError::InvalidBody {
        name: body.name.clone(),
        reason: reason.to_string(),
    }
}

fn validate_body(body: &CelestialBody) -> Result<(), ConfigError> {
    if body.name.trim().is_empty() {
        return Err(invalid(body, "name must not be empty"));
    }
    // Checks are negated so NaN fails them
    let numbers = [body.distance, body.speed, body.size, body.tilt_degrees];
    if !numbers.iter().all(|v| v.is_finite()) {
        return Err(invalid(body, "orbit values must be finite numbers"));
    }
    if !(body.size > 0.0) {
        return Err(invalid(body, "size must be positive"));
    }
    if !body.is_star() && !(body.distance > 0.0) {
        return Err(invalid(body, "planet distance must be positive"));
    }
    if !(body.speed >= 0.0) {
        return Err(invalid(body, "speed must not be negative"));
    }
    if matches!(body.approach_distance, Some(d) if !(d > 0.0 && d.is_finite())) {
        return Err(invalid(body, "approach distance must be positive"));
    }

    if let Some(rings) = &body.rings {
        for (index, band) in rings.bands.iter().enumerate() {
            if !(band.inner_radius >= 0.0 && band.inner_radius <= band.outer_radius && band.outer_radius.is_finite()) {
                return Err(ConfigError::RingBounds {
                    body: body.name.clone(),
                    band: index,
                    inner: band.inner_radius,
                    outer: band.outer_radius,
                });
            }
            if band.particle_count == 0 {
                return Err(invalid(body, "ring band needs at least one particle"));
            }
        }
    }

    Ok(())
}

impl Default for SystemConfig {
    fn default() -> Self {
        let bodies = vec![
            CelestialBody::star("Sun", 1.5)
                .with_color(hex(0xffaa33), hex(0xff6600).scale(4.0))
                .with_approach_distance(8.0),
            CelestialBody::planet("Mercury", 4.0, 0.2, 2.0, 0.0)
                .with_color(hex(0x9a8f87), dim_of(0x221100, 0.05))
                .with_approach_distance(2.5),
            CelestialBody::planet("Venus", 6.0, 0.3, 1.6, 177.4)
                .with_color(hex(0xe3c08a), dim_of(0x332200, 0.08))
                .with_approach_distance(3.5),
            CelestialBody::planet("Earth", 8.0, 0.35, 1.2, 23.4)
                .with_color(hex(0x2f6fd0), dim_of(0x001122, 0.03))
                .with_approach_distance(4.2),
            CelestialBody::planet("Mars", 10.0, 0.25, 1.0, 25.0)
                .with_color(hex(0xc1502e), dim_of(0x220000, 0.04))
                .with_approach_distance(3.0),
            CelestialBody::planet("Jupiter", 13.0, 0.9, 0.7, 3.1)
                .with_color(hex(0xd8b48a), dim_of(0x221100, 0.02))
                .with_approach_distance(10.8),
            CelestialBody::planet("Saturn", 16.0, 0.8, 0.5, 26.7)
                .with_color(hex(0xfab95b), dim_of(0x221100, 0.02))
                .with_approach_distance(9.6)
                .with_rings(saturn_rings()),
            CelestialBody::planet("Uranus", 20.0, 0.6, 0.3, 97.8)
                .with_color(hex(0x4fd0e7), dim_of(0x001122, 0.02))
                .with_approach_distance(7.2)
                .with_rings(uranus_rings()),
            CelestialBody::planet("Neptune", 24.0, 0.6, 0.2, 28.3)
                .with_color(hex(0x4b70dd), dim_of(0x000022, 0.02))
                .with_approach_distance(7.2)
                .with_rings(neptune_rings()),
            CelestialBody::planet("Pluto", 28.0, 0.1, 0.1, 122.5)
                .with_color(hex(0xc9b08f), Vec3::ZERO)
                .with_approach_distance(1.2),
        ];

        Self {
            name: "Sol".to_string(),
            bodies,
            camera: CameraTuning::default(),
            seed: default_seed(),
            background_stars: DEFAULT_STAR_COUNT,
        }
    }
}

fn ico(radius: f32) -> RockShape {
    RockShape::Icosahedron { radius }
}

fn cube(width: f32, height: f32, depth: f32) -> RockShape {
    RockShape::Box { width, height, depth }
}

fn ball(radius: f32) -> RockShape {
    RockShape::Sphere { radius }
}

/// Ice through brown rock, C ring outward to the A ring
fn saturn_rings() -> RingSystem {
    const INNER: f32 = 0.7;
    let ice = RingMaterial::new(hex(0xffffff), 0.95);
    let light_ice = RingMaterial::new(hex(0xf8f8f0), 0.92);
    let yellow = RingMaterial::new(hex(0xe6d68a), 0.9);
    let light_brown = RingMaterial::new(hex(0xc4a373), 0.88);
    let brown = RingMaterial::new(hex(0x8b6f47), 0.85);

    let band = |from: f32, to: f32, count: usize, shape: RockShape, material: RingMaterial| {
        RingBandConfig::new(INNER + from, INNER + to, count, shape, material)
    };

    RingSystem {
        orientation: Vec3::new(FRAC_PI_2 + 0.4, 0.0, 0.2),
        bands: vec![
            band(0.0, 0.3, 400, ico(1.0), ice),
            band(0.1, 0.4, 300, ico(1.0), light_ice),
            band(0.35, 0.45, 150, ico(0.8), ice),
            band(0.5, 0.8, 600, ico(1.2), light_ice),
            band(0.6, 0.9, 800, cube(1.0, 0.8, 1.2), yellow),
            band(0.8, 1.2, 1000, cube(0.7, 1.1, 0.9), yellow),
            band(1.0, 1.4, 900, cube(1.3, 0.6, 1.0), light_brown),
            band(1.3, 1.7, 700, cube(0.9, 1.4, 0.8), light_brown),
            band(1.6, 2.0, 800, cube(0.8, 1.2, 0.7), brown),
            band(1.8, 2.2, 550, cube(1.1, 0.9, 1.3), brown),
        ],
    }
}

/// Thin dark organic rings, epsilon the densest
fn uranus_rings() -> RingSystem {
    const INNER: f32 = 0.72;
    let dark = RingMaterial::glowing(hex(0x3a3a3a), 0.95, dim_of(0x151515, 0.15));
    let very_dark = RingMaterial::glowing(hex(0x2f2f2f), 0.85, dim_of(0x0a0a0a, 0.1));
    let faint = RingMaterial::glowing(hex(0x252525), 0.7, dim_of(0x080808, 0.06));

    let band = |from: f32, to: f32, count: usize, shape: RockShape, material: RingMaterial| {
        RingBandConfig::new(INNER + from, INNER + to, count, shape, material)
    };

    RingSystem {
        orientation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        bands: vec![
            band(0.12, 0.14, 400, ico(0.2), dark),
            band(0.08, 0.09, 180, cube(0.15, 0.05, 0.2), very_dark),
            band(0.05, 0.06, 120, ball(0.1), faint),
            band(0.02, 0.03, 90, cube(0.08, 0.03, 0.12), faint),
            band(-0.02, -0.01, 80, ico(0.2), very_dark),
        ],
    }
}

/// Faint reddish arcs, Adams outermost
fn neptune_rings() -> RingSystem {
    const INNER: f32 = 0.68;
    const OUTER: f32 = 0.85;
    let adams = RingMaterial::glowing(hex(0x4a3f3a), 0.8, dim_of(0x252015, 0.12));
    let le_verrier = RingMaterial::glowing(hex(0x3a322f), 0.6, dim_of(0x15120f, 0.08));
    let galle = RingMaterial::glowing(hex(0x2f2a27), 0.45, dim_of(0x0f0d0a, 0.05));

    let band = |from: f32, to: f32, count: usize, shape: RockShape, material: RingMaterial| {
        RingBandConfig::new(INNER + from, INNER + to, count, shape, material)
    };

    RingSystem {
        orientation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        bands: vec![
            RingBandConfig::new(OUTER - 0.03, OUTER - 0.01, 280, ball(0.15), adams),
            band(0.12, 0.14, 180, ico(0.12), le_verrier),
            band(0.04, 0.1, 150, cube(0.08, 0.04, 0.12), galle),
            band(0.08, 0.09, 90, ball(0.06), galle),
            band(0.06, 0.07, 70, cube(0.08, 0.04, 0.12), galle),
        ],
    }
}

fn dim_of(rgb: u32, intensity: f32) -> Vec3 {
    hex(rgb).scale(intensity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_system_is_valid() {
        let sol = SystemConfig::default();
        sol.validate().unwrap();
        assert_eq!(sol.bodies.len(), 10);
        assert_eq!(sol.star().map(|s| s.name.as_str()), Some("Sun"));
    }

    #[test]
    fn test_builtin_ring_tables() {
        let sol = SystemConfig::default();
        let bands = |name: &str| {
            sol.bodies.iter()
                .find(|b| b.name == name)
                .and_then(|b| b.rings.as_ref())
                .map(|r| r.bands.len())
        };
        assert_eq!(bands("Saturn"), Some(10));
        assert_eq!(bands("Uranus"), Some(5));
        assert_eq!(bands("Neptune"), Some(5));
        assert_eq!(bands("Earth"), None);
    }

    #[test]
    fn test_approach_distance_fallback() {
        let mut sol = SystemConfig::default();
        let earth = sol.bodies[3].clone();
        assert_eq!(sol.approach_distance(&earth), 4.2);

        sol.bodies[3].approach_distance = None;
        let earth = sol.bodies[3].clone();
        assert_eq!(sol.approach_distance(&earth), 5.0);
    }

    #[test]
    fn test_custom_system_from_yaml() {
        let yaml = r#"
name: Binary test
bodies:
  - name: Vega
    kind: star
    size: 2.0
    color: [1.0, 1.0, 0.9]
  - name: Rockball
    distance: 6.0
    speed: 0.8
    size: 0.4
    tilt_degrees: 12.0
    color: [0.5, 0.4, 0.3]
    rings:
      bands:
        - inner_radius: 0.6
          outer_radius: 0.9
          particle_count: 50
          geometry: { shape: icosahedron, radius: 1.0 }
          material: { color: [1.0, 1.0, 1.0], opacity: 0.9 }
camera:
  follow_gain: 4.0
"#;
        let config = SystemConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, "Binary test");
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.camera.follow_gain, 4.0);
        assert_eq!(config.camera.max_lerp_factor, 0.15);
        assert_eq!(config.seed, 42);
        assert_eq!(config.background_stars, DEFAULT_STAR_COUNT);

        let rings = config.bodies[1].rings.as_ref().unwrap();
        assert_eq!(rings.orientation, Vec3::ZERO);
        assert_eq!(rings.bands[0].particle_count, 50);
    }

    #[test]
    fn test_rejects_empty_and_starless() {
        assert!(matches!(
            SystemConfig::from_yaml("bodies: []"),
            Err(ConfigError::Empty)
        ));

        let yaml = "bodies:\n  - { name: A, distance: 3.0, size: 1.0, color: [1, 1, 1] }\n";
        assert!(matches!(
            SystemConfig::from_yaml(yaml),
            Err(ConfigError::StarCount(0))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names_case_insensitively() {
        let mut sol = SystemConfig::default();
        sol.bodies.push(CelestialBody::planet("EARTH", 30.0, 0.3, 0.1, 0.0));
        assert!(matches!(
            sol.validate(),
            Err(ConfigError::DuplicateBody(name)) if name == "EARTH"
        ));
    }

    #[test]
    fn test_rejects_inverted_ring_band() {
        let mut sol = SystemConfig::default();
        if let Some(rings) = sol.bodies[6].rings.as_mut() {
            rings.bands[2].outer_radius = 0.1;
        }
        assert!(matches!(
            sol.validate(),
            Err(ConfigError::RingBounds { band: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        let ghosts = [
            "{ name: Ghost, distance: 5.0, size: 0.3, speed: .nan, color: [1.0, 1.0, 1.0] }",
            "{ name: Ghost, distance: 5.0, size: 0.3, tilt_degrees: .nan, color: [1.0, 1.0, 1.0] }",
            "{ name: Ghost, distance: .inf, size: 0.3, color: [1.0, 1.0, 1.0] }",
            "{ name: Ghost, distance: 5.0, size: 0.3, approach_distance: .nan, color: [1.0, 1.0, 1.0] }",
        ];
        for ghost in ghosts {
            let yaml = format!(
                "bodies:\n  - {{ name: Sun, kind: star, size: 1.0, color: [1.0, 1.0, 1.0] }}\n  - {}\n",
                ghost
            );
            let result = SystemConfig::from_yaml(&yaml);
            assert!(matches!(result, Err(ConfigError::InvalidBody { .. })), "accepted {}", ghost);
        }

        let mut sol = SystemConfig::default();
        if let Some(rings) = sol.bodies[6].rings.as_mut() {
            rings.bands[0].inner_radius = f32::NAN;
        }
        assert!(matches!(sol.validate(), Err(ConfigError::RingBounds { .. })));
    }

    #[test]
    fn test_rejects_planet_without_distance() {
        let mut sol = SystemConfig::default();
        sol.bodies[1].distance = 0.0;
        assert!(matches!(sol.validate(), Err(ConfigError::InvalidBody { .. })));
    }
}
