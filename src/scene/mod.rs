//! Scene description and runtime state
//!
//! [`SystemConfig`] is the static description; [`Scene`] owns everything that
//! changes per frame (orbit angles, ring particles, the sun surface and the
//! starfield) and is the single place other modules resolve a
//! [`BodyHandle`] to a world position.

mod body;
mod registry;
mod sun;
mod system;
mod tuning;

pub use body::{hex, BodyKind, CelestialBody, RingBandConfig, RingMaterial, RingSystem, RockShape};
pub use registry::{BodyHandle, BodyRegistry};
pub use sun::SunSurface;
pub use system::SystemConfig;
pub use tuning::CameraTuning;

use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::math::{Mat4, Vec3};
use crate::orbit::OrbitState;
use crate::particles::{RingField, Starfield};

/// Ring bands of one body, seeded once
pub struct BodyRings {
    pub orientation: Vec3,
    pub bands: Vec<(RingBandConfig, RingField)>,
}

/// Runtime root: the mounted bodies and their animated state
pub struct Scene {
    config: SystemConfig,
    registry: BodyRegistry,
    orbits: Vec<OrbitState>,
    positions: Vec<Vec3>,
    rings: Vec<Option<BodyRings>>,
    sun: SunSurface,
    starfield: Starfield,
    elapsed: f32,
}

impl Scene {
    /// Mount every body of a validated configuration
    pub fn new(config: SystemConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let rings = config
            .bodies
            .iter()
            .map(|body| {
                body.rings.as_ref().map(|system| BodyRings {
                    orientation: system.orientation,
                    bands: system
                        .bands
                        .iter()
                        .map(|band| (band.clone(), RingField::seed(band, &mut rng)))
                        .collect(),
                })
            })
            .collect();

        let starfield = Starfield::seed(config.background_stars, &mut rng);
        let orbits = vec![OrbitState::new(); config.bodies.len()];
        let positions = config
            .bodies
            .iter()
            .zip(&orbits)
            .map(|(body, orbit)| orbit.position(body))
            .collect();

        Self {
            registry: BodyRegistry::new(&config.bodies),
            config,
            orbits,
            positions,
            rings,
            sun: SunSurface::default(),
            starfield,
            elapsed: 0.0,
        }
    }

    /// Orbits, then ring particles, then the sun surface
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);

        for ((body, orbit), position) in self
            .config
            .bodies
            .iter()
            .zip(self.orbits.iter_mut())
            .zip(self.positions.iter_mut())
        {
            *position = orbit.advance(body, dt);
        }

        for rings in self.rings.iter_mut().flatten() {
            for (_, field) in &mut rings.bands {
                field.advance(self.elapsed);
            }
        }

        self.sun.update(self.elapsed);
    }

    pub fn update_starfield(&mut self) {
        self.starfield.update(self.elapsed);
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn tuning(&self) -> &CameraTuning {
        &self.config.camera
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&CelestialBody> {
        self.config.bodies.get(handle.index())
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.config.bodies
    }

    /// Current world position of a mounted body
    pub fn position(&self, handle: BodyHandle) -> Option<Vec3> {
        self.positions.get(handle.index()).copied()
    }

    pub fn orbit(&self, handle: BodyHandle) -> Option<&OrbitState> {
        self.orbits.get(handle.index())
    }

    pub fn approach_distance(&self, handle: BodyHandle) -> Option<f32> {
        self.body(handle).map(|b| self.config.approach_distance(b))
    }

    pub fn sun(&self) -> &SunSurface {
        &self.sun
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn rings(&self, handle: BodyHandle) -> Option<&BodyRings> {
        self.rings.get(handle.index()).and_then(Option::as_ref)
    }

    /// Position and axial tilt of a body, without its spin or size
    pub fn body_frame(&self, handle: BodyHandle) -> Option<Mat4> {
        let body = self.body(handle)?;
        let position = self.position(handle)?;
        let tilt = if body.is_star() {
            self.sun.tilt_x
        } else {
            body.tilt_radians()
        };
        Some(Mat4::translation(position).mul(&Mat4::rotation_x(tilt)))
    }

    /// Model matrix for a body's sphere mesh (unit radius, scaled by size)
    pub fn body_model(&self, handle: BodyHandle) -> Option<Mat4> {
        let frame = self.body_frame(handle)?;
        let body = self.body(handle)?;
        let spin = self.orbit(handle)?.spin;
        Some(frame.mul(&Mat4::compose(Vec3::ZERO, Vec3::new(0.0, spin, 0.0), body.size)))
    }

    /// Frame the ring instances of a body are expressed in
    pub fn ring_frame(&self, handle: BodyHandle) -> Option<Mat4> {
        let rings = self.rings(handle)?;
        Some(self.body_frame(handle)?.mul(&Mat4::from_euler(rings.orientation)))
    }

    /// Emissive colour of a body this frame
    pub fn emissive(&self, handle: BodyHandle) -> Option<Vec3> {
        let body = self.body(handle)?;
        Some(if body.is_star() { self.sun.emissive() } else { body.emissive })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SystemConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::ORBIT_PLANE_HEIGHT;

    fn small_scene() -> Scene {
        let mut config = SystemConfig::default();
        config.background_stars = 16;
        Scene::new(config)
    }

    #[test]
    fn test_mounts_every_body() {
        let scene = small_scene();
        assert_eq!(scene.bodies().len(), 10);
        assert_eq!(scene.registry().len(), 10);
        let earth = scene.registry().lookup("earth").unwrap();
        assert_eq!(scene.position(earth), Some(Vec3::new(8.0, ORBIT_PLANE_HEIGHT, 0.0)));
    }

    #[test]
    fn test_advance_moves_planets_not_star() {
        let mut scene = small_scene();
        let sun = scene.registry().star().unwrap();
        let mars = scene.registry().lookup("Mars").unwrap();
        let before = scene.position(mars).unwrap();

        scene.advance(0.5);

        assert_eq!(scene.position(sun), Some(Vec3::new(0.0, ORBIT_PLANE_HEIGHT, 0.0)));
        assert_ne!(scene.position(mars), Some(before));
        assert!((scene.elapsed() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rings_seeded_for_ringed_planets() {
        let scene = small_scene();
        let saturn = scene.registry().lookup("saturn").unwrap();
        let earth = scene.registry().lookup("earth").unwrap();

        let rings = scene.rings(saturn).unwrap();
        assert_eq!(rings.bands.len(), 10);
        assert_eq!(rings.bands[0].1.count(), 400);
        assert!(scene.rings(earth).is_none());
        assert!(scene.ring_frame(earth).is_none());
    }

    #[test]
    fn test_same_seed_same_rings() {
        let a = small_scene();
        let b = small_scene();
        let uranus = a.registry().lookup("uranus").unwrap();
        assert_eq!(
            a.rings(uranus).unwrap().bands[0].1.instance_data(),
            b.rings(uranus).unwrap().bands[0].1.instance_data()
        );
    }

    #[test]
    fn test_body_model_places_sphere() {
        let scene = small_scene();
        let jupiter = scene.registry().lookup("jupiter").unwrap();
        let model = scene.body_model(jupiter).unwrap();
        let centre = model.transform_point(Vec3::ZERO);
        assert!(centre.distance(&scene.position(jupiter).unwrap()) < 1e-5);
    }

    #[test]
    fn test_unknown_handle() {
        let scene = small_scene();
        assert_eq!(scene.position(BodyHandle(42)), None);
        assert!(scene.body_model(BodyHandle(42)).is_none());
    }
}
