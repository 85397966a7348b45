use crate::math::Vec3;
use crate::scene::{BodyHandle, Scene};

/// Smallest pick sphere, so tiny bodies stay clickable
const MIN_PICK_RADIUS: f32 = 0.3;
/// Pick spheres are a little larger than the rendered body
const PICK_RADIUS_SCALE: f32 = 1.5;

/// A clickable sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    pub handle: BodyHandle,
    pub center: Vec3,
    pub radius: f32,
}

/// Information about a ray-body intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub handle: BodyHandle,
    pub distance: f32,
    pub hit_point: Vec3,
}

/// Eye position, look-at point and lens of the camera a click came through
#[derive(Debug, Clone, Copy)]
pub struct PickCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view, radians
    pub fov: f32,
    pub aspect: f32,
}

/// Ray-based picking for selecting bodies
#[derive(Debug, Default)]
pub struct RayPicker {
    targets: Vec<PickTarget>,
}

impl RayPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh pick spheres from the current body positions
    pub fn sync(&mut self, scene: &Scene) {
        self.targets.clear();
        for handle in scene.registry().handles() {
            if let (Some(body), Some(center)) = (scene.body(handle), scene.position(handle)) {
                self.targets.push(PickTarget {
                    handle,
                    center,
                    radius: (body.size * PICK_RADIUS_SCALE).max(MIN_PICK_RADIUS),
                });
            }
        }
    }

    pub fn set_targets(&mut self, targets: Vec<PickTarget>) {
        self.targets = targets;
    }

    pub fn targets(&self) -> &[PickTarget] {
        &self.targets
    }

    /// Cast a ray from screen coordinates and find the closest hit
    pub fn pick(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        camera: &PickCamera,
    ) -> Option<HitInfo> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);
        let ray_dir = screen_to_world_ray(ndc_x, ndc_y, camera);

        self.targets
            .iter()
            .filter_map(|target| {
                ray_sphere_intersect(camera.position, ray_dir, target.center, target.radius).map(|dist| HitInfo {
                    handle: target.handle,
                    distance: dist,
                    hit_point: camera.position + ray_dir.scale(dist),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// World-space direction through a point in normalized device coordinates
fn screen_to_world_ray(ndc_x: f32, ndc_y: f32, camera: &PickCamera) -> Vec3 {
    let forward = (camera.target - camera.position).normalize();
    let right = forward.cross(&Vec3::UP).normalize();
    let up = right.cross(&forward);

    let half_height = (camera.fov / 2.0).tan();
    let half_width = half_height * camera.aspect;

    (forward + right.scale(ndc_x * half_width) + up.scale(ndc_y * half_height)).normalize()
}

/// Distance along the ray to the first sphere hit in front of the origin
fn ray_sphere_intersect(ray_origin: Vec3, ray_dir: Vec3, sphere_center: Vec3, sphere_radius: f32) -> Option<f32> {
    let oc = ray_origin - sphere_center;

    let a = ray_dir.dot(&ray_dir);
    let b = 2.0 * oc.dot(&ray_dir);
    let c = oc.dot(&oc) - sphere_radius * sphere_radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if t > 0.0 {
        return Some(t);
    }
    let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
    (t2 > 0.0).then_some(t2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SystemConfig;

    fn looking_at(target: Vec3) -> PickCamera {
        PickCamera {
            position: Vec3::new(0.0, 25.0, 50.0),
            target,
            fov: 45f32.to_radians(),
            aspect: 16.0 / 9.0,
        }
    }

    #[test]
    fn test_ray_sphere_hit() {
        let dist = ray_sphere_intersect(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO, 1.0);
        assert!((dist.unwrap() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_sphere_miss() {
        assert!(ray_sphere_intersect(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, 1.0).is_none());
        assert!(ray_sphere_intersect(Vec3::new(5.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_centre_ray_points_forward() {
        let camera = looking_at(Vec3::new(0.0, 8.0, 0.0));
        let dir = screen_to_world_ray(0.0, 0.0, &camera);
        let forward = (camera.target - camera.position).normalize();
        assert!(dir.distance(&forward) < 1e-5);
    }

    #[test]
    fn test_pick_body_under_screen_centre() {
        let mut config = SystemConfig::default();
        config.background_stars = 4;
        let scene = Scene::new(config);
        let mut picker = RayPicker::new();
        picker.sync(&scene);
        assert_eq!(picker.targets().len(), 10);

        let earth = scene.registry().lookup("earth").unwrap();
        let camera = looking_at(scene.position(earth).unwrap());
        let hit = picker.pick(640.0, 360.0, 1280.0, 720.0, &camera).unwrap();
        assert_eq!(hit.handle, earth);
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut picker = RayPicker::new();
        picker.set_targets(vec![
            PickTarget { handle: BodyHandle(1), center: Vec3::new(0.0, 8.0, 0.0), radius: 1.0 },
            PickTarget { handle: BodyHandle(2), center: Vec3::new(0.0, 16.5, 25.0), radius: 1.0 },
        ]);
        let camera = looking_at(Vec3::new(0.0, 8.0, 0.0));
        let hit = picker.pick(400.0, 300.0, 800.0, 600.0, &camera).unwrap();
        assert_eq!(hit.handle, BodyHandle(2));
    }

    #[test]
    fn test_empty_space_misses() {
        let mut picker = RayPicker::new();
        picker.set_targets(vec![PickTarget { handle: BodyHandle(0), center: Vec3::ZERO, radius: 0.5 }]);
        let camera = looking_at(Vec3::new(0.0, 8.0, 0.0));
        assert!(picker.pick(0.0, 0.0, 800.0, 600.0, &camera).is_none());
        assert!(picker.pick(10.0, 10.0, 0.0, 0.0, &camera).is_none());
    }
}
