//! Procedural geometry for bodies, ring rocks and orbit guides

use std::f32::consts::{PI, TAU};
use super::geometry::{LineLoop, Mesh, Vertex};
use crate::math::Vec3;
use crate::orbit::ORBIT_PLANE_HEIGHT;
use crate::scene::RockShape;

/// Smooth unit-normal sphere
pub fn uv_sphere(radius: f32, segments: usize, rings: usize) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = Mesh::new();

    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        for seg in 0..=segments {
            let theta = seg as f32 / segments as f32 * TAU;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex::new(normal.scale(radius), normal));
        }
    }

    let row = segments as u32 + 1;
    for ring in 0..rings as u32 {
        for seg in 0..segments as u32 {
            let a = ring * row + seg;
            let b = a + row;
            mesh.add_quad(a, a + 1, b + 1, b);
        }
    }

    mesh
}

/// Faceted icosahedron (detail 0)
pub fn icosahedron(radius: f32) -> Mesh {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let corners = [
        (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
        (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
        (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
    ]
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize().scale(radius));

    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    let mut mesh = Mesh::new();
    for [a, b, c] in FACES {
        mesh.add_facet(corners[a], corners[b], corners[c]);
    }
    mesh
}

/// Axis-aligned box centred on the origin
pub fn cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut mesh = Mesh::new();

    // normal, then the two in-face axes scaled to the half extents
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -hz), Vec3::new(0.0, hy, 0.0), hx),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, hz), Vec3::new(0.0, hy, 0.0), hx),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(hx, 0.0, 0.0), Vec3::new(0.0, 0.0, -hz), hy),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(hx, 0.0, 0.0), Vec3::new(0.0, 0.0, hz), hy),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(hx, 0.0, 0.0), Vec3::new(0.0, hy, 0.0), hz),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-hx, 0.0, 0.0), Vec3::new(0.0, hy, 0.0), hz),
    ];

    for (normal, u, v, extent) in faces {
        let centre = normal.scale(extent);
        let start = mesh.add_vertices(
            [centre - u - v, centre + u - v, centre + u + v, centre - u + v]
                .map(|p| Vertex::new(p, normal)),
        );
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }

    mesh
}

/// Base geometry for one ring band
pub fn rock_mesh(shape: &RockShape) -> Mesh {
    match *shape {
        RockShape::Icosahedron { radius } => icosahedron(radius),
        RockShape::Box { width, height, depth } => cuboid(width, height, depth),
        RockShape::Sphere { radius } => uv_sphere(radius, 6, 4),
    }
}

/// Circle in the orbital plane, `scale` stretching it horizontally
pub fn orbit_loop(distance: f32, segments: usize, scale: f32) -> LineLoop {
    let segments = segments.max(3);
    LineLoop {
        points: (0..segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * TAU;
                Vec3::from_polar(distance * scale, theta, ORBIT_PLANE_HEIGHT)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = uv_sphere(2.0, 16, 8);
        assert_eq!(mesh.vertex_count(), 17 * 9);
        assert_eq!(mesh.triangle_count(), 16 * 8 * 2);
        for v in &mesh.vertices {
            assert!((v.position.length() - 2.0).abs() < 1e-4);
            assert!((v.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_icosahedron_shape() {
        let mesh = icosahedron(1.0);
        assert_eq!(mesh.triangle_count(), 20);
        assert!((mesh.radius() - 1.0).abs() < 1e-5);
        for v in &mesh.vertices {
            // face normals point outward
            assert!(v.normal.dot(&v.position) > 0.0);
        }
    }

    #[test]
    fn test_cuboid_extents() {
        let mesh = cuboid(1.0, 0.8, 1.2);
        assert_eq!(mesh.triangle_count(), 12);
        let max_x = mesh.vertices.iter().map(|v| v.position.x).fold(f32::MIN, f32::max);
        let max_y = mesh.vertices.iter().map(|v| v.position.y).fold(f32::MIN, f32::max);
        let max_z = mesh.vertices.iter().map(|v| v.position.z).fold(f32::MIN, f32::max);
        assert!((max_x - 0.5).abs() < 1e-6);
        assert!((max_y - 0.4).abs() < 1e-6);
        assert!((max_z - 0.6).abs() < 1e-6);
        for v in &mesh.vertices {
            assert!(v.normal.dot(&v.position) > 0.0);
        }
    }

    #[test]
    fn test_rock_mesh_dispatch() {
        assert_eq!(rock_mesh(&RockShape::Icosahedron { radius: 0.2 }).triangle_count(), 20);
        assert_eq!(rock_mesh(&RockShape::Box { width: 1.0, height: 1.0, depth: 1.0 }).triangle_count(), 12);
        assert!(rock_mesh(&RockShape::Sphere { radius: 0.1 }).vertex_count() > 0);
    }

    #[test]
    fn test_orbit_loop() {
        let line = orbit_loop(16.0, 128, 1.0);
        assert_eq!(line.len(), 128);
        for p in &line.points {
            assert!((p.radial_xz() - 16.0).abs() < 1e-3);
            assert_eq!(p.y, ORBIT_PLANE_HEIGHT);
        }
        let glow = orbit_loop(16.0, 128, 1.002);
        assert!((glow.points[0].x - 16.032).abs() < 1e-3);
    }
}
