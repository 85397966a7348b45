use crate::math::Vec3;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Layout: position(3) + normal(3) = 6 floats
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
        ]
    }
}

/// Floats per vertex in [`Mesh::vertex_data`]
pub const VERTEX_STRIDE: usize = 6;

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Flat triangle with its own face normal
    pub fn add_facet(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(&(c - a)).normalize();
        let start = self.add_vertices([a, b, c].map(|p| Vertex::new(p, normal)));
        self.add_triangle(start, start + 1, start + 2);
    }

    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Largest vertex distance from the origin
    pub fn radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position.length())
            .fold(0.0, f32::max)
    }
}

/// Closed polyline drawn as a line loop
#[derive(Debug, Clone, Default)]
pub struct LineLoop {
    pub points: Vec<Vec3>,
}

impl LineLoop {
    /// Layout: position(3) per point
    pub fn vertex_data(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.to_array()).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::UP);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_quad_is_two_triangles() {
        let mut mesh = Mesh::new();
        let start = mesh.add_vertices((0..4).map(|i| Vertex::new(Vec3::new(i as f32, 0.0, 0.0), Vec3::UP)));
        mesh.add_quad(start, start + 1, start + 2, start + 3);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.index_data(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_facet_normal() {
        let mut mesh = Mesh::new();
        mesh.add_facet(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(mesh.vertices[0].normal.distance(&Vec3::UP) < 1e-6);
        assert_eq!(mesh.vertex_data().len(), 3 * VERTEX_STRIDE);
    }
}
