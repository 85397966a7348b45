pub mod geometry;
pub mod shapes;

pub use geometry::{LineLoop, Mesh, Vertex, VERTEX_STRIDE};
pub use shapes::{cuboid, icosahedron, orbit_loop, rock_mesh, uv_sphere};
