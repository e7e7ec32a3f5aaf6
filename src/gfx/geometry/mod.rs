//! # Procedural Geometry Generation
//!
//! Generates the meshes the editor needs without any model files:
//!
//! - **Cube**: box centered at the origin
//! - **Sphere**: UV sphere with configurable resolution
//! - **Plane**: flat XY plane facing +Z
//! - **Grid**: line-list floor grid helper
//! - **Line tube**: polyline swept into a tube, used for pen strokes
//!
//! ## Usage
//!
//! ```rust
//! use sketchbox::gfx::geometry::{generate_cube, generate_sphere, build_line_mesh};
//!
//! let cube = generate_cube(1.0);
//! let sphere = generate_sphere(0.5, 32, 16);
//! let stroke = build_line_mesh(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0], 6, |_| 0.02);
//! assert_eq!(stroke.triangle_count(), 12);
//! ```

pub mod line_mesh;
pub mod primitives;

pub use line_mesh::build_line_mesh;
pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Triangle geometry ready for GPU upload and ray queries.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}
