//! # Primitive Shape Generation
//!
//! All shapes are centered at the origin, Y-up, with outward normals and
//! counter-clockwise winding.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a cube with edge length `size` centered at the origin.
///
/// Each face gets its own four vertices so normals stay flat.
pub fn generate_cube(size: f32) -> GeometryData {
    let h = size * 0.5;

    // (normal, u axis, v axis) per face; u x v == normal keeps winding CCW
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut data = GeometryData::new();
    for (normal, u, v) in faces {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            data.vertices.push([
                (normal[0] + u[0] * su + v[0] * sv) * h,
                (normal[1] + u[1] * su + v[1] * sv) * h,
                (normal[2] + u[2] * su + v[2] * sv) * h,
            ]);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere of the given radius.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (min 3)
/// * `latitude_segments` - Number of horizontal segments (min 2)
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 at the north pole
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a plane in the XY plane facing +Z.
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `width_segments` - Subdivisions along X
/// * `height_segments` - Subdivisions along Y
pub fn generate_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let pos_y = (y as f32 / h_segs as f32 - 0.5) * height;
        for x in 0..=w_segs {
            let pos_x = (x as f32 / w_segs as f32 - 0.5) * width;
            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[i + 1, next_row + 1, next_row]);
        }
    }

    data
}

/// Generate a square floor grid on the XZ plane as line-list endpoints.
///
/// Produces `divisions + 1` lines along each axis; the two center lines come
/// first so callers can tint them.
pub fn generate_grid(size: f32, divisions: u32) -> Vec<[f32; 3]> {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;

    let mut offsets: Vec<f32> = (0..=divisions).map(|i| -half + i as f32 * step).collect();
    // center line first
    offsets.sort_by(|a, b| a.abs().total_cmp(&b.abs()));

    let mut lines = Vec::with_capacity(offsets.len() * 4);
    for offset in offsets {
        lines.push([offset, 0.0, -half]);
        lines.push([offset, 0.0, half]);
        lines.push([-half, 0.0, offset]);
        lines.push([half, 0.0, offset]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn face_normal(tri: [[f32; 3]; 3]) -> Vector3<f32> {
        let a = Vector3::from(tri[0]);
        let b = Vector3::from(tri[1]);
        let c = Vector3::from(tri[2]);
        (b - a).cross(c - a)
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube(1.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        for v in &cube.vertices {
            assert!(v.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6));
        }
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let cube = generate_cube(2.0);
        for tri in cube.triangles() {
            let centroid = (Vector3::from(tri[0]) + Vector3::from(tri[1]) + Vector3::from(tri[2])) / 3.0;
            assert!(face_normal(tri).dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 8, 6);
        assert_eq!(sphere.vertices.len(), 9 * 7);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        for v in &sphere.vertices {
            assert!((Vector3::from(*v).magnitude() - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_winding_faces_outward() {
        let sphere = generate_sphere(1.0, 12, 8);
        for tri in sphere.triangles() {
            let n = face_normal(tri);
            if n.magnitude2() < 1e-10 {
                continue; // collapsed pole triangles
            }
            let centroid = (Vector3::from(tri[0]) + Vector3::from(tri[1]) + Vector3::from(tri[2])) / 3.0;
            assert!(n.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9);
        assert_eq!(plane.indices.len(), 24);
        for tri in plane.triangles() {
            assert!(face_normal(tri).z > 0.0);
        }
    }

    #[test]
    fn test_grid_line_count() {
        let grid = generate_grid(10.0, 10);
        assert_eq!(grid.len(), 11 * 4);
        // center lines come first
        assert_eq!(grid[0][0], 0.0);
        assert_eq!(grid[2][2], 0.0);
    }
}
