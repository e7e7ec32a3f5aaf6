//! Polyline tube meshes for pen strokes.
//!
//! A stroke is a flat list of coordinates `[x0, y0, z0, x1, y1, z1, ...]`.
//! Each point gets a ring of vertices perpendicular to the local tangent and
//! consecutive rings are stitched with quads. Ring frames are carried along
//! the line by parallel transport so the tube does not twist.

use cgmath::{InnerSpace, Vector3, Zero};

use super::GeometryData;

/// Radial segments used for pen strokes.
pub const STROKE_RADIAL_SEGMENTS: u32 = 6;

/// Builds a tube around the polyline in `points`.
///
/// `thickness` receives the normalized position along the line (0 at the
/// first point, 1 at the last) and returns the full width at that point; the
/// tube radius is half of it. A single point yields one ring and no
/// triangles. Trailing coordinates that do not form a full point are
/// ignored.
pub fn build_line_mesh<F>(points: &[f32], radial_segments: u32, thickness: F) -> GeometryData
where
    F: Fn(f32) -> f32,
{
    let points: Vec<Vector3<f32>> = points
        .chunks_exact(3)
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();
    let radial = radial_segments.max(3);

    let mut data = GeometryData::new();
    if points.is_empty() {
        return data;
    }

    let last = points.len() - 1;
    let mut tangent = Vector3::unit_x();
    let mut normal = perpendicular(tangent);

    for (i, point) in points.iter().enumerate() {
        let ahead = points[(i + 1).min(last)];
        let behind = points[i.saturating_sub(1)];
        let direction = ahead - behind;
        if direction.magnitude2() > f32::EPSILON {
            tangent = direction.normalize();
        }

        // transport the previous normal onto the plane of the new tangent
        let projected = normal - tangent * normal.dot(tangent);
        normal = if projected.magnitude2() > 1e-8 {
            projected.normalize()
        } else {
            perpendicular(tangent)
        };
        let binormal = tangent.cross(normal);

        let t = if last == 0 { 0.0 } else { i as f32 / last as f32 };
        let radius = thickness(t) * 0.5;

        for r in 0..radial {
            let angle = r as f32 / radial as f32 * std::f32::consts::TAU;
            let offset = normal * angle.cos() + binormal * angle.sin();
            let position = point + offset * radius;
            data.vertices.push(position.into());
            data.normals.push(offset.into());
        }
    }

    for segment in 0..last as u32 {
        let ring = segment * radial;
        let next_ring = ring + radial;
        for r in 0..radial {
            let r_next = (r + 1) % radial;
            let a = ring + r;
            let b = ring + r_next;
            let c = next_ring + r;
            let d = next_ring + r_next;
            data.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    data
}

/// Any unit vector perpendicular to `v`.
fn perpendicular(v: Vector3<f32>) -> Vector3<f32> {
    let reference = if v.y.abs() < 0.9 {
        Vector3::unit_y()
    } else {
        Vector3::unit_x()
    };
    let p = v.cross(reference);
    if p.is_zero() {
        Vector3::unit_z()
    } else {
        p.normalize()
    }
}
