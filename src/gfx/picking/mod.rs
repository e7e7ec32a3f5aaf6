//! # Object Picking System
//!
//! Turns a cursor position into a world-space ray and intersects it with
//! the objects in the registry.
//!
//! ## How it works
//!
//! 1. **Cursor to Ray**: cast from the eye through the cursor using the inverse view
//! 2. **Broad phase**: skip objects whose world bounding box the ray misses
//! 3. **Narrow phase**: closest triangle hit per object (Möller–Trumbore)
//! 4. **Sort**: hits are returned nearest first
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use sketchbox::gfx::picking::{ObjectPicker, Ray};
//! use sketchbox::gfx::scene::{ObjectRegistry, SceneObject};
//!
//! let mut registry = ObjectRegistry::new();
//! let cube = registry.add(SceneObject::cube());
//!
//! let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
//! let hits = ObjectPicker::new().cast(&ray, &registry);
//! assert_eq!(hits[0].object_id, cube);
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    scene::{ObjectId, ObjectKind, ObjectRegistry, SceneObject},
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Intersection with the plane through `point` with normal `normal`.
    /// Only hits in front of the origin count.
    pub fn intersect_plane(&self, normal: Vector3<f32>, point: Vector3<f32>) -> Option<Vector3<f32>> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = normal.dot(point - self.origin) / denom;
        (t >= 0.0).then(|| self.point_at(t))
    }

    /// Double-sided Möller–Trumbore. Returns the distance along the ray.
    pub fn intersect_triangle(
        &self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
    ) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None; // parallel or degenerate
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > EPSILON).then_some(t)
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::from(*vertex);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed_corners: Vec<[f32; 3]> = corners
            .iter()
            .map(|corner| transform_point(matrix, *corner).into())
            .collect();

        Self::from_vertices(&transformed_corners)
    }
}

/// One object hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub object_id: ObjectId,
    /// Distance from the ray origin to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Ray caster over the object registry
#[derive(Debug, Clone, Copy)]
pub struct ObjectPicker {
    /// Whether pen strokes can be hit. Off for the editor so strokes never
    /// steal selection from the shapes they are drawn on.
    pub include_strokes: bool,
}

impl Default for ObjectPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectPicker {
    pub fn new() -> Self {
        Self {
            include_strokes: false,
        }
    }

    /// Convert a cursor position (physical pixels, origin top-left) to a
    /// world-space ray. `None` for an empty window.
    pub fn screen_to_ray(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &OrbitCamera,
    ) -> Option<Ray> {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

        // view-space direction through the cursor, rotated into world space
        let tan_half_fov = (camera.fovy.0 * 0.5).tan();
        let view_dir = Vector4::new(
            ndc_x * tan_half_fov * camera.aspect,
            ndc_y * tan_half_fov,
            -1.0,
            0.0,
        );
        let inv_view = camera.view_matrix().invert()?;
        let direction = (inv_view * view_dir).truncate();
        if direction.magnitude2() <= f32::EPSILON {
            return None;
        }
        Some(Ray::new(camera.eye, direction))
    }

    /// Every object the ray hits, nearest first.
    pub fn cast(&self, ray: &Ray, registry: &ObjectRegistry) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = registry
            .iter()
            .filter(|(_, object)| self.include_strokes || object.kind != ObjectKind::LineStroke)
            .filter_map(|(id, object)| {
                let distance = intersect_object(ray, object)?;
                Some(RayHit {
                    object_id: id,
                    distance,
                    point: ray.point_at(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        log::trace!("ray cast: {} hit(s)", hits.len());
        hits
    }

    /// Nearest hit, if any.
    pub fn pick(&self, ray: &Ray, registry: &ObjectRegistry) -> Option<RayHit> {
        self.cast(ray, registry).into_iter().next()
    }
}

/// Closest triangle hit on `object` in world space.
fn intersect_object(ray: &Ray, object: &SceneObject) -> Option<f32> {
    object.world_bounds().intersect_ray(ray)?;

    let model = object.model_matrix();
    object
        .mesh
        .triangles()
        .filter_map(|[a, b, c]| {
            ray.intersect_triangle(
                transform_point(&model, a.into()),
                transform_point(&model, b.into()),
                transform_point(&model, c.into()),
            )
        })
        .min_by(|a, b| a.total_cmp(b))
}

fn transform_point(matrix: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let p = matrix * point.extend(1.0);
    p.truncate() / p.w
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::pen::PenStyle;

    fn down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vector3::new(x, y, 5.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_triangle_is_double_sided() {
        let a = Vector3::new(-1.0, -1.0, 0.0);
        let b = Vector3::new(1.0, -1.0, 0.0);
        let c = Vector3::new(0.0, 1.0, 0.0);

        let front = Ray::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, -1.0));
        let back = Ray::new(Vector3::new(0.0, 0.0, -2.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(front.intersect_triangle(a, b, c), Some(2.0));
        assert_eq!(back.intersect_triangle(a, b, c), Some(2.0));

        let behind = Ray::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(behind.intersect_triangle(a, b, c).is_none());
    }

    #[test]
    fn test_ray_plane_intersection() {
        let ray = Ray::new(Vector3::new(1.0, 2.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_plane(Vector3::unit_z(), Vector3::zero());
        assert_eq!(hit, Some(Vector3::new(1.0, 2.0, 0.0)));
        assert!(ray.intersect_plane(Vector3::unit_x(), Vector3::zero()).is_none());
    }

    #[test]
    fn test_cast_orders_nearest_first() {
        let mut registry = ObjectRegistry::new();
        let far = registry.add(SceneObject::cube());
        let mut near_cube = SceneObject::cube();
        near_cube.transform.translation = Vector3::new(0.0, 0.0, 2.0);
        let near = registry.add(near_cube);

        let hits = ObjectPicker::new().cast(&down_z(0.1, 0.2), &registry);
        let ids: Vec<_> = hits.iter().map(|hit| hit.object_id).collect();
        assert_eq!(ids, vec![near, far]);
        assert!((hits[0].distance - 2.5).abs() < 1e-5);
        assert!((hits[0].point.z - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_cast_miss_returns_empty() {
        let mut registry = ObjectRegistry::new();
        registry.add(SceneObject::sphere());
        assert!(ObjectPicker::new().cast(&down_z(3.0, 0.0), &registry).is_empty());
    }

    #[test]
    fn test_sphere_hit_uses_mesh_not_bounds() {
        let mut registry = ObjectRegistry::new();
        registry.add(SceneObject::sphere());
        // inside the bounding box corner but outside the sphere
        assert!(ObjectPicker::new().cast(&down_z(0.45, 0.45), &registry).is_empty());
        assert_eq!(ObjectPicker::new().cast(&down_z(0.05, 0.07), &registry).len(), 1);
    }

    #[test]
    fn test_strokes_are_not_pickable() {
        let mut registry = ObjectRegistry::new();
        registry.add(SceneObject::line_stroke(
            &[-1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            PenStyle {
                width: 0.5,
                ..PenStyle::default()
            },
        ));
        let ray = down_z(0.0, 0.0);
        assert!(ObjectPicker::new().cast(&ray, &registry).is_empty());

        let picker = ObjectPicker {
            include_strokes: true,
        };
        assert_eq!(picker.cast(&ray, &registry).len(), 1);
    }

    #[test]
    fn test_screen_center_ray_points_at_target() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.5);
        let ray = ObjectPicker::new()
            .screen_to_ray((600.0, 400.0), (1200.0, 800.0), &camera)
            .expect("ray");
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-3);
        assert_eq!(ray.origin, camera.eye);
    }

    #[test]
    fn test_screen_to_ray_empty_window() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.0);
        assert!(ObjectPicker::new()
            .screen_to_ray((0.0, 0.0), (0.0, 0.0), &camera)
            .is_none());
    }
}
