//! Transform gizmo for moving, rotating and scaling the selected object.

use cgmath::{InnerSpace, Quaternion, Rad, Rotation3, Vector3};

use crate::gfx::{
    picking::Ray,
    scene::{LineVertex, ObjectId, Transform},
};

/// Gizmo operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    /// Move along an axis.
    #[default]
    Translate,
    /// Rotate around an axis.
    Rotate,
    /// Scale along an axis, or uniformly from the center.
    Scale,
}

/// Gizmo handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
    /// Uniform scale handle (scale mode only).
    Center,
}

impl GizmoAxis {
    /// Get the axis color (unhighlighted).
    pub fn color(self) -> [f32; 4] {
        match self {
            GizmoAxis::X => [1.0, 0.2, 0.2, 1.0],
            GizmoAxis::Y => [0.2, 1.0, 0.2, 1.0],
            GizmoAxis::Z => [0.2, 0.5, 1.0, 1.0],
            GizmoAxis::Center => [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn highlight_color() -> [f32; 4] {
        [1.0, 1.0, 0.0, 1.0]
    }

    fn direction(self) -> Option<Vector3<f32>> {
        match self {
            GizmoAxis::X => Some(Vector3::unit_x()),
            GizmoAxis::Y => Some(Vector3::unit_y()),
            GizmoAxis::Z => Some(Vector3::unit_z()),
            GizmoAxis::Center => None,
        }
    }
}

/// Gizmo configuration.
#[derive(Debug, Clone)]
pub struct GizmoConfig {
    /// Handle length at unit screen scale.
    pub size: f32,
    /// Pick radius for hit testing at unit screen scale.
    pub pick_radius: f32,
    /// Size of arrowheads relative to size.
    pub arrowhead_size: f32,
    /// Number of segments for rotation circles.
    pub circle_segments: u32,
    /// Screen scale per unit of camera distance.
    pub distance_scale: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            pick_radius: 0.08,
            arrowhead_size: 0.15,
            circle_segments: 64,
            distance_scale: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    axis: GizmoAxis,
    /// Gizmo position when the drag began; the drag plane stays anchored here
    origin: Vector3<f32>,
    plane_normal: Vector3<f32>,
    start_point: Vector3<f32>,
    start: Transform,
}

/// Translate/rotate/scale handles attached to at most one object.
///
/// Drags are absolute: [`TransformGizmo::update_drag`] returns the transform
/// the object should have now, computed from the transform it had when the
/// drag began.
#[derive(Debug, Clone)]
pub struct TransformGizmo {
    config: GizmoConfig,
    mode: GizmoMode,
    attached: Option<ObjectId>,
    position: Vector3<f32>,
    hovered_axis: Option<GizmoAxis>,
    drag_state: Option<DragState>,
    /// Scale factor based on camera distance.
    screen_scale: f32,
}

impl Default for TransformGizmo {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformGizmo {
    pub fn new() -> Self {
        Self::with_config(GizmoConfig::default())
    }

    pub fn with_config(config: GizmoConfig) -> Self {
        Self {
            config,
            mode: GizmoMode::Translate,
            attached: None,
            position: Vector3::new(0.0, 0.0, 0.0),
            hovered_axis: None,
            drag_state: None,
            screen_scale: 1.0,
        }
    }

    pub fn attach(&mut self, id: ObjectId, position: Vector3<f32>) {
        if self.attached != Some(id) {
            log::debug!("gizmo attached to {}", id);
        }
        self.attached = Some(id);
        self.position = position;
    }

    /// Detaches and cancels any drag in progress.
    pub fn detach(&mut self) {
        if let Some(id) = self.attached.take() {
            log::debug!("gizmo detached from {}", id);
        }
        self.drag_state = None;
        self.hovered_axis = None;
    }

    pub fn attached(&self) -> Option<ObjectId> {
        self.attached
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        if self.mode != mode {
            log::debug!("gizmo mode {:?}", mode);
            self.mode = mode;
            self.drag_state = None;
            self.hovered_axis = None;
        }
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    /// Moves the handles, e.g. after the attached object moved.
    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Keeps the handles a constant size on screen.
    pub fn update_screen_scale(&mut self, camera_position: Vector3<f32>) {
        let distance = (camera_position - self.position).magnitude();
        self.screen_scale = (distance * self.config.distance_scale).max(1e-3);
    }

    pub fn screen_scale(&self) -> f32 {
        self.screen_scale
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_state.is_some()
    }

    pub fn hovered_axis(&self) -> Option<GizmoAxis> {
        self.hovered_axis
    }

    fn handle_size(&self) -> f32 {
        self.config.size * self.screen_scale
    }

    /// Returns the handle under the ray and remembers it for highlighting.
    /// Always `None` while detached.
    pub fn hit_test(&mut self, ray: &Ray) -> Option<GizmoAxis> {
        if self.attached.is_none() {
            self.hovered_axis = None;
            return None;
        }

        let size = self.handle_size();
        let pick_radius = self.config.pick_radius * self.screen_scale;

        let result = match self.mode {
            GizmoMode::Translate => self.hit_test_axes(ray, size, pick_radius),
            GizmoMode::Rotate => self.hit_test_rings(ray, size, pick_radius),
            GizmoMode::Scale => self
                .hit_test_center(ray, size * 0.15)
                .or_else(|| self.hit_test_axes(ray, size, pick_radius)),
        };

        self.hovered_axis = result;
        result
    }

    fn hit_test_axes(&self, ray: &Ray, size: f32, pick_radius: f32) -> Option<GizmoAxis> {
        [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z]
            .into_iter()
            .filter_map(|axis| {
                let dir = axis.direction()?;
                let distance = ray_segment_distance(ray, self.position, self.position + dir * size)?;
                (distance < pick_radius).then_some((axis, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(axis, _)| axis)
    }

    fn hit_test_rings(&self, ray: &Ray, radius: f32, pick_radius: f32) -> Option<GizmoAxis> {
        [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z]
            .into_iter()
            .filter_map(|axis| {
                let normal = axis.direction()?;
                let point = ray.intersect_plane(normal, self.position)?;
                let distance = ((point - self.position).magnitude() - radius).abs();
                (distance < pick_radius).then_some((axis, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(axis, _)| axis)
    }

    fn hit_test_center(&self, ray: &Ray, half_size: f32) -> Option<GizmoAxis> {
        let t = (self.position - ray.origin).dot(ray.direction);
        if t <= 0.0 {
            return None;
        }
        ((ray.point_at(t) - self.position).magnitude() < half_size).then_some(GizmoAxis::Center)
    }

    /// Starts dragging `axis`. `start` is the attached object's transform.
    pub fn begin_drag(&mut self, axis: GizmoAxis, ray: &Ray, start: Transform) -> bool {
        if self.attached.is_none() {
            return false;
        }

        let plane_normal = self.drag_plane_normal(axis, ray);
        let Some(start_point) = ray.intersect_plane(plane_normal, self.position) else {
            return false;
        };

        self.drag_state = Some(DragState {
            axis,
            origin: self.position,
            plane_normal,
            start_point,
            start,
        });
        self.hovered_axis = Some(axis);
        true
    }

    fn drag_plane_normal(&self, axis: GizmoAxis, ray: &Ray) -> Vector3<f32> {
        let view_dir = ray.direction;
        match (self.mode, axis.direction()) {
            (GizmoMode::Rotate, Some(dir)) => dir,
            (_, Some(dir)) => {
                // plane containing the axis that faces the camera the most
                let candidates = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];
                candidates
                    .into_iter()
                    .filter(|n| n.dot(dir).abs() < 0.5)
                    .max_by(|a, b| a.dot(view_dir).abs().total_cmp(&b.dot(view_dir).abs()))
                    .unwrap_or(Vector3::unit_y())
            }
            (_, None) => -view_dir,
        }
    }

    /// The transform the attached object should have for the current ray.
    /// `None` when not dragging or when the ray misses the drag plane.
    pub fn update_drag(&mut self, ray: &Ray) -> Option<Transform> {
        let state = self.drag_state?;
        let current_point = ray.intersect_plane(state.plane_normal, state.origin)?;
        let delta = current_point - state.start_point;
        let mut result = state.start;

        match (self.mode, state.axis.direction()) {
            (GizmoMode::Translate, Some(dir)) => {
                result.translation = state.start.translation + dir * delta.dot(dir);
            }
            (GizmoMode::Translate, None) => {}
            (GizmoMode::Rotate, Some(axis)) => {
                let angle = signed_angle_around(
                    state.start_point - state.origin,
                    current_point - state.origin,
                    axis,
                )?;
                result.rotation = Quaternion::from_axis_angle(axis, Rad(angle)) * state.start.rotation;
            }
            (GizmoMode::Rotate, None) => {}
            (GizmoMode::Scale, Some(dir)) => {
                let factor = (1.0 + delta.dot(dir) / self.handle_size()).max(0.01);
                result.scale = state.start.scale + dir_mask(dir, factor - 1.0, state.start.scale);
            }
            (GizmoMode::Scale, None) => {
                let start_dist = (state.start_point - state.origin).magnitude();
                let current_dist = (current_point - state.origin).magnitude();
                let factor = if start_dist > 1e-3 {
                    (current_dist / start_dist).max(0.01)
                } else {
                    1.0
                };
                result.scale = state.start.scale * factor;
            }
        }

        Some(result)
    }

    /// Ends the drag. Returns the object that was being dragged.
    pub fn end_drag(&mut self) -> Option<ObjectId> {
        self.drag_state.take().and(self.attached)
    }

    fn axis_color(&self, axis: GizmoAxis) -> [f32; 4] {
        let dragged = self.drag_state.map(|s| s.axis);
        if self.hovered_axis == Some(axis) || dragged == Some(axis) {
            GizmoAxis::highlight_color()
        } else {
            axis.color()
        }
    }

    /// World-space line list for the overlay pass. Empty while detached.
    pub fn handle_lines(&self) -> Vec<LineVertex> {
        if self.attached.is_none() {
            return Vec::new();
        }

        let size = self.handle_size();
        let mut lines = match self.mode {
            GizmoMode::Translate => self.build_translate_geometry(size),
            GizmoMode::Rotate => self.build_rotate_geometry(size),
            GizmoMode::Scale => self.build_scale_geometry(size),
        };
        for vertex in &mut lines {
            vertex.position[0] += self.position.x;
            vertex.position[1] += self.position.y;
            vertex.position[2] += self.position.z;
        }
        lines
    }

    fn build_translate_geometry(&self, size: f32) -> Vec<LineVertex> {
        let arrowhead = self.config.arrowhead_size * size;
        let mut vertices = Vec::with_capacity(30);

        for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
            let color = self.axis_color(axis);
            let (dir, side_a, side_b) = match axis {
                GizmoAxis::X => ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
                GizmoAxis::Y => ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
                _ => ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            };
            let tip = scaled(dir, size);
            vertices.push(LineVertex::new([0.0, 0.0, 0.0], color));
            vertices.push(LineVertex::new(tip, color));

            // four arrowhead barbs
            let back = scaled(dir, size - arrowhead);
            for (side, sign) in [(side_a, 0.5), (side_a, -0.5), (side_b, 0.5), (side_b, -0.5)] {
                let offset = scaled(side, arrowhead * sign);
                vertices.push(LineVertex::new(tip, color));
                vertices.push(LineVertex::new(add(back, offset), color));
            }
        }

        vertices
    }

    fn build_rotate_geometry(&self, radius: f32) -> Vec<LineVertex> {
        let segments = self.config.circle_segments.max(3) as usize;
        let mut vertices = Vec::with_capacity(segments * 6);

        for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
            let color = self.axis_color(axis);
            let point = |i: usize| {
                let a = (i as f32 / segments as f32) * std::f32::consts::TAU;
                let (u, v) = (a.cos() * radius, a.sin() * radius);
                match axis {
                    GizmoAxis::X => [0.0, u, v],
                    GizmoAxis::Y => [u, 0.0, v],
                    _ => [u, v, 0.0],
                }
            };
            for i in 0..segments {
                vertices.push(LineVertex::new(point(i), color));
                vertices.push(LineVertex::new(point(i + 1), color));
            }
        }

        vertices
    }

    fn build_scale_geometry(&self, size: f32) -> Vec<LineVertex> {
        let mut vertices = Vec::with_capacity(24 * 4 + 6);
        let box_size = size * 0.1;

        for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
            let color = self.axis_color(axis);
            let end = match axis {
                GizmoAxis::X => [size, 0.0, 0.0],
                GizmoAxis::Y => [0.0, size, 0.0],
                _ => [0.0, 0.0, size],
            };
            vertices.push(LineVertex::new([0.0, 0.0, 0.0], color));
            vertices.push(LineVertex::new(end, color));
            add_box_at(&mut vertices, end, box_size, color);
        }

        add_box_at(
            &mut vertices,
            [0.0, 0.0, 0.0],
            size * 0.15,
            self.axis_color(GizmoAxis::Center),
        );
        vertices
    }
}

/// Scale offset that only touches the component `dir` points along.
fn dir_mask(dir: Vector3<f32>, amount: f32, start_scale: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        dir.x * amount * start_scale.x,
        dir.y * amount * start_scale.y,
        dir.z * amount * start_scale.z,
    )
}

/// Angle from `from` to `to` around `axis`, both projected onto the plane
/// perpendicular to it. Positive is counter-clockwise looking down the axis.
fn signed_angle_around(from: Vector3<f32>, to: Vector3<f32>, axis: Vector3<f32>) -> Option<f32> {
    let from = from - axis * from.dot(axis);
    let to = to - axis * to.dot(axis);
    if from.magnitude2() < 1e-8 || to.magnitude2() < 1e-8 {
        return None;
    }
    let (from, to) = (from.normalize(), to.normalize());
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    Some(if from.cross(to).dot(axis) < 0.0 { -angle } else { angle })
}

/// Shortest distance between a ray and a line segment. `None` when parallel.
fn ray_segment_distance(ray: &Ray, p0: Vector3<f32>, p1: Vector3<f32>) -> Option<f32> {
    let u = ray.direction;
    let v = p1 - p0;
    let w = ray.origin - p0;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    let denom = a * c - b * b;
    if denom.abs() < 1e-8 {
        return None;
    }

    // Clamp to segment
    let s = ((b * e - c * d) / denom).max(0.0);
    let t = ((a * e - b * d) / denom).clamp(0.0, 1.0);

    Some((ray.point_at(s) - (p0 + v * t)).magnitude())
}

fn scaled(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn add_box_at(vertices: &mut Vec<LineVertex>, center: [f32; 3], half_size: f32, color: [f32; 4]) {
    let [cx, cy, cz] = center;
    let h = half_size;
    let corner = |x: f32, y: f32, z: f32| [cx + x * h, cy + y * h, cz + z * h];

    let square = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    for i in 0..4 {
        let (x0, z0) = square[i];
        let (x1, z1) = square[(i + 1) % 4];
        // bottom edge, top edge, vertical edge
        for (a, b) in [
            (corner(x0, -1.0, z0), corner(x1, -1.0, z1)),
            (corner(x0, 1.0, z0), corner(x1, 1.0, z1)),
            (corner(x0, -1.0, z0), corner(x0, 1.0, z0)),
        ] {
            vertices.push(LineVertex::new(a, color));
            vertices.push(LineVertex::new(b, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation, Zero};

    fn attached_gizmo(mode: GizmoMode) -> TransformGizmo {
        let mut gizmo = TransformGizmo::new();
        gizmo.attach(ObjectId(0), Vector3::zero());
        gizmo.set_mode(mode);
        gizmo
    }

    fn down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vector3::new(x, y, 5.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_detached_gizmo_has_no_handles() {
        let mut gizmo = TransformGizmo::new();
        assert!(gizmo.hit_test(&down_z(0.5, 0.0)).is_none());
        assert!(gizmo.handle_lines().is_empty());
        assert!(!gizmo.begin_drag(GizmoAxis::X, &down_z(0.5, 0.0), Transform::default()));
    }

    #[test]
    fn test_hit_test_translate_axes() {
        let mut gizmo = attached_gizmo(GizmoMode::Translate);
        assert_eq!(gizmo.hit_test(&down_z(0.5, 0.02)), Some(GizmoAxis::X));
        assert_eq!(gizmo.hit_test(&down_z(0.03, 0.6)), Some(GizmoAxis::Y));
        assert_eq!(gizmo.hovered_axis(), Some(GizmoAxis::Y));
        assert_eq!(gizmo.hit_test(&down_z(0.5, 0.5)), None);
        assert_eq!(gizmo.hovered_axis(), None);
    }

    #[test]
    fn test_hit_test_rotate_rings() {
        let mut gizmo = attached_gizmo(GizmoMode::Rotate);
        // on the Z ring (XY plane, radius 1)
        assert_eq!(gizmo.hit_test(&down_z(0.0, 1.02)), Some(GizmoAxis::Z));
        assert_eq!(gizmo.hit_test(&down_z(0.0, 0.5)), None);
    }

    #[test]
    fn test_translate_drag_is_absolute_and_axis_constrained() {
        let mut gizmo = attached_gizmo(GizmoMode::Translate);
        let start = Transform {
            translation: Vector3::new(0.0, 0.0, 0.0),
            ..Transform::default()
        };
        assert!(gizmo.begin_drag(GizmoAxis::X, &down_z(0.5, 0.0), start));
        assert!(gizmo.is_dragging());

        let moved = gizmo.update_drag(&down_z(1.5, 0.7)).expect("drag");
        assert!((moved.translation - Vector3::new(1.0, 0.0, 0.0)).magnitude() < 1e-5);

        // same ray again gives the same result, not a doubled offset
        // the handles follow the object; the result must not drift
        gizmo.set_position(moved.translation);
        let again = gizmo.update_drag(&down_z(1.5, 0.7)).expect("drag");
        assert_eq!(moved, again);

        assert_eq!(gizmo.end_drag(), Some(ObjectId(0)));
        assert!(!gizmo.is_dragging());
    }

    #[test]
    fn test_rotate_drag_quarter_turn() {
        let mut gizmo = attached_gizmo(GizmoMode::Rotate);
        assert!(gizmo.begin_drag(GizmoAxis::Z, &down_z(1.0, 0.0), Transform::default()));
        let rotated = gizmo.update_drag(&down_z(0.0, 1.0)).expect("drag");

        let x = rotated.rotation.rotate_vector(Vector3::unit_x());
        assert!((x - Vector3::unit_y()).magnitude() < 1e-4);
        let expected = Quaternion::from_axis_angle(Vector3::unit_z(), Deg(90.0));
        assert!((rotated.rotation.s - expected.s).abs() < 1e-4);
    }

    #[test]
    fn test_scale_drag_along_axis() {
        let mut gizmo = attached_gizmo(GizmoMode::Scale);
        let start = Transform {
            scale: Vector3::new(2.0, 1.0, 1.0),
            ..Transform::default()
        };
        assert!(gizmo.begin_drag(GizmoAxis::X, &down_z(1.0, 0.0), start));
        let scaled = gizmo.update_drag(&down_z(1.5, 0.0)).expect("drag");
        assert!((scaled.scale - Vector3::new(3.0, 1.0, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_screen_scale_tracks_distance() {
        let mut gizmo = attached_gizmo(GizmoMode::Translate);
        gizmo.update_screen_scale(Vector3::new(0.0, 0.0, 10.0));
        assert!((gizmo.screen_scale() - 1.5).abs() < 1e-5);
        // handles grow with the scale
        assert_eq!(gizmo.hit_test(&down_z(1.4, 0.05)), Some(GizmoAxis::X));
    }

    #[test]
    fn test_detach_cancels_drag() {
        let mut gizmo = attached_gizmo(GizmoMode::Translate);
        gizmo.begin_drag(GizmoAxis::X, &down_z(0.5, 0.0), Transform::default());
        gizmo.detach();
        assert!(!gizmo.is_dragging());
        assert_eq!(gizmo.attached(), None);
        assert!(gizmo.update_drag(&down_z(1.0, 0.0)).is_none());
    }

    #[test]
    fn test_handle_lines_follow_position_and_highlight() {
        let mut gizmo = attached_gizmo(GizmoMode::Translate);
        gizmo.set_position(Vector3::new(1.0, 2.0, 3.0));
        let lines = gizmo.handle_lines();
        assert_eq!(lines.len() % 2, 0);
        assert_eq!(lines[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(lines[0].color, GizmoAxis::X.color());

        gizmo.hit_test(&Ray::new(Vector3::new(1.5, 2.0, 8.0), Vector3::new(0.0, 0.0, -1.0)));
        assert_eq!(gizmo.handle_lines()[0].color, GizmoAxis::highlight_color());
    }
}
