use std::fmt;

use cgmath::{Matrix4, One, Quaternion, Vector3};
use wgpu::util::DeviceExt;

use crate::editor::pen::PenStyle;
use crate::gfx::{
    geometry::{self, line_mesh::STROKE_RADIAL_SEGMENTS, GeometryData},
    picking::AABB,
    resources::material::{Material, ObjectUBO, ObjectUniform},
};
use crate::wgpu_utils::binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc};

/// Stable handle for an object in the registry. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an object is. Set at construction and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Box,
    Sphere,
    Plane,
    LineStroke,
}

impl ObjectKind {
    pub fn is_shape(self) -> bool {
        !matches!(self, ObjectKind::LineStroke)
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Box => "Box",
            ObjectKind::Sphere => "Sphere",
            ObjectKind::Plane => "Plane",
            ObjectKind::LineStroke => "Line",
        }
    }
}

/// Translation, rotation and scale, composed as `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Points and style a pen stroke was built from.
#[derive(Debug, Clone)]
pub struct StrokeData {
    /// Flat `[x, y, z, ...]` world-space coordinates
    pub points: Vec<f32>,
    pub style: PenStyle,
}

impl StrokeData {
    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }
}

// GPU resources struct to hold buffers and the per-object bind group
pub struct ObjectGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub uniform: ObjectUBO,
    pub bind_group: wgpu::BindGroup,
}

/// A renderable mesh owned by the object registry.
pub struct SceneObject {
    pub kind: ObjectKind,
    pub name: String,
    pub mesh: GeometryData,
    pub transform: Transform,
    pub material: Material,
    pub stroke: Option<StrokeData>,
    local_bounds: AABB,
    gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl SceneObject {
    pub fn new(kind: ObjectKind, name: impl Into<String>, mesh: GeometryData, material: Material) -> Self {
        let local_bounds = AABB::from_vertices(&mesh.vertices);
        Self {
            kind,
            name: name.into(),
            mesh,
            transform: Transform::default(),
            material,
            stroke: None,
            local_bounds,
            gpu_resources: None,
        }
    }

    /// Unit box, 1 x 1 x 1.
    pub fn cube() -> Self {
        Self::new(ObjectKind::Box, "Box", geometry::generate_cube(1.0), Material::default())
    }

    /// Sphere of radius 0.5.
    pub fn sphere() -> Self {
        Self::new(
            ObjectKind::Sphere,
            "Sphere",
            geometry::generate_sphere(0.5, 32, 16),
            Material::default(),
        )
    }

    /// 1 x 1 plane in XY facing +Z.
    pub fn plane() -> Self {
        Self::new(
            ObjectKind::Plane,
            "Plane",
            geometry::generate_plane(1.0, 1.0, 1, 1),
            Material::default(),
        )
    }

    /// Tube through `points` in the given pen style. The width is constant
    /// along the stroke.
    pub fn line_stroke(points: &[f32], style: PenStyle) -> Self {
        let width = style.width;
        let mesh = geometry::build_line_mesh(points, STROKE_RADIAL_SEGMENTS, |_| width);
        let mut object = Self::new(
            ObjectKind::LineStroke,
            "Line",
            mesh,
            Material::unlit(style.color.rgb()),
        );
        object.stroke = Some(StrokeData {
            points: points.to_vec(),
            style,
        });
        object
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    pub fn local_bounds(&self) -> AABB {
        self.local_bounds
    }

    pub fn world_bounds(&self) -> AABB {
        self.local_bounds.transform(&self.model_matrix())
    }

    pub fn has_gpu_resources(&self) -> bool {
        self.gpu_resources.is_some()
    }

    pub fn gpu_resources(&self) -> Option<&ObjectGpuResources> {
        self.gpu_resources.as_ref()
    }

    /// Uploads the mesh and creates the uniform bind group. No-op when the
    /// resources already exist.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        if self.gpu_resources.is_some() {
            return;
        }

        let vertices = self.mesh.to_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = ObjectUBO::new_with_data(
            device,
            &ObjectUniform::new(self.model_matrix(), &self.material),
        );
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform.binding_resource())
            .create(device, "Object Bind Group");

        log::trace!(
            "uploaded {} ({} vertices, {} indices)",
            self.name,
            vertices.len(),
            self.mesh.indices.len()
        );

        self.gpu_resources = Some(ObjectGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.mesh.indices.len() as u32,
            uniform,
            bind_group,
        });
    }

    /// Writes the current transform and material to the uniform buffer.
    pub fn update_uniform(&mut self, queue: &wgpu::Queue) {
        let content = ObjectUniform::new(self.model_matrix(), &self.material);
        if let Some(gpu) = &mut self.gpu_resources {
            gpu.uniform.update_content(queue, content);
        }
    }

    /// Releases GPU buffers. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(gpu) = self.gpu_resources.take() {
            gpu.vertex_buffer.destroy();
            gpu.index_buffer.destroy();
            gpu.uniform.destroy();
            log::trace!("disposed {}", self.name);
        }
    }
}

impl fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneObject")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("vertices", &self.mesh.vertex_count())
            .field("transform", &self.transform)
            .field("gpu", &self.gpu_resources.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::pen::PenColor;
    use cgmath::{Deg, Rotation3};

    #[test]
    fn test_shape_constructors() {
        let cube = SceneObject::cube();
        assert_eq!(cube.kind, ObjectKind::Box);
        assert_eq!(cube.local_bounds().max, Vector3::new(0.5, 0.5, 0.5));

        let sphere = SceneObject::sphere();
        assert_eq!(sphere.kind, ObjectKind::Sphere);
        assert!((sphere.local_bounds().max.y - 0.5).abs() < 1e-5);

        let plane = SceneObject::plane();
        assert_eq!(plane.kind, ObjectKind::Plane);
        assert_eq!(plane.local_bounds().min.z, 0.0);
        assert_eq!(plane.local_bounds().max.z, 0.0);

        for object in [&cube, &sphere, &plane] {
            assert_eq!(object.material, Material::physical([1.0, 1.0, 1.0]));
            assert!(!object.has_gpu_resources());
        }
    }

    #[test]
    fn test_line_stroke_captures_style() {
        let style = PenStyle {
            color: PenColor::Red,
            width: 0.05,
        };
        let stroke = SceneObject::line_stroke(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0], style);
        assert_eq!(stroke.kind, ObjectKind::LineStroke);
        assert!(stroke.material.unlit);
        assert_eq!(stroke.material.base_color, [1.0, 0.0, 0.0, 1.0]);

        let data = stroke.stroke.as_ref().map(|s| (s.point_count(), s.style));
        assert_eq!(data, Some((2, style)));
        assert_eq!(stroke.mesh.indices.len(), 6 * 6);
    }

    #[test]
    fn test_transform_order_is_trs() {
        let transform = Transform {
            translation: Vector3::new(1.0, 0.0, 0.0),
            rotation: Quaternion::from_angle_z(Deg(90.0)),
            scale: Vector3::new(2.0, 2.0, 2.0),
        };
        let p = transform.matrix() * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        // scaled to (2,0,0), rotated to (0,2,0), translated to (1,2,0)
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_world_bounds_follow_transform() {
        let mut cube = SceneObject::cube();
        cube.transform.translation = Vector3::new(0.0, 2.0, 0.0);
        cube.transform.scale = Vector3::new(2.0, 1.0, 1.0);
        let bounds = cube.world_bounds();
        assert!((bounds.min.x + 1.0).abs() < 1e-5);
        assert!((bounds.min.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_dispose_without_gpu_is_noop() {
        let mut cube = SceneObject::cube();
        cube.dispose();
        cube.dispose();
        assert!(!cube.has_gpu_resources());
    }
}
