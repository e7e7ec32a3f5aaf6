//! Surface materials and the per-object uniform block
//!
//! Every object carries its own [`Material`]. The material and the object's
//! model matrix are packed into one [`ObjectUniform`] bound at slot 1.

use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::wgpu_utils::{
    binding_builder::{BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Physical surface parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    /// Skip lighting and output the base color as-is.
    pub unlit: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self::physical([1.0, 1.0, 1.0])
    }
}

impl Material {
    /// Lit material with the editor's shape settings: roughness 0.3, metallic 0.
    pub fn physical(color: [f32; 3]) -> Self {
        Self {
            base_color: [color[0], color[1], color[2], 1.0],
            metallic: 0.0,
            roughness: 0.3,
            unlit: false,
        }
    }

    /// Flat color with no lighting, used for pen strokes.
    pub fn unlit(color: [f32; 3]) -> Self {
        Self {
            base_color: [color[0], color[1], color[2], 1.0],
            metallic: 0.0,
            roughness: 1.0,
            unlit: true,
        }
    }
}

/// GPU uniform data for one object
///
/// MUST match the `Object` struct in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub unlit: f32,
    _padding: f32,
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>, material: &Material) -> Self {
        let normal_matrix = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        Self {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
            base_color: material.base_color,
            metallic: material.metallic,
            roughness: material.roughness,
            unlit: if material.unlit { 1.0 } else { 0.0 },
            _padding: 0.0,
        }
    }
}

pub type ObjectUBO = UniformBuffer<ObjectUniform>;

/// Creates the layout every per-object bind group is built from.
pub fn object_bind_group_layout(device: &wgpu::Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_rendering(binding_types::uniform())
        .create(device, "Object Bind Group")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn test_shape_material_defaults() {
        let material = Material::default();
        assert_eq!(material.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(material.roughness, 0.3);
        assert_eq!(material.metallic, 0.0);
        assert!(!material.unlit);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 160);
        let uniform = ObjectUniform::new(
            Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)),
            &Material::unlit([1.0, 0.0, 0.0]),
        );
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.unlit, 1.0);
    }

    #[test]
    fn test_degenerate_scale_falls_back_to_identity_normals() {
        let uniform = ObjectUniform::new(Matrix4::from_scale(0.0), &Material::default());
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        assert_eq!(uniform.normal_matrix, identity);
    }
}
