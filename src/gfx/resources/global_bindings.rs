//! Global uniform bindings for camera and scene data
//!
//! Manages the uniform buffer and bind group holding per-frame state shared by
//! every draw: camera matrices, the directional sun and the hemisphere
//! ambient light.

use crate::{
    config::{DirectionalLight, HemisphereLight},
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    // Camera data
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    // Directional light
    light_position: [f32; 3],
    light_intensity: f32,
    light_color: [f32; 3],
    ambient_intensity: f32,

    // Hemisphere light
    sky_color: [f32; 3],
    _padding0: f32,
    ground_color: [f32; 3],
    _padding1: f32,
}
// 16 + 64 + 16 + 16 + 16 + 16 = 144 bytes

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, sun: DirectionalLight, ambient: HemisphereLight) -> Self {
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_position: sun.position,
            light_intensity: sun.intensity,
            light_color: sun.color,
            ambient_intensity: ambient.intensity,
            sky_color: ambient.sky_color,
            _padding0: 0.0,
            ground_color: ambient.ground_color,
            _padding1: 0.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light data
///
/// Called once per frame before any draw.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    sun: DirectionalLight,
    ambient: HemisphereLight,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, sun, ambient));
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // camera + lights
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// `None` until [`GlobalBindings::create_bind_group`] has run.
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    #[test]
    fn test_global_ubo_layout_size() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 144);
    }

    #[test]
    fn test_content_carries_lights() {
        let render = RenderConfig::default();
        let content = GlobalUBOContent::new(CameraUniform::default(), render.sun, render.ambient);
        assert_eq!(content.light_position, [-5.0, 5.0, -5.0]);
        assert_eq!(content.light_intensity, 2.0);
        assert_eq!(content.ambient_intensity, 0.1);
    }
}
