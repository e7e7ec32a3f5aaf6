//! Render pass extensions for scene objects

use wgpu::*;

use crate::gfx::scene::object::SceneObject;

/// Extension trait for RenderPass to draw a registered object in one call
pub trait DrawSceneObject {
    /// Binds the object's uniform at `slot` and issues its indexed draw.
    /// Objects without uploaded GPU buffers are skipped.
    fn draw_scene_object(&mut self, object: &SceneObject, slot: u32) -> bool;
}

impl DrawSceneObject for RenderPass<'_> {
    fn draw_scene_object(&mut self, object: &SceneObject, slot: u32) -> bool {
        let Some(gpu) = object.gpu_resources() else {
            return false;
        };
        if gpu.index_count == 0 {
            return false;
        }
        self.set_bind_group(slot, &gpu.bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(gpu.index_buffer.slice(..), IndexFormat::Uint32);
        self.draw_indexed(0..gpu.index_count, 0, 0..1);
        true
    }
}
