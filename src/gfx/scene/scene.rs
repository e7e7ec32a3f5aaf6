use crate::gfx::camera::camera_utils::CameraManager;

use super::registry::ObjectRegistry;

/// Main scene containing the object registry and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub registry: ObjectRegistry,
}

impl Scene {
    /// Creates an empty scene viewed through `camera_manager`
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            registry: ObjectRegistry::new(),
        }
    }

    /// Per-frame update: damped camera motion and matrices
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    /// Creates GPU resources for objects added since the last frame and
    /// refreshes every object's uniform block
    pub fn prepare_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        object_layout: &crate::wgpu_utils::BindGroupLayoutWithDesc,
    ) {
        for (_, object) in self.registry.iter_mut() {
            if !object.has_gpu_resources() {
                object.init_gpu_resources(device, object_layout);
            }
            object.update_uniform(queue);
        }
    }
}
