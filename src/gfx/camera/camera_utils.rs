use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};
use crate::config::CameraConfig;

/// Camera plus the orbit controls driving it.
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Builds the camera rig described by `config` for a surface of the given aspect.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let camera = OrbitCamera::looking_at(config.eye, config.target, aspect).with_projection(
            config.fov_degrees,
            config.znear,
            config.zfar,
        );
        let controller = CameraController::new(config.rotate_speed, config.zoom_speed)
            .with_damping(config.damping_factor);
        Self::new(camera, controller)
    }

    /// Returns true when the event moved the camera.
    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller
            .process_keyed_events(event, &mut self.camera);
    }

    /// Per-frame update: damped orbit motion, then matrices.
    pub fn update(&mut self) {
        self.controller.update(&mut self.camera);
        self.camera.update_view_proj();
    }

    /// Whether orbit input currently reaches the camera.
    pub fn orbit_enabled(&self) -> bool {
        self.controller.is_enabled()
    }

    pub fn set_orbit_enabled(&mut self, enabled: bool) {
        self.controller.set_enabled(enabled);
    }
}

impl Default for CameraManager {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1.0)
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
