use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Mouse-driven orbit controls.
///
/// Left drag orbits, shift + left drag pans, the wheel zooms. Rotation and pan
/// input is damped: raw deltas accumulate and [`CameraController::update`]
/// bleeds a fraction of them into the camera every frame. While the
/// controller is disabled (draw mode, gizmo drags) drag input is ignored.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    enabled: bool,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: (f32, f32),
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping_factor: 0.05,
            enabled: true,
            is_shift_held: false,
            is_mouse_pressed: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: (0.0, 0.0),
        }
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor.clamp(0.0, 1.0);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables orbit input. Disabling drops any motion still
    /// waiting to be damped in.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("orbit controls {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        if !enabled {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            self.pending_pan = (0.0, 0.0);
        }
    }

    /// Feeds a raw device event; returns true when the camera needs a redraw.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } if self.enabled => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 * 0.1
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.enabled && self.is_mouse_pressed => {
                if self.is_shift_held {
                    self.pending_pan.0 -= delta.0 as f32 * self.pan_speed;
                    self.pending_pan.1 += delta.1 as f32 * self.pan_speed;
                } else {
                    self.pending_yaw -= delta.0 as f32 * self.rotate_speed;
                    self.pending_pitch += delta.1 as f32 * self.rotate_speed;
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("resetting camera to its initial pose");
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Applies one frame of damped motion to the camera.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        let factor = if self.damping_factor > 0.0 {
            self.damping_factor
        } else {
            1.0
        };

        if self.pending_yaw != 0.0 {
            camera.add_yaw(self.pending_yaw * factor);
        }
        if self.pending_pitch != 0.0 {
            camera.add_pitch(self.pending_pitch * factor);
        }
        if self.pending_pan != (0.0, 0.0) {
            camera.pan((self.pending_pan.0 * factor, self.pending_pan.1 * factor));
        }

        let keep = 1.0 - factor;
        self.pending_yaw = settle(self.pending_yaw * keep);
        self.pending_pitch = settle(self.pending_pitch * keep);
        self.pending_pan = (
            settle(self.pending_pan.0 * keep),
            settle(self.pending_pan.1 * keep),
        );
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.enabled && self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.enabled && self.is_mouse_pressed && !self.is_shift_held
    }

    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < 1e-6 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), 1.0)
    }

    fn press(controller: &mut CameraController, camera: &mut OrbitCamera) {
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            camera,
        );
    }

    #[test]
    fn test_damped_rotation_converges_to_full_delta() {
        let mut camera = camera();
        let mut controller = CameraController::new(0.01, 0.1).with_damping(0.05);
        press(&mut controller, &mut camera);
        controller.process_events(&DeviceEvent::MouseMotion { delta: (-10.0, 0.0) }, &mut camera);

        let start_yaw = camera.yaw;
        controller.update(&mut camera);
        let after_one = camera.yaw - start_yaw;
        assert!(after_one > 0.0 && after_one < 0.1);

        for _ in 0..500 {
            controller.update(&mut camera);
        }
        assert!((camera.yaw - start_yaw - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_disabled_controller_ignores_drag() {
        let mut camera = camera();
        let mut controller = CameraController::new(0.01, 0.1);
        controller.set_enabled(false);
        press(&mut controller, &mut camera);
        let redraw =
            controller.process_events(&DeviceEvent::MouseMotion { delta: (40.0, 20.0) }, &mut camera);
        controller.update(&mut camera);

        assert!(!redraw);
        assert_eq!(camera.yaw, 0.0);
        assert!(!controller.is_rotating());
    }

    #[test]
    fn test_disabling_drops_pending_motion() {
        let mut camera = camera();
        let mut controller = CameraController::new(0.01, 0.1);
        press(&mut controller, &mut camera);
        controller.process_events(&DeviceEvent::MouseMotion { delta: (40.0, 0.0) }, &mut camera);
        controller.set_enabled(false);
        controller.update(&mut camera);
        assert_eq!(camera.yaw, 0.0);
    }
}
