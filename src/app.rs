use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::config::EditorConfig;
use crate::editor::{Editor, EditorAction};
use crate::error::EngineError;
use crate::gfx::{
    camera::CameraManager,
    picking::Ray,
    rendering::{viewport, FrameStatus, RenderEngine},
    scene::Scene,
};
use crate::ui::{editor_panels, PanelState, UiManager};

/// The editor application: one window, one scene, one editor.
pub struct SketchApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: EditorConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    editor: Editor,
    cursor: Option<PhysicalPosition<f64>>,
    fatal: Option<EngineError>,
}

impl SketchApp {
    pub fn new(config: EditorConfig) -> Result<Self, EngineError> {
        let event_loop = EventLoop::new()?;

        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let scene = Scene::new(CameraManager::from_config(&config.camera, aspect));
        let editor = Editor::from_config(&config);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                editor,
                cursor: None,
                fatal: None,
            },
        })
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> Result<(), EngineError> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let window_config = &self.config.window;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(window_config.title.clone())
                .with_inner_size(LogicalSize::new(window_config.width, window_config.height)),
        )?;
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let size = self.surface_size(&window_handle);
        log::info!(
            "window created, surface {}x{} (scale factor {:.2})",
            size.width,
            size.height,
            window_handle.scale_factor()
        );

        let render_config = self.config.render;
        let window_clone = window_handle.clone();
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, size.width, size.height, &render_config).await
        })?;

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window_handle,
        );
        ui_manager.update_display_size(window_handle.inner_size(), size);

        self.scene
            .camera_manager
            .camera
            .resize_projection(size.width, size.height);
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn surface_size(&self, window: &Window) -> PhysicalSize<u32> {
        viewport::surface_size(
            window.inner_size(),
            window.scale_factor(),
            self.config.render.max_pixel_ratio,
        )
    }

    fn resize(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let size = self.surface_size(&window);
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.scene
            .camera_manager
            .camera
            .resize_projection(size.width, size.height);
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(size.width, size.height);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.update_display_size(window.inner_size(), size);
        }
    }

    /// World ray under the cursor, in window pixels.
    fn cursor_ray(&self) -> Option<Ray> {
        let window = self.window.as_ref()?;
        let cursor = self.cursor?;
        let size = window.inner_size();
        self.editor.picker().screen_to_ray(
            (cursor.x as f32, cursor.y as f32),
            (size.width as f32, size.height as f32),
            &self.scene.camera_manager.camera,
        )
    }

    fn redraw(&mut self) -> Result<(), EngineError> {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return Ok(());
        };

        self.scene.update();
        self.editor.sync(&self.scene);

        render_engine.update(self.scene.camera_manager.camera.uniform);
        self.scene.prepare_gpu_resources(
            render_engine.device(),
            render_engine.queue(),
            render_engine.object_layout(),
        );
        render_engine.set_overlay_lines(&self.editor.gizmo().handle_lines());

        let state = PanelState::from_editor(&self.editor);
        let actions: Vec<EditorAction> =
            ui_manager.update_logic(window, |ui| editor_panels(ui, state))?;

        let status = render_engine.render_frame(&self.scene, |device, queue, encoder, view| {
            if let Err(e) = ui_manager.render_display_only(device, queue, encoder, view) {
                log::error!("ui render failed: {}", e);
            }
        })?;
        if status == FrameStatus::Skipped {
            log::debug!("frame skipped");
        }

        for action in actions {
            self.editor.apply(&mut self.scene, action);
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{}", error);
        self.fatal = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(error) = self.init_graphics(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let WindowEvent::CursorMoved { position, .. } = event {
            self.cursor = Some(position);
        }

        // UI sees input first; pointer input it claims never reaches the scene
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.scene
                    .camera_manager
                    .process_keyboard_event(&key_event);

                if key_event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(key_code) = key_event.physical_key {
                    if key_code == KeyCode::Escape {
                        event_loop.exit();
                    } else {
                        self.editor.key_down(&mut self.scene, key_code);
                    }
                }
            }
            WindowEvent::CursorMoved { .. } => {
                if let Some(ray) = self.cursor_ray() {
                    self.editor.pointer_move(&mut self.scene, &ray);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let Some(ray) = self.cursor_ray() else {
                    return;
                };
                match state {
                    ElementState::Pressed => self.editor.pointer_down(&mut self.scene, &ray),
                    ElementState::Released => {
                        self.editor.pointer_up(&mut self.scene, &ray);
                        self.editor.click();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.redraw() {
                    self.fail(event_loop, error);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        // Check if UI wants to capture input before processing camera events
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_mouse() {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.registry.dispose_all();
        self.ui_manager = None;
        self.render_engine = None;
        log::info!("shut down");
    }
}
