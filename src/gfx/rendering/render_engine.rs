//! WGPU-based rendering engine for the editor
//!
//! Owns the surface, the depth buffer, the global uniforms and the three
//! pipelines a frame uses: shaded meshes, the floor grid and the gizmo
//! overlay. The UI is drawn last through a caller supplied callback.

use std::sync::Arc;
use wgpu::{util::DeviceExt, Device, TextureFormat};

use crate::config::{DirectionalLight, HemisphereLight, RenderConfig};
use crate::error::EngineError;
use crate::gfx::{
    camera::camera_utils::CameraUniform,
    geometry,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        material::object_bind_group_layout,
        texture_resource::TextureResource,
    },
    scene::{scene::Scene, vertex::LineVertex},
};
use crate::wgpu_utils::binding_builder::BindGroupLayoutWithDesc;

use super::pipeline_manager::{DepthConfig, PipelineConfig, PipelineManager, VertexLayout};
use super::render_pass_ext::DrawSceneObject;

const MESH_PIPELINE: &str = "Mesh";
const GRID_PIPELINE: &str = "Grid";
const OVERLAY_PIPELINE: &str = "Overlay";

const GRID_CENTER_COLOR: [f32; 4] = [0.267, 0.267, 0.267, 1.0];
const GRID_COLOR: [f32; 4] = [0.533, 0.533, 0.533, 1.0];

/// Outcome of one [`RenderEngine::render_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface had to be reconfigured or timed out; nothing was drawn
    Skipped,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_layout: BindGroupLayoutWithDesc,

    grid_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    overlay_buffer: Option<wgpu::Buffer>,
    overlay_vertex_count: u32,

    clear_color: wgpu::Color,
    sun: DirectionalLight,
    ambient: HemisphereLight,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Requests an adapter and device, configures the surface at
    /// `width` x `height` and builds every pipeline up front.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        render: &RenderConfig,
    ) -> Result<RenderEngine, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(EngineError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(render.vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "surface configured: {}x{} {:?} {:?}",
            config.width,
            config.height,
            format,
            config.present_mode
        );

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);
        let object_layout = object_bind_group_layout(&device);

        let grid_vertices: Vec<LineVertex> =
            geometry::generate_grid(render.grid_size, render.grid_divisions)
                .into_iter()
                .enumerate()
                .map(|(i, position)| {
                    // the first two lines are the center axes
                    let color = if i < 4 { GRID_CENTER_COLOR } else { GRID_COLOR };
                    LineVertex::new(position, color)
                })
                .collect();
        let grid_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&grid_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        pipeline_manager.load_shader("lines", include_str!("lines.wgsl"));

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            PipelineConfig::default()
                .with_label("MESH")
                .with_shader("scene")
                .with_cull_mode(None)
                .with_depth(DepthConfig::standard(TextureResource::DEPTH_FORMAT))
                .with_color_target(format, Some(wgpu::BlendState::REPLACE))
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    object_layout.layout.clone(),
                ]),
        );

        pipeline_manager.register_pipeline(
            GRID_PIPELINE,
            PipelineConfig::default()
                .with_label("GRID")
                .with_shader("lines")
                .with_vertex_layout(VertexLayout::Line)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_depth(DepthConfig::standard(TextureResource::DEPTH_FORMAT))
                .with_color_target(format, Some(wgpu::BlendState::ALPHA_BLENDING))
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        pipeline_manager.register_pipeline(
            OVERLAY_PIPELINE,
            PipelineConfig::default()
                .with_label("OVERLAY")
                .with_shader("lines")
                .with_vertex_layout(VertexLayout::Line)
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_depth(DepthConfig::always_on_top(TextureResource::DEPTH_FORMAT))
                .with_color_target(format, Some(wgpu::BlendState::ALPHA_BLENDING))
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()]),
        );

        pipeline_manager.create_all_pipelines()?;

        let [r, g, b] = render.clear_color;

        Ok(RenderEngine {
            device: device_handle,
            config,
            format,
            surface,
            queue: queue_handle,
            depth_texture,
            pipeline_manager,
            global_bindings,
            global_ubo,
            object_layout,
            grid_buffer,
            grid_vertex_count: grid_vertices.len() as u32,
            overlay_buffer: None,
            overlay_vertex_count: 0,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            sun: render.sun,
            ambient: render.ambient,
        })
    }

    /// Layout every per-object bind group is created from
    pub fn object_layout(&self) -> &BindGroupLayoutWithDesc {
        &self.object_layout
    }

    /// Uploads the gizmo handles for the next frame. An empty slice hides
    /// the overlay.
    pub fn set_overlay_lines(&mut self, lines: &[LineVertex]) {
        self.overlay_vertex_count = lines.len() as u32;
        if lines.is_empty() {
            return;
        }

        let size = std::mem::size_of_val(lines) as wgpu::BufferAddress;
        let reuse = self
            .overlay_buffer
            .as_ref()
            .is_some_and(|buffer| buffer.size() >= size);
        if !reuse {
            if let Some(old) = self.overlay_buffer.take() {
                old.destroy();
            }
            self.overlay_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Overlay Vertex Buffer"),
                size,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        if let Some(buffer) = &self.overlay_buffer {
            self.queue.write_buffer(buffer, 0, bytemuck::cast_slice(lines));
        }
    }

    /// Draws one frame. Objects must have been prepared with
    /// [`Scene::prepare_gpu_resources`] first.
    ///
    /// `Lost` and `Outdated` surfaces are reconfigured and the frame skipped;
    /// running out of memory is returned as an error.
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: F) -> Result<FrameStatus, EngineError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface texture timed out");
                return Ok(FrameStatus::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            if let Some(pipeline) = self.pipeline_manager.pipeline(GRID_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_vertex_buffer(0, self.grid_buffer.slice(..));
                render_pass.draw(0..self.grid_vertex_count, 0..1);
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline(MESH_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                for (_, object) in scene.registry.iter() {
                    render_pass.draw_scene_object(object, 1);
                }
            }

            if self.overlay_vertex_count > 0 {
                if let (Some(pipeline), Some(buffer)) = (
                    self.pipeline_manager.pipeline(OVERLAY_PIPELINE),
                    self.overlay_buffer.as_ref(),
                ) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..self.overlay_vertex_count, 0..1);
                }
            }
        }

        ui_callback(
            &self.device,
            &self.queue,
            &mut encoder,
            &surface_texture_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(FrameStatus::Presented)
    }

    /// Writes the per-frame camera and light block
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            self.sun,
            self.ambient,
        );
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        log::debug!("surface resized to {}x{}", width, height);
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = present_mode(enable);
        self.surface.configure(&self.device, &self.config);
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}
