//! Error types for the sketchbox editor
//!
//! Interaction-level failures (a ray that hits nothing, deleting without a
//! selection, removing an object that is not registered) are deliberately not
//! errors; they are silent no-ops inside the editor. The types here cover the
//! things that can actually go wrong while bringing up the window, the GPU and
//! the UI layer.

use thiserror::Error;

/// Errors raised while creating or driving the render host.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("surface texture unavailable: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("pipeline '{0}' failed to build: {1}")]
    Pipeline(String, String),

    #[error("ui error: {0}")]
    Ui(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
