//! Core rendering functionality
//!
//! Handles render pipelines, GPU resource management, and frame rendering.

pub mod pipeline_manager;
pub mod render_engine;
pub mod render_pass_ext;
pub mod viewport;

// Re-export main types
pub use pipeline_manager::{DepthConfig, PipelineConfig, PipelineManager, VertexLayout};
pub use render_engine::{FrameStatus, RenderEngine};
