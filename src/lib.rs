//! sketchbox
//!
//! An interactive 3D scene editor built on wgpu and winit. Add boxes,
//! spheres and planes, move them with a transform gizmo, and draw freehand
//! pen strokes onto their surfaces.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::SketchApp;
pub use config::EditorConfig;
pub use error::EngineError;

/// Creates the editor with `config` and runs it until the window closes
pub fn run(config: EditorConfig) -> Result<(), EngineError> {
    SketchApp::new(config)?.run()
}
