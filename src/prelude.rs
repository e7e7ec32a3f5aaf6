//! # sketchbox Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use sketchbox::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let config = EditorConfig::from_env();
//!     SketchApp::new(config)?.run()
//! }
//! ```

// Application
pub use crate::app::SketchApp;
pub use crate::config::{EditorConfig, InteractionConfig, RenderConfig};
pub use crate::error::EngineError;

// Editing
pub use crate::editor::{EditMode, Editor, EditorAction, PenColor, PenStyle, PenThickness};
pub use crate::gfx::gizmos::{GizmoMode, TransformGizmo};

// Scene
pub use crate::gfx::camera::CameraManager;
pub use crate::gfx::picking::{ObjectPicker, Ray, RayHit};
pub use crate::gfx::scene::{ObjectId, ObjectKind, ObjectRegistry, Scene, SceneObject, Transform};

// Common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
