//! # Gizmo System
//!
//! On-screen handles for manipulating the selected object. The
//! [`TransformGizmo`] is attached to at most one object at a time and is
//! drawn as a line overlay on top of the scene.

pub mod transform_gizmo;

// Re-export main types
pub use transform_gizmo::{GizmoAxis, GizmoConfig, GizmoMode, TransformGizmo};
