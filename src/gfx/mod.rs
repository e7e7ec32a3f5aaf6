//! # Graphics Module
//!
//! Everything between the scene model and the GPU.
//!
//! - **Camera** ([`camera`]) - orbit camera with damped mouse controls
//! - **Geometry** ([`geometry`]) - primitive meshes, the floor grid and the
//!   tube mesh pen strokes are built from
//! - **Scene** ([`scene`]) - scene objects and the registry that owns them
//! - **Picking** ([`picking`]) - screen rays and ray casts against the registry
//! - **Gizmos** ([`gizmos`]) - the transform gizmo
//! - **Rendering** ([`rendering`]) - surface, pipelines and frame rendering
//! - **Resources** ([`resources`]) - uniform blocks, materials, depth buffer

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
