//! # Scene Management Module
//!
//! Scene objects, the registry that owns them, and vertex formats.
//!
//! ## Key Components
//!
//! - [`Scene`] - The registry plus the camera looking at it
//! - [`ObjectRegistry`] - Ordered owner of every [`SceneObject`]
//! - [`SceneObject`] - A mesh with a kind tag, transform and material
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex formats
//!
//! ## Usage
//!
//! ```rust
//! use sketchbox::gfx::scene::{ObjectKind, ObjectRegistry, SceneObject};
//!
//! let mut registry = ObjectRegistry::new();
//! let id = registry.add(SceneObject::cube());
//! assert_eq!(registry.get(id).map(|o| o.kind), Some(ObjectKind::Box));
//! assert!(registry.remove(id));
//! ```

pub mod object;
pub mod registry;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{ObjectId, ObjectKind, SceneObject, StrokeData, Transform};
pub use registry::ObjectRegistry;
pub use scene::Scene;
pub use vertex::{LineVertex, Vertex3D};
