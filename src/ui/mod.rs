//! # User Interface Module
//!
//! Dear ImGui integration and the editor's panels.
//!
//! - [`UiManager`] wires ImGui into winit and wgpu and reports whether the
//!   UI wants the pointer, so clicks on a panel never reach the scene.
//! - [`panel`] builds the "Add", "Controls" and "Drawing Options" windows and
//!   returns the [`EditorAction`](crate::editor::EditorAction)s the user
//!   triggered.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{editor_panels, PanelState};
