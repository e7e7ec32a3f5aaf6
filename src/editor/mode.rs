//! Mode flags for the editor state machine.

/// Top-level editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Pointer input picks objects and drives the transform gizmo
    #[default]
    Select,
    /// Pointer input records pen strokes onto scene geometry
    Draw,
}

/// Tool used while in [`EditMode::Draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenTool {
    #[default]
    Pen,
    /// Reserved. Pointer input is ignored while the eraser is active.
    Eraser,
}

impl EditMode {
    pub fn label(self) -> &'static str {
        match self {
            EditMode::Select => "Select",
            EditMode::Draw => "Draw",
        }
    }
}
