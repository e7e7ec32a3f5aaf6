use crate::editor::pen::{PenColor, PenThickness};
use crate::gfx::gizmos::GizmoMode;

/// Commands produced by the UI panels and applied to the editor after the
/// frame has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    AddCube,
    AddSphere,
    AddPlane,
    DeleteShape,
    DeleteAllShapes,
    DeleteAllLines,
    StartDraw,
    StopDraw,
    SetGizmoMode(GizmoMode),
    DisableControls,
    SetPenColor(PenColor),
    SetPenThickness(PenThickness),
}
