//! Editor panels
//!
//! Panels never touch the scene directly. Each button press becomes an
//! [`EditorAction`] that the application applies once the frame is built.

use crate::editor::{Editor, EditorAction, PenColor, PenStyle, PenThickness};
use crate::gfx::gizmos::GizmoMode;

const PANEL_WIDTH: f32 = 240.0;
const SWATCH_SIZE: [f32; 2] = [36.0, 36.0];

/// What the panels show for the current editor state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    pub drawing: bool,
    pub gizmo_mode: GizmoMode,
    pub pen: PenStyle,
}

impl PanelState {
    pub fn from_editor(editor: &Editor) -> Self {
        Self {
            drawing: editor.is_draw_mode(),
            gizmo_mode: editor.gizmo().mode(),
            pen: editor.pen_style(),
        }
    }
}

/// Buttons of the "Add" window. While drawing only "Stop Draw" is offered.
pub fn add_buttons(drawing: bool) -> &'static [(&'static str, EditorAction)] {
    const EDITING: &[(&str, EditorAction)] = &[
        ("Add Cube", EditorAction::AddCube),
        ("Add Sphere", EditorAction::AddSphere),
        ("Add Plane", EditorAction::AddPlane),
        ("Delete Shape", EditorAction::DeleteShape),
        ("Delete All Shapes", EditorAction::DeleteAllShapes),
        ("Delete All Lines", EditorAction::DeleteAllLines),
        ("Start Draw", EditorAction::StartDraw),
    ];
    const DRAWING: &[(&str, EditorAction)] = &[("Stop Draw", EditorAction::StopDraw)];

    if drawing {
        DRAWING
    } else {
        EDITING
    }
}

/// Buttons of the "Controls" window. Hidden entirely while drawing.
pub fn control_buttons(drawing: bool) -> &'static [(&'static str, EditorAction)] {
    const CONTROLS: &[(&str, EditorAction)] = &[
        ("Translate", EditorAction::SetGizmoMode(GizmoMode::Translate)),
        ("Rotate", EditorAction::SetGizmoMode(GizmoMode::Rotate)),
        ("Scale", EditorAction::SetGizmoMode(GizmoMode::Scale)),
        ("Disable Controls", EditorAction::DisableControls),
    ];

    if drawing {
        &[]
    } else {
        CONTROLS
    }
}

/// Builds all editor windows and returns the actions the user triggered.
pub fn editor_panels(ui: &imgui::Ui, state: PanelState) -> Vec<EditorAction> {
    let mut actions = Vec::new();

    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return actions;
    }

    ui.window("Add")
        .size([PANEL_WIDTH, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            for (label, action) in add_buttons(state.drawing) {
                if ui.button_with_size(label, [PANEL_WIDTH - 20.0, 0.0]) {
                    actions.push(*action);
                }
            }
        });

    let controls = control_buttons(state.drawing);
    if !controls.is_empty() {
        ui.window("Controls")
            .size([PANEL_WIDTH, 0.0], imgui::Condition::FirstUseEver)
            .position([20.0, 400.0], imgui::Condition::FirstUseEver)
            .always_auto_resize(true)
            .collapsible(true)
            .build(|| {
                for (label, action) in controls {
                    let active = matches!(action, EditorAction::SetGizmoMode(mode) if *mode == state.gizmo_mode);
                    let text = if active {
                        format!("> {}", label)
                    } else {
                        label.to_string()
                    };
                    if ui.button_with_size(format!("{}##{}", text, label), [PANEL_WIDTH - 20.0, 0.0]) {
                        actions.push(*action);
                    }
                }
            });
    }

    ui.window("Drawing Options")
        .size([PANEL_WIDTH, 0.0], imgui::Condition::FirstUseEver)
        .position([display_size[0] - PANEL_WIDTH - 20.0, 20.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            ui.text("Color");
            for (i, color) in PenColor::ALL.into_iter().enumerate() {
                if i > 0 {
                    ui.same_line();
                }
                let [r, g, b] = color.rgb();
                if ui
                    .color_button_config(color.label(), [r, g, b, 1.0])
                    .size(SWATCH_SIZE)
                    .build()
                {
                    actions.push(EditorAction::SetPenColor(color));
                }
            }
            ui.text(format!("Current: {}", state.pen.color.label()));

            ui.separator();
            ui.text("Thickness");
            for thickness in PenThickness::ALL {
                let selected = (state.pen.width - thickness.width()).abs() < f32::EPSILON;
                if ui.radio_button_bool(thickness.label(), selected) {
                    actions.push(EditorAction::SetPenThickness(thickness));
                }
            }
        });

    actions
}
