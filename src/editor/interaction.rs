//! The editor state machine.
//!
//! [`Editor`] owns every piece of transient interaction state: the current
//! mode, the selection, the transform gizmo, the pen style and the stroke in
//! progress. The application feeds it world-space rays for pointer input and
//! [`EditorAction`]s from the UI; all scene mutation goes through the
//! [`Scene`] passed in.

use cgmath::Vector3;
use winit::keyboard::KeyCode;

use crate::config::{EditorConfig, InteractionConfig};
use crate::editor::{
    actions::EditorAction,
    mode::{EditMode, PenTool},
    pen::{PenColor, PenStyle, PenThickness},
    stroke::StrokeBuilder,
};
use crate::gfx::{
    gizmos::{GizmoMode, TransformGizmo},
    picking::{ObjectPicker, Ray},
    scene::{ObjectId, ObjectKind, Scene, SceneObject},
};

pub struct Editor {
    mode: EditMode,
    pen_tool: PenTool,
    pen: PenStyle,
    stroke: StrokeBuilder,
    selection: Option<ObjectId>,
    gizmo: TransformGizmo,
    picker: ObjectPicker,
    config: InteractionConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(PenStyle::default(), InteractionConfig::default())
    }
}

impl Editor {
    pub fn new(pen: PenStyle, config: InteractionConfig) -> Self {
        Self {
            mode: EditMode::Select,
            pen_tool: PenTool::Pen,
            pen,
            stroke: StrokeBuilder::new(),
            selection: None,
            gizmo: TransformGizmo::new(),
            picker: ObjectPicker::new(),
            config,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.pen, config.interaction)
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_draw_mode(&self) -> bool {
        self.mode == EditMode::Draw
    }

    pub fn pen_tool(&self) -> PenTool {
        self.pen_tool
    }

    /// True while a stroke is being recorded.
    pub fn is_pen_drawing(&self) -> bool {
        self.stroke.is_drawing()
    }

    pub fn stroke(&self) -> &StrokeBuilder {
        &self.stroke
    }

    pub fn pen_style(&self) -> PenStyle {
        self.pen
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    pub fn gizmo(&self) -> &TransformGizmo {
        &self.gizmo
    }

    pub fn picker(&self) -> &ObjectPicker {
        &self.picker
    }

    // ----- modes -----

    pub fn start_draw(&mut self, scene: &mut Scene) {
        self.gizmo.detach();
        scene.camera_manager.set_orbit_enabled(false);
        self.mode = EditMode::Draw;
        self.start_pen();
        log::info!("entered draw mode");
    }

    pub fn stop_draw(&mut self, scene: &mut Scene) {
        scene.camera_manager.set_orbit_enabled(true);
        self.mode = EditMode::Select;
        log::info!("entered select mode");
    }

    pub fn start_pen(&mut self) {
        self.pen_tool = PenTool::Pen;
    }

    pub fn stop_pen(&mut self) {
        self.pen_tool = PenTool::Eraser;
    }

    pub fn set_gizmo_mode(&mut self, mode: GizmoMode) {
        self.gizmo.set_mode(mode);
    }

    /// Hides the gizmo. The selection itself is kept.
    pub fn disable_controls(&mut self) {
        self.gizmo.detach();
    }

    pub fn set_pen_color(&mut self, color: PenColor) {
        self.pen.set_color(color);
        log::debug!("pen color {}", color.label());
    }

    pub fn set_pen_thickness(&mut self, thickness: PenThickness) {
        self.pen.set_thickness(thickness);
        log::debug!("pen thickness {}", thickness.label());
    }

    // ----- shapes -----

    pub fn add_cube(&mut self, scene: &mut Scene) -> ObjectId {
        self.add_shape(scene, SceneObject::cube())
    }

    pub fn add_sphere(&mut self, scene: &mut Scene) -> ObjectId {
        self.add_shape(scene, SceneObject::sphere())
    }

    pub fn add_plane(&mut self, scene: &mut Scene) -> ObjectId {
        self.add_shape(scene, SceneObject::plane())
    }

    fn add_shape(&mut self, scene: &mut Scene, object: SceneObject) -> ObjectId {
        let kind = object.kind;
        let position = object.transform.translation;
        let id = scene.registry.add(object);
        self.select(id, position);
        log::info!("added {} {}", kind.label(), id);
        id
    }

    /// Deletes the active selection. Returns false when nothing is selected.
    pub fn delete_selected(&mut self, scene: &mut Scene) -> bool {
        let Some(id) = self.selection.take() else {
            log::debug!("delete: nothing selected");
            return false;
        };
        self.gizmo.detach();
        let removed = scene.registry.remove(id);
        if removed {
            log::info!("deleted {}", id);
        }
        removed
    }

    pub fn delete_all_shapes(&mut self, scene: &mut Scene) -> usize {
        let removed = self.delete_all(scene, |kind| kind.is_shape());
        log::info!("deleted {} shape(s)", removed);
        removed
    }

    pub fn delete_all_lines(&mut self, scene: &mut Scene) -> usize {
        let removed = self.delete_all(scene, |kind| kind == ObjectKind::LineStroke);
        if let Some(id) = self.stroke.provisional() {
            if !scene.registry.contains(id) {
                self.stroke.reset();
            }
        }
        log::info!("deleted {} line(s)", removed);
        removed
    }

    fn delete_all(&mut self, scene: &mut Scene, matches: impl Fn(ObjectKind) -> bool) -> usize {
        let removed = scene.registry.clear(|object| matches(object.kind));
        if removed > 0 {
            self.gizmo.detach();
        }
        if let Some(id) = self.selection {
            if !scene.registry.contains(id) {
                self.selection = None;
            }
        }
        removed
    }

    fn select(&mut self, id: ObjectId, position: Vector3<f32>) {
        self.selection = Some(id);
        self.gizmo.attach(id, position);
    }

    // ----- input -----

    pub fn pointer_down(&mut self, scene: &mut Scene, ray: &Ray) {
        match self.mode {
            EditMode::Select => self.select_pointer_down(scene, ray),
            EditMode::Draw => {
                if self.pen_tool != PenTool::Pen {
                    return;
                }
                match self.picker.pick(ray, &scene.registry) {
                    Some(hit) => {
                        self.stroke.begin(hit.point, self.pen, &mut scene.registry);
                    }
                    None => log::debug!("pen down: no surface under cursor"),
                }
            }
        }
    }

    fn select_pointer_down(&mut self, scene: &mut Scene, ray: &Ray) {
        if let Some(axis) = self.gizmo.hit_test(ray) {
            let start = self
                .gizmo
                .attached()
                .and_then(|id| scene.registry.get(id))
                .map(|object| object.transform);
            if let Some(start) = start {
                if self.gizmo.begin_drag(axis, ray, start) {
                    scene.camera_manager.set_orbit_enabled(false);
                    log::debug!("gizmo drag started on {:?}", axis);
                    return;
                }
            }
        }

        match self.picker.pick(ray, &scene.registry) {
            Some(hit) => {
                let position = scene
                    .registry
                    .get(hit.object_id)
                    .map(|object| object.transform.translation)
                    .unwrap_or(hit.point);
                self.select(hit.object_id, position);
                log::debug!("selected {} at distance {:.3}", hit.object_id, hit.distance);
            }
            None => log::trace!("select: miss"),
        }
    }

    pub fn pointer_move(&mut self, scene: &mut Scene, ray: &Ray) {
        match self.mode {
            EditMode::Select => {
                if !self.gizmo.is_dragging() {
                    self.gizmo.hit_test(ray);
                    return;
                }
                let Some(id) = self.gizmo.attached() else {
                    return;
                };
                if let Some(transform) = self.gizmo.update_drag(ray) {
                    if let Some(object) = scene.registry.get_mut(id) {
                        object.transform = transform;
                        self.gizmo.set_position(transform.translation);
                    }
                }
            }
            EditMode::Draw => {
                if !self.stroke.is_drawing() {
                    return;
                }
                if let Some(hit) = self.picker.pick(ray, &scene.registry) {
                    self.stroke.extend(hit.point, self.pen, &mut scene.registry);
                }
            }
        }
    }

    pub fn pointer_up(&mut self, scene: &mut Scene, ray: &Ray) {
        match self.mode {
            EditMode::Select => {
                if let Some(id) = self.gizmo.end_drag() {
                    scene.camera_manager.set_orbit_enabled(true);
                    log::debug!("gizmo drag finished on {}", id);
                }
            }
            EditMode::Draw => {
                if !self.stroke.is_drawing() {
                    return;
                }
                match self.picker.pick(ray, &scene.registry) {
                    Some(hit) => {
                        self.stroke.finish(Some(hit.point), self.pen, &mut scene.registry);
                    }
                    None if self.config.finalize_on_miss => {
                        self.stroke.finish(None, self.pen, &mut scene.registry);
                    }
                    None => log::debug!("pen up off geometry: stroke left open"),
                }
            }
        }
    }

    /// Returns true when the key was handled.
    pub fn key_down(&mut self, scene: &mut Scene, key: KeyCode) -> bool {
        match key {
            KeyCode::Backspace => {
                self.delete_selected(scene);
                true
            }
            _ => false,
        }
    }

    pub fn click(&mut self) {}

    /// Keeps the gizmo on its object and at a constant on-screen size.
    /// Called once per frame.
    pub fn sync(&mut self, scene: &Scene) {
        if let Some(id) = self.gizmo.attached() {
            match scene.registry.get(id) {
                Some(object) => {
                    if !self.gizmo.is_dragging() {
                        self.gizmo.set_position(object.transform.translation);
                    }
                }
                None => self.gizmo.detach(),
            }
        }
        self.gizmo
            .update_screen_scale(scene.camera_manager.camera.eye);
    }

    pub fn apply(&mut self, scene: &mut Scene, action: EditorAction) {
        log::debug!("action {:?}", action);
        match action {
            EditorAction::AddCube => {
                self.add_cube(scene);
            }
            EditorAction::AddSphere => {
                self.add_sphere(scene);
            }
            EditorAction::AddPlane => {
                self.add_plane(scene);
            }
            EditorAction::DeleteShape => {
                self.delete_selected(scene);
            }
            EditorAction::DeleteAllShapes => {
                self.delete_all_shapes(scene);
            }
            EditorAction::DeleteAllLines => {
                self.delete_all_lines(scene);
            }
            EditorAction::StartDraw => self.start_draw(scene),
            EditorAction::StopDraw => self.stop_draw(scene),
            EditorAction::SetGizmoMode(mode) => self.set_gizmo_mode(mode),
            EditorAction::DisableControls => self.disable_controls(),
            EditorAction::SetPenColor(color) => self.set_pen_color(color),
            EditorAction::SetPenThickness(thickness) => self.set_pen_thickness(thickness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::CameraManager;

    fn scene() -> Scene {
        Scene::new(CameraManager::default())
    }

    /// Ray from z = 5 straight down the -Z axis through (x, y).
    fn ray_at(x: f32, y: f32) -> Ray {
        Ray::new(Vector3::new(x, y, 5.0), Vector3::new(0.0, 0.0, -1.0))
    }

    /// A 4 x 4 drawing surface at z = 0 whose triangle seams avoid the
    /// sample points used below.
    fn drawing_surface(editor: &mut Editor, scene: &mut Scene) -> ObjectId {
        let id = editor.add_plane(scene);
        if let Some(plane) = scene.registry.get_mut(id) {
            plane.transform.translation = Vector3::new(0.3, 0.45, 0.0);
            plane.transform.scale = Vector3::new(4.0, 4.0, 1.0);
        }
        id
    }

    fn stroke_point_count(scene: &Scene, id: ObjectId) -> usize {
        scene
            .registry
            .get(id)
            .and_then(|object| object.stroke.as_ref())
            .map(|stroke| stroke.point_count())
            .unwrap_or(0)
    }

    fn only_stroke(scene: &Scene) -> Option<ObjectId> {
        let strokes: Vec<_> = scene
            .registry
            .iter()
            .filter(|(_, object)| object.kind == ObjectKind::LineStroke)
            .map(|(id, _)| id)
            .collect();
        match strokes.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    #[test]
    fn test_add_shapes_then_delete_all() {
        let mut scene = scene();
        let mut editor = Editor::default();

        editor.add_cube(&mut scene);
        let sphere = editor.add_sphere(&mut scene);
        assert_eq!(scene.registry.len(), 2);
        assert_eq!(editor.selection(), Some(sphere));
        assert_eq!(editor.gizmo().attached(), Some(sphere));

        assert_eq!(editor.delete_all_shapes(&mut scene), 2);
        assert!(scene.registry.is_empty());
        assert_eq!(editor.selection(), None);
        assert!(!editor.gizmo().is_attached());
    }

    #[test]
    fn test_delete_selected() {
        let mut scene = scene();
        let mut editor = Editor::default();

        let cube = editor.add_cube(&mut scene);
        let sphere = editor.add_sphere(&mut scene);
        // the cube's front face is nearer than the sphere inside it
        editor.pointer_down(&mut scene, &ray_at(0.1, -0.3));
        editor.pointer_up(&mut scene, &ray_at(0.1, -0.3));
        assert_eq!(editor.selection(), Some(cube));

        assert!(editor.key_down(&mut scene, KeyCode::Backspace));
        assert_eq!(scene.registry.ids(), vec![sphere]);
        assert_eq!(editor.selection(), None);
        assert!(!editor.gizmo().is_attached());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut scene = scene();
        let mut editor = Editor::default();
        let cube = editor.add_cube(&mut scene);
        editor.add_sphere(&mut scene);

        // deleting the sphere leaves the cube behind with nothing selected
        assert!(editor.delete_selected(&mut scene));
        assert_eq!(editor.selection(), None);
        editor.pointer_down(&mut scene, &ray_at(3.0, 3.0));
        editor.pointer_up(&mut scene, &ray_at(3.0, 3.0));
        assert_eq!(editor.selection(), None);

        let before = scene.registry.ids();
        assert_eq!(before, vec![cube]);
        assert!(!editor.delete_selected(&mut scene));
        assert!(editor.key_down(&mut scene, KeyCode::Backspace));
        assert!(!editor.key_down(&mut scene, KeyCode::KeyA));
        assert_eq!(scene.registry.ids(), before);
        assert!(!editor.gizmo().is_attached());
    }

    #[test]
    fn test_pick_selects_nearest_and_miss_keeps_selection() {
        let mut scene = scene();
        let mut editor = Editor::default();

        let cube = editor.add_cube(&mut scene);
        let plane = editor.add_plane(&mut scene);
        if let Some(object) = scene.registry.get_mut(plane) {
            object.transform.translation = Vector3::new(0.0, 0.0, 2.0);
        }
        editor.sync(&scene);

        editor.disable_controls();
        editor.pointer_down(&mut scene, &ray_at(0.3, 0.2));
        assert_eq!(editor.selection(), Some(plane));

        if let Some(object) = scene.registry.get_mut(plane) {
            object.transform.translation = Vector3::new(5.0, 0.0, 2.0);
        }
        editor.disable_controls();
        editor.pointer_down(&mut scene, &ray_at(0.3, 0.2));
        assert_eq!(editor.selection(), Some(cube));
        assert_eq!(editor.gizmo().attached(), Some(cube));

        editor.pointer_down(&mut scene, &ray_at(3.0, 3.0));
        assert_eq!(editor.selection(), Some(cube));
    }

    #[test]
    fn test_gizmo_drag_moves_selection_and_blocks_orbit() {
        let mut scene = scene();
        let mut editor = Editor::default();
        let cube = editor.add_cube(&mut scene);
        assert_eq!(editor.gizmo().screen_scale(), 1.0);

        editor.pointer_down(&mut scene, &ray_at(0.5, 0.02));
        assert!(editor.gizmo().is_dragging());
        assert!(!scene.camera_manager.orbit_enabled());

        editor.pointer_move(&mut scene, &ray_at(1.5, 0.02));
        let translation = scene.registry.get(cube).map(|o| o.transform.translation);
        let translation = translation.expect("cube");
        assert!((translation.x - 1.0).abs() < 1e-4);
        assert!(translation.y.abs() < 1e-4);

        editor.pointer_up(&mut scene, &ray_at(1.5, 0.02));
        assert!(!editor.gizmo().is_dragging());
        assert!(scene.camera_manager.orbit_enabled());
        assert_eq!(editor.selection(), Some(cube));
    }

    #[test]
    fn test_draw_mode_toggles_orbit_and_detaches() {
        let mut scene = scene();
        let mut editor = Editor::default();
        let cube = editor.add_cube(&mut scene);

        editor.start_draw(&mut scene);
        assert!(editor.is_draw_mode());
        assert_eq!(editor.pen_tool(), PenTool::Pen);
        assert!(!scene.camera_manager.orbit_enabled());
        assert!(!editor.gizmo().is_attached());
        assert_eq!(editor.selection(), Some(cube));

        editor.stop_draw(&mut scene);
        assert_eq!(editor.mode(), EditMode::Select);
        assert!(scene.camera_manager.orbit_enabled());
    }

    #[test]
    fn test_stroke_with_three_hits() {
        let mut scene = scene();
        let mut editor = Editor::default();
        let plane = drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        assert!(editor.is_pen_drawing());
        assert_eq!(scene.registry.len(), 2);

        editor.pointer_move(&mut scene, &ray_at(1.0, 0.0));
        editor.pointer_up(&mut scene, &ray_at(1.0, 0.0));

        let stroke = only_stroke(&scene).expect("one stroke");
        assert_eq!(stroke_point_count(&scene, stroke), 3);
        assert!(!editor.is_pen_drawing());
        assert!(editor.stroke().points().is_empty());
        assert!(scene.registry.contains(plane));

        let points = scene
            .registry
            .get(stroke)
            .and_then(|object| object.stroke.as_ref())
            .map(|data| data.points.clone())
            .unwrap_or_default();
        assert!((points[0]).abs() < 1e-5);
        assert!((points[3] - 1.0).abs() < 1e-5);
        assert!(points[5].abs() < 1e-5);
    }

    #[test]
    fn test_missed_samples_add_no_points() {
        let mut scene = scene();
        let mut editor = Editor::default();
        drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);

        editor.pointer_down(&mut scene, &ray_at(20.0, 0.0));
        assert!(!editor.is_pen_drawing());
        assert_eq!(only_stroke(&scene), None);

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        for x in [0.5, 30.0, 1.0, -30.0, 1.5] {
            editor.pointer_move(&mut scene, &ray_at(x, 0.0));
        }
        editor.pointer_up(&mut scene, &ray_at(1.5, 0.1));

        let stroke = only_stroke(&scene).expect("one stroke");
        assert_eq!(stroke_point_count(&scene, stroke), 1 + 3 + 1);
    }

    #[test]
    fn test_pen_color_change_mid_stroke() {
        let mut scene = scene();
        let mut editor = Editor::default();
        drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);

        editor.pointer_down(&mut scene, &ray_at(-1.0, 1.0));
        editor.pointer_up(&mut scene, &ray_at(-0.5, 1.0));
        let first = only_stroke(&scene).expect("first stroke");

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        editor.apply(&mut scene, EditorAction::SetPenColor(PenColor::Red));
        editor.pointer_move(&mut scene, &ray_at(0.5, 0.0));
        let current = editor.stroke().provisional().expect("in progress");

        let color = |id| scene.registry.get(id).map(|o| o.material.base_color);
        assert_eq!(color(current), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(color(first), Some([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_release_off_geometry_finalizes_by_default() {
        let mut scene = scene();
        let mut editor = Editor::default();
        drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        editor.pointer_move(&mut scene, &ray_at(1.0, 0.0));
        editor.pointer_up(&mut scene, &ray_at(40.0, 0.0));

        assert!(!editor.is_pen_drawing());
        let stroke = only_stroke(&scene).expect("one stroke");
        assert_eq!(stroke_point_count(&scene, stroke), 2);
    }

    #[test]
    fn test_release_off_geometry_can_leave_stroke_open() {
        let mut scene = scene();
        let mut editor = Editor::new(
            PenStyle::default(),
            InteractionConfig {
                finalize_on_miss: false,
            },
        );
        drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        editor.pointer_up(&mut scene, &ray_at(40.0, 0.0));
        assert!(editor.is_pen_drawing());
        assert_eq!(editor.stroke().point_count(), 1);

        // the next press continues the same stroke
        editor.pointer_down(&mut scene, &ray_at(1.0, 0.0));
        editor.pointer_up(&mut scene, &ray_at(1.0, 0.5));
        let stroke = only_stroke(&scene).expect("one stroke");
        assert_eq!(stroke_point_count(&scene, stroke), 3);
        assert!(!editor.is_pen_drawing());
    }

    #[test]
    fn test_eraser_ignores_pointer() {
        let mut scene = scene();
        let mut editor = Editor::default();
        drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);
        editor.stop_pen();

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        editor.pointer_up(&mut scene, &ray_at(0.0, 0.0));
        assert_eq!(only_stroke(&scene), None);

        editor.start_pen();
        assert_eq!(editor.pen_tool(), PenTool::Pen);
    }

    #[test]
    fn test_delete_all_lines_keeps_shapes_and_aborts_open_stroke() {
        let mut scene = scene();
        let mut editor = Editor::default();
        let plane = drawing_surface(&mut editor, &mut scene);
        editor.start_draw(&mut scene);

        editor.pointer_down(&mut scene, &ray_at(0.0, 0.0));
        editor.pointer_up(&mut scene, &ray_at(1.0, 0.0));
        editor.pointer_down(&mut scene, &ray_at(0.0, 1.0));
        assert!(editor.is_pen_drawing());

        assert_eq!(editor.delete_all_lines(&mut scene), 2);
        assert!(!editor.is_pen_drawing());
        assert_eq!(scene.registry.ids(), vec![plane]);

        editor.pointer_move(&mut scene, &ray_at(1.0, 1.0));
        assert_eq!(only_stroke(&scene), None);
    }

    #[test]
    fn test_apply_dispatches_ui_actions() {
        let mut scene = scene();
        let mut editor = Editor::default();

        editor.apply(&mut scene, EditorAction::AddCube);
        editor.apply(&mut scene, EditorAction::AddSphere);
        editor.apply(&mut scene, EditorAction::AddPlane);
        assert_eq!(scene.registry.len(), 3);

        editor.apply(&mut scene, EditorAction::SetGizmoMode(GizmoMode::Rotate));
        assert_eq!(editor.gizmo().mode(), GizmoMode::Rotate);

        editor.apply(&mut scene, EditorAction::DisableControls);
        assert!(!editor.gizmo().is_attached());
        assert!(editor.selection().is_some());

        editor.apply(&mut scene, EditorAction::DeleteShape);
        assert_eq!(scene.registry.len(), 2);

        editor.apply(&mut scene, EditorAction::SetPenThickness(PenThickness::Thick));
        assert_eq!(editor.pen_style().width, PenThickness::Thick.width());

        editor.apply(&mut scene, EditorAction::StartDraw);
        assert!(editor.is_draw_mode());
        editor.apply(&mut scene, EditorAction::StopDraw);
        assert!(!editor.is_draw_mode());

        editor.apply(&mut scene, EditorAction::DeleteAllShapes);
        assert!(scene.registry.is_empty());
    }

    #[test]
    fn test_sync_detaches_from_removed_object() {
        let mut scene = scene();
        let mut editor = Editor::default();
        let cube = editor.add_cube(&mut scene);
        if let Some(object) = scene.registry.get_mut(cube) {
            object.transform.translation = Vector3::new(0.0, 1.0, 0.0);
        }

        editor.sync(&scene);
        assert_eq!(editor.gizmo().position(), Vector3::new(0.0, 1.0, 0.0));

        scene.registry.remove(cube);
        editor.sync(&scene);
        assert!(!editor.gizmo().is_attached());
    }
}
