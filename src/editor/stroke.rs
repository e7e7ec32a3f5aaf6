//! Incremental construction of pen strokes.
//!
//! A stroke exists in the registry from its first sample onward. Every new
//! sample replaces the provisional object with one rebuilt from the whole
//! point buffer, so the registry never holds more than one object for the
//! stroke being drawn.

use cgmath::Vector3;

use crate::editor::pen::PenStyle;
use crate::gfx::scene::{ObjectId, ObjectRegistry, SceneObject};

#[derive(Debug, Default)]
pub struct StrokeBuilder {
    /// Flat `[x, y, z, ...]` buffer of the stroke in progress
    points: Vec<f32>,
    provisional: Option<ObjectId>,
    drawing: bool,
}

impl StrokeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between the first sample of a stroke and its completion.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }

    /// Registry id of the mesh for the stroke in progress.
    pub fn provisional(&self) -> Option<ObjectId> {
        self.provisional
    }

    /// Starts a stroke at `point`. A stroke left open by an earlier release
    /// is continued instead of restarted.
    pub fn begin(
        &mut self,
        point: Vector3<f32>,
        style: PenStyle,
        registry: &mut ObjectRegistry,
    ) -> ObjectId {
        if self.drawing {
            log::debug!("stroke: resuming open stroke");
        }
        self.drawing = true;
        self.push_and_rebuild(point, style, registry)
    }

    /// Adds a sample to the stroke in progress. Returns `None` when no stroke
    /// is being drawn.
    pub fn extend(
        &mut self,
        point: Vector3<f32>,
        style: PenStyle,
        registry: &mut ObjectRegistry,
    ) -> Option<ObjectId> {
        if !self.drawing {
            return None;
        }
        Some(self.push_and_rebuild(point, style, registry))
    }

    /// Completes the stroke, optionally appending a last sample first. The
    /// finished mesh stays in the registry as an ordinary object.
    pub fn finish(
        &mut self,
        point: Option<Vector3<f32>>,
        style: PenStyle,
        registry: &mut ObjectRegistry,
    ) -> Option<ObjectId> {
        if !self.drawing {
            return None;
        }

        let id = match point {
            Some(point) => self.push_and_rebuild(point, style, registry),
            None => self.rebuild(style, registry),
        };
        log::info!("stroke {} finished with {} points", id, self.point_count());

        self.points.clear();
        self.provisional = None;
        self.drawing = false;
        Some(id)
    }

    /// Forgets the stroke in progress without touching the registry. Used
    /// when its mesh was removed from under it.
    pub fn reset(&mut self) {
        self.points.clear();
        self.provisional = None;
        self.drawing = false;
    }

    fn push_and_rebuild(
        &mut self,
        point: Vector3<f32>,
        style: PenStyle,
        registry: &mut ObjectRegistry,
    ) -> ObjectId {
        self.points.extend_from_slice(&[point.x, point.y, point.z]);
        log::debug!(
            "stroke: sample {} at ({:.3}, {:.3}, {:.3})",
            self.point_count(),
            point.x,
            point.y,
            point.z
        );
        self.rebuild(style, registry)
    }

    fn rebuild(&mut self, style: PenStyle, registry: &mut ObjectRegistry) -> ObjectId {
        if let Some(previous) = self.provisional.take() {
            registry.remove(previous);
        }
        let id = registry.add(SceneObject::line_stroke(&self.points, style));
        self.provisional = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::pen::PenColor;
    use crate::gfx::scene::ObjectKind;

    fn stroke_points(registry: &ObjectRegistry, id: ObjectId) -> usize {
        registry
            .get(id)
            .and_then(|object| object.stroke.as_ref())
            .map(|stroke| stroke.point_count())
            .unwrap_or(0)
    }

    #[test]
    fn test_each_sample_replaces_the_provisional_mesh() {
        let mut registry = ObjectRegistry::new();
        let mut builder = StrokeBuilder::new();
        let style = PenStyle::default();

        let first = builder.begin(Vector3::new(0.0, 0.0, 0.0), style, &mut registry);
        assert_eq!(registry.len(), 1);
        assert_eq!(stroke_points(&registry, first), 1);

        let second = builder
            .extend(Vector3::new(1.0, 0.0, 0.0), style, &mut registry)
            .expect("drawing");
        assert_ne!(first, second);
        assert!(!registry.contains(first));
        assert_eq!(registry.len(), 1);
        assert_eq!(stroke_points(&registry, second), 2);
    }

    #[test]
    fn test_finish_clears_buffer_and_keeps_mesh() {
        let mut registry = ObjectRegistry::new();
        let mut builder = StrokeBuilder::new();
        let style = PenStyle::default();

        builder.begin(Vector3::new(0.0, 0.0, 0.0), style, &mut registry);
        builder.extend(Vector3::new(0.5, 0.0, 0.0), style, &mut registry);
        let done = builder
            .finish(Some(Vector3::new(1.0, 0.0, 0.0)), style, &mut registry)
            .expect("finished");

        assert!(!builder.is_drawing());
        assert!(builder.points().is_empty());
        assert_eq!(builder.provisional(), None);
        assert_eq!(stroke_points(&registry, done), 3);
        assert_eq!(registry.count_kind(ObjectKind::LineStroke), 1);
    }

    #[test]
    fn test_finish_without_point_uses_buffer() {
        let mut registry = ObjectRegistry::new();
        let mut builder = StrokeBuilder::new();
        let style = PenStyle::default();

        builder.begin(Vector3::new(0.0, 0.0, 0.0), style, &mut registry);
        builder.extend(Vector3::new(0.0, 1.0, 0.0), style, &mut registry);
        let done = builder.finish(None, style, &mut registry).expect("finished");
        assert_eq!(stroke_points(&registry, done), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_idle_builder_ignores_samples() {
        let mut registry = ObjectRegistry::new();
        let mut builder = StrokeBuilder::new();
        let style = PenStyle::default();

        assert_eq!(builder.extend(Vector3::new(0.0, 0.0, 0.0), style, &mut registry), None);
        assert_eq!(builder.finish(None, style, &mut registry), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_rebuild_uses_current_style() {
        let mut registry = ObjectRegistry::new();
        let mut builder = StrokeBuilder::new();
        let mut style = PenStyle::default();

        builder.begin(Vector3::new(0.0, 0.0, 0.0), style, &mut registry);
        style.set_color(PenColor::Red);
        let id = builder
            .extend(Vector3::new(1.0, 0.0, 0.0), style, &mut registry)
            .expect("drawing");

        let color = registry.get(id).map(|object| object.material.base_color);
        assert_eq!(color, Some([1.0, 0.0, 0.0, 1.0]));
    }
}
