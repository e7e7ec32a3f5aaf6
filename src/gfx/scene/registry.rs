//! Ordered store of every object in the scene.
//!
//! The registry is the single owner of scene objects. Insertion order is the
//! render order, and the render pass walks the registry directly, so an
//! object is drawn exactly when it is registered.

use super::object::{ObjectId, ObjectKind, SceneObject};

#[derive(Debug)]
struct Entry {
    id: ObjectId,
    object: SceneObject,
}

#[derive(Debug, Default)]
pub struct ObjectRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `object` and returns its id. Names are made unique the same
    /// way a file manager would: "Box", "Box (1)", "Box (2)".
    pub fn add(&mut self, mut object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        object.name = self.ensure_unique_name(&object.name);
        log::debug!("registry: added {} {}", object.name, id);
        self.entries.push(Entry { id, object });
        id
    }

    /// Disposes and removes the object. Returns false when `id` is unknown.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                let mut entry = self.entries.remove(index);
                entry.object.dispose();
                log::debug!("registry: removed {} {}", entry.object.name, id);
                true
            }
            None => {
                log::trace!("registry: remove of unknown object {}", id);
                false
            }
        }
    }

    /// Disposes and removes every object matching `predicate`, keeping the
    /// survivors in order. Returns how many were removed.
    pub fn clear<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&SceneObject) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain_mut(|entry| {
            if predicate(&entry.object) {
                entry.object.dispose();
                false
            } else {
                true
            }
        });
        before - self.entries.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.object)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.entries.iter().map(|entry| (entry.id, &entry.object))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut SceneObject)> {
        self.entries
            .iter_mut()
            .map(|entry| (entry.id, &mut entry.object))
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.object.kind == kind)
            .count()
    }

    /// Teardown: disposes and drops everything.
    pub fn dispose_all(&mut self) {
        let count = self.clear(|_| true);
        log::info!("disposed {} scene objects", count);
    }

    fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.entries.iter().any(|entry| entry.object.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}
