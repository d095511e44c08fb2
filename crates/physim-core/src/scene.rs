// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The object collection, its codec entry points, and the tick dispatcher.

use tracing::{debug, instrument};

use crate::config::{DecodeMode, SceneConfig};
use crate::error::CodecError;
use crate::ident::ObjectId;
use crate::object::{tick_all, PhysicalObject};
use crate::wire;

/// Ordered collection of physical objects.
///
/// Insertion order is tick order and encode order. The scene exclusively owns
/// its objects and their geometry arrays; replaced or removed objects are
/// dropped.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<PhysicalObject>,
    config: SceneConfig,
}

impl Scene {
    /// Empty scene with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scene with the given settings.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            objects: Vec::new(),
            config,
        }
    }

    /// Current settings.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Replaces the settings; objects are untouched.
    pub fn set_config(&mut self, config: SceneConfig) {
        self.config = config;
    }

    /// Appends an object and returns its identifier.
    pub fn add_object(&mut self, object: PhysicalObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Removes the object with `id`, preserving the order of the rest.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<PhysicalObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }

    /// Drops every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Looks up an object by identifier.
    pub fn get(&self, id: ObjectId) -> Option<&PhysicalObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Looks up an object by identifier for mutation.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PhysicalObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Objects in collection order.
    pub fn objects(&self) -> &[PhysicalObject] {
        &self.objects
    }

    /// Consumes the scene, returning its objects.
    pub fn into_objects(self) -> Vec<PhysicalObject> {
        self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Ticks every object once, in collection order. Returns how many were ticked.
    pub fn physics_tick(&mut self, delta: f64) -> usize {
        tick_all(&mut self.objects, delta);
        self.objects.len()
    }

    /// Word length [`Scene::drop_all_data`] will produce.
    pub fn serialized_word_length(&self) -> usize {
        wire::encoded_word_length(&self.objects)
    }

    /// Encodes every object into a new buffer owned by the caller.
    #[instrument(level = "debug", skip(self), fields(objects = self.objects.len()))]
    pub fn drop_all_data(&self) -> Result<Vec<u32>, CodecError> {
        wire::encode_objects(&self.objects)
    }

    /// Decodes `words` and installs the objects per the configured [`DecodeMode`].
    ///
    /// The buffer is fully decoded before the collection is touched, so a
    /// failed decode leaves the scene unchanged. Returns the number of objects
    /// decoded.
    #[instrument(level = "debug", skip(self, words), fields(words = words.len()))]
    pub fn set_all_data(&mut self, words: &[u32]) -> Result<usize, CodecError> {
        let decoded = wire::decode_objects(words, &self.config)?;
        let count = decoded.len();
        match self.config.decode_mode {
            DecodeMode::Replace => {
                debug!(dropped = self.objects.len(), installed = count, "replacing objects");
                self.objects = decoded;
            }
            DecodeMode::Append => {
                debug!(kept = self.objects.len(), appended = count, "appending objects");
                self.objects.extend(decoded);
            }
        }
        Ok(count)
    }

    /// Initial load from the host; same path as [`Scene::set_all_data`].
    pub fn init_all_data(&mut self, words: &[u32]) -> Result<usize, CodecError> {
        self.set_all_data(words)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::math::Vec3;

    #[test]
    fn empty_scene_encodes_to_single_zero_word() {
        assert_eq!(Scene::new().drop_all_data().unwrap(), vec![0]);
    }

    #[test]
    fn remove_keeps_order_of_remaining_objects() {
        let mut scene = demo::triangle_scene(3);
        let ids: Vec<_> = scene.objects().iter().map(PhysicalObject::id).collect();
        let removed = scene.remove_object(ids[1]).unwrap();
        assert_eq!(removed.id(), ids[1]);
        let left: Vec<_> = scene.objects().iter().map(PhysicalObject::id).collect();
        assert_eq!(left, vec![ids[0], ids[2]]);
        assert!(scene.remove_object(ids[1]).is_none());
    }

    #[test]
    fn replace_mode_swaps_collection() {
        let words = demo::triangle_scene(2).drop_all_data().unwrap();
        let mut scene = demo::triangle_scene(5);
        assert_eq!(scene.set_all_data(&words).unwrap(), 2);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn append_mode_keeps_existing_objects() {
        let words = demo::triangle_scene(2).drop_all_data().unwrap();
        let mut scene = Scene::with_config(SceneConfig {
            decode_mode: DecodeMode::Append,
            ..SceneConfig::default()
        });
        scene.add_object(PhysicalObject::new());
        scene.set_all_data(&words).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.objects()[0].mesh().vertices_count(), 0);
    }

    #[test]
    fn failed_decode_leaves_scene_unchanged() {
        let mut scene = demo::triangle_scene(2);
        let before = scene.drop_all_data().unwrap();
        let words = demo::triangle_scene(1).drop_all_data().unwrap();
        assert!(scene.set_all_data(&words[..words.len() - 2]).is_err());
        assert_eq!(scene.drop_all_data().unwrap(), before);
    }

    #[test]
    fn tick_reports_each_object() {
        let mut scene = demo::triangle_scene(4);
        let before = scene.drop_all_data().unwrap();
        assert_eq!(scene.physics_tick(1.0 / 60.0), 4);
        assert_eq!(scene.physics_tick(-5.0), 4);
        assert_eq!(scene.drop_all_data().unwrap(), before);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut scene = demo::triangle_scene(1);
        let id = scene.objects()[0].id();
        scene
            .get_mut(id)
            .unwrap()
            .set_mesh_pivot(Vec3::new(9.0, 9.0, 9.0));
        assert_eq!(scene.get(id).unwrap().mesh_pivot(), Vec3::new(9.0, 9.0, 9.0));
    }
}
