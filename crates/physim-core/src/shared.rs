// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A scene behind one exclusive lock, for hosts that call in from several threads.

use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::config::SceneConfig;
use crate::error::CodecError;
use crate::ident::ObjectId;
use crate::object::PhysicalObject;
use crate::scene::Scene;

/// Serializes encode, decode, and tick on one [`Scene`].
///
/// Every operation holds the lock for its whole duration, so a tick never
/// observes a half-installed decode. Decode swaps the collection only after
/// the buffer has been fully read, which keeps the scene consistent even if a
/// previous holder panicked; a poisoned lock is therefore recovered.
#[derive(Debug, Default)]
pub struct SharedScene {
    inner: Mutex<Scene>,
}

impl SharedScene {
    /// Wraps an empty scene with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an empty scene with the given settings.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self::from_scene(Scene::with_config(config))
    }

    /// Wraps an existing scene.
    #[must_use]
    pub fn from_scene(scene: Scene) -> Self {
        Self {
            inner: Mutex::new(scene),
        }
    }

    /// Locks the scene for direct access.
    pub fn lock(&self) -> MutexGuard<'_, Scene> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("scene lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// See [`Scene::init_all_data`].
    pub fn init_all_data(&self, words: &[u32]) -> Result<usize, CodecError> {
        self.lock().init_all_data(words)
    }

    /// See [`Scene::set_all_data`].
    pub fn set_all_data(&self, words: &[u32]) -> Result<usize, CodecError> {
        self.lock().set_all_data(words)
    }

    /// See [`Scene::drop_all_data`].
    pub fn drop_all_data(&self) -> Result<Vec<u32>, CodecError> {
        self.lock().drop_all_data()
    }

    /// See [`Scene::physics_tick`].
    pub fn physics_tick(&self, delta: f64) -> usize {
        self.lock().physics_tick(delta)
    }

    /// See [`Scene::add_object`].
    pub fn add_object(&self, object: PhysicalObject) -> ObjectId {
        self.lock().add_object(object)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Unwraps the scene.
    pub fn into_inner(self) -> Scene {
        self.inner
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::demo;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn concurrent_ticks_and_decodes_never_see_partial_state() {
        let words = demo::triangle_scene(8).drop_all_data().unwrap();
        let shared = Arc::new(SharedScene::from_scene(demo::triangle_scene(8)));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                let words = words.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        if i % 2 == 0 {
                            shared.set_all_data(&words).unwrap();
                        } else {
                            assert_eq!(shared.physics_tick(0.01), 8);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.drop_all_data().unwrap(), words);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = Arc::new(SharedScene::new());
        let clone = Arc::clone(&shared);
        let _ = thread::spawn(move || {
            let _guard = clone.lock();
            panic!("poison");
        })
        .join();
        shared.add_object(PhysicalObject::new());
        assert_eq!(shared.len(), 1);
    }
}
